//! The comment classification produced by the sentiment service.
//!
//! A [`SentimentResult`] maps each emotion label to the raw comments the service
//! filed under it. Labels keep the order in which they appear in the service's
//! JSON document: that order breaks ties when the pie chart is sorted.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentResult {
    groups: Vec<(String, Vec<String>)>,
}

impl SentimentResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `comments` under `label`. A label that is already present has its
    /// comments replaced but keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, comments: Vec<String>) {
        let label = label.into();
        match self.groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, existing_comments)) => *existing_comments = comments,
            None => self.groups.push((label, comments)),
        }
    }

    /// Labels with their comments, in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(label, comments)| (label.as_str(), comments.as_slice()))
    }

    /// Every comment across all labels: label order first, then within-label order.
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|(_, comments)| comments.iter().map(String::as_str))
    }

    /// Comments filed under `label`, if the label exists.
    pub fn comments_for(&self, label: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, comments)| comments.as_slice())
    }

    pub fn total_comments(&self) -> usize {
        self.groups.iter().map(|(_, comments)| comments.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<L, C> FromIterator<(L, C)> for SentimentResult
where
    L: Into<String>,
    C: IntoIterator,
    C::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, C)>>(iter: I) -> Self {
        let mut result = SentimentResult::new();
        for (label, comments) in iter {
            result.insert(label, comments.into_iter().map(Into::into).collect());
        }
        result
    }
}

impl Serialize for SentimentResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (label, comments) in &self.groups {
            map.serialize_entry(label, comments)?;
        }
        map.end()
    }
}

struct SentimentResultVisitor;

impl<'de> Visitor<'de> for SentimentResultVisitor {
    type Value = SentimentResult;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from emotion label to a list of comments")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = SentimentResult::new();
        while let Some((label, comments)) = access.next_entry::<String, Vec<String>>()? {
            result.insert(label, comments);
        }
        Ok(result)
    }
}

impl<'de> Deserialize<'de> for SentimentResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SentimentResultVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_preserves_document_order() {
        let result: SentimentResult = serde_json::from_str(
            r#"{"surprise": ["wow"], "anger": [], "joy": ["yay", "nice"]}"#,
        )
        .unwrap();

        let labels: Vec<&str> = result.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["surprise", "anger", "joy"]);
        assert_eq!(result.total_comments(), 3);
    }

    #[test]
    fn test_duplicate_label_keeps_first_position_and_last_value() {
        let result: SentimentResult =
            serde_json::from_str(r#"{"joy": ["a"], "fear": ["b"], "joy": ["c", "d"]}"#).unwrap();

        let labels: Vec<&str> = result.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["joy", "fear"]);
        assert_eq!(
            result.comments_for("joy"),
            Some(&["c".to_string(), "d".to_string()][..])
        );
    }

    #[test]
    fn test_rejects_non_list_values() {
        let parsed = serde_json::from_str::<SentimentResult>(r#"{"joy": "not a list"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serializes_as_json_object() {
        let result: SentimentResult =
            [("joy", vec!["great"]), ("anger", vec![])].into_iter().collect();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"joy": ["great"], "anger": []})
        );
    }

    #[test]
    fn test_comments_flatten_in_label_order() {
        let result: SentimentResult = [("joy", vec!["1", "2"]), ("sadness", vec!["3"])]
            .into_iter()
            .collect();

        assert_eq!(result.comments().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(result.comments_for("fear"), None);
    }
}
