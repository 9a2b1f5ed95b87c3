//! Chart-ready aggregations over a [`SentimentResult`].
//!
//! Two views are derived: the emotion breakdown shown as a pie chart, and a
//! histogram of the video timestamps viewers mention in their comments, grouped
//! into fixed 30 second windows.

use crate::sentiment::SentimentResult;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use utoipa::ToSchema;

/// Width of one timeline bin, in seconds.
pub const BIN_WIDTH_SECONDS: u64 = 30;

// ASCII digits only: `\d` would also match other Unicode decimal digits.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+):([0-9]+)").expect("timestamp pattern is a valid regex")
});

/// One slice of the emotion pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PieSlice {
    /// Emotion label
    pub name: String,
    /// Number of comments filed under the label
    pub value: usize,
}

/// Number of comments that reference a moment inside one 30 second window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimelineBin {
    /// Window start formatted as `M:SS`
    #[schema(example = "1:30")]
    pub timestamp: String,
    pub count: usize,
}

/// Builds the pie chart data: one slice per label with at least one comment,
/// largest first. Labels with equal counts keep their original order.
pub fn build_pie_data(result: Option<&SentimentResult>) -> Vec<PieSlice> {
    let Some(result) = result else {
        return Vec::new();
    };

    let mut slices: Vec<PieSlice> = result
        .iter()
        .filter(|(_, comments)| !comments.is_empty())
        .map(|(label, comments)| PieSlice {
            name: label.to_string(),
            value: comments.len(),
        })
        .collect();

    // `sort_by` is stable, which keeps label order between equal counts.
    slices.sort_by(|a, b| b.value.cmp(&a.value));
    slices
}

/// Builds the comment timeline: every comment mentioning a timestamp is counted
/// in the 30 second window containing it. Bins are returned in time order and
/// only windows with at least one comment appear.
pub fn build_timeline(result: Option<&SentimentResult>) -> Vec<TimelineBin> {
    let Some(result) = result else {
        return Vec::new();
    };

    let mut bins: BTreeMap<u64, usize> = BTreeMap::new();
    for seconds in result.comments().filter_map(first_timestamp_seconds) {
        *bins.entry(bin_start(seconds)).or_insert(0) += 1;
    }

    bins.into_iter()
        .map(|(start, count)| TimelineBin {
            timestamp: format_timestamp(start),
            count,
        })
        .collect()
}

/// Total seconds of the first `minutes:seconds` pattern found in `comment`.
///
/// Seconds are not bounds checked, so `1:99` is 159 seconds. Numbers too large
/// to represent are treated as if no timestamp were present.
pub fn first_timestamp_seconds(comment: &str) -> Option<u64> {
    let captures = TIMESTAMP.captures(comment)?;
    let minutes: u64 = captures[1].parse().ok()?;
    let seconds: u64 = captures[2].parse().ok()?;
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Start of the bin containing `seconds`.
pub fn bin_start(seconds: u64) -> u64 {
    seconds / BIN_WIDTH_SECONDS * BIN_WIDTH_SECONDS
}

/// Formats `seconds` as `M:SS`; minutes are not wrapped into hours.
pub fn format_timestamp(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Inverse of [`format_timestamp`]: reads an `M:SS` label back into seconds.
pub fn parse_timestamp(label: &str) -> Option<u64> {
    let (minutes, seconds) = label.split_once(':')?;
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    minutes.checked_mul(60)?.checked_add(seconds)
}
