//! Everything the results page shows for one video.

use crate::error::Error;
use crate::gateway::sentiment::SentimentClient;
use crate::sentiment::SentimentResult;
use crate::summary::format_analysis_text;
use crate::timeline::{build_pie_data, build_timeline, PieSlice, TimelineBin};
use log::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct VideoInsights {
    pub video_id: String,
    /// The comment summary rendered as HTML
    pub summary_html: String,
    /// Emotion breakdown, largest first
    pub pie: Vec<PieSlice>,
    /// Comment counts per 30 second window, in time order
    pub timeline: Vec<TimelineBin>,
    /// Raw comments by emotion, for drilling into a slice
    #[schema(value_type = std::collections::HashMap<String, Vec<String>>)]
    pub comments: SentimentResult,
}

impl VideoInsights {
    /// Derives the page data from the two service responses.
    pub fn derive(video_id: &str, summary: Option<&str>, sentiment: SentimentResult) -> Self {
        Self {
            video_id: video_id.to_string(),
            summary_html: format_analysis_text(summary),
            pie: build_pie_data(Some(&sentiment)),
            timeline: build_timeline(Some(&sentiment)),
            comments: sentiment,
        }
    }
}

/// Requests the summary and the classification of `video_id` concurrently and
/// derives the page data once both have arrived.
///
/// If either request fails the other is dropped, which cancels it.
pub async fn fetch_video_insights(
    client: &SentimentClient,
    video_id: &str,
) -> Result<VideoInsights, Error> {
    let (analysis, sentiment) = tokio::try_join!(
        client.fetch_analysis(video_id),
        client.fetch_sentiment(video_id)
    )
    .inspect_err(|e| warn!("Failed to fetch insights for video {video_id}: {e}"))?;

    let insights =
        VideoInsights::derive(video_id, Some(analysis.result.as_str()), sentiment.result);
    debug!(
        "Derived {} emotion slices and {} timeline bins for video {video_id}",
        insights.pie.len(),
        insights.timeline.len()
    );
    Ok(insights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind};
    use mockito::{Matcher, Server};

    #[test]
    fn test_derive_builds_every_view() {
        let sentiment: SentimentResult = [
            ("joy", vec!["Great at 1:05!", "Loved it 1:20"]),
            ("anger", vec![]),
        ]
        .into_iter()
        .collect();

        let insights = VideoInsights::derive("abc123", Some("**Verdict**"), sentiment);

        assert_eq!(insights.summary_html, "<b>Verdict</b>");
        assert_eq!(insights.pie.len(), 1);
        assert_eq!(insights.timeline[0].timestamp, "1:00");
        assert_eq!(insights.comments.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_video_insights_joins_both_responses() {
        let mut server = Server::new_async().await;
        let analysis = server
            .mock("GET", "/analysis")
            .match_query(Matcher::UrlEncoded("videoId".into(), "abc123".into()))
            .with_status(200)
            .with_body(r#"{"result": "- Mostly positive\n- Some spoilers"}"#)
            .create_async()
            .await;
        let sentiment = server
            .mock("GET", "/sentiment")
            .match_query(Matcher::UrlEncoded("videoId".into(), "abc123".into()))
            .with_status(200)
            .with_body(r#"{"result": {"joy": ["0:31 yes", "0:59 yes"], "fear": ["no timestamp"]}}"#)
            .create_async()
            .await;

        let client = SentimentClient::new(&server.url()).unwrap();
        let insights = fetch_video_insights(&client, "abc123").await.unwrap();

        analysis.assert_async().await;
        sentiment.assert_async().await;
        assert_eq!(
            insights.summary_html,
            "<ul><li>Mostly positive</li><li>Some spoilers</li></ul>"
        );
        assert_eq!(insights.pie[0].name, "joy");
        assert_eq!(insights.pie[1].name, "fear");
        assert_eq!(
            insights.timeline,
            vec![TimelineBin {
                timestamp: "0:30".to_string(),
                count: 2
            }]
        );
    }

    #[tokio::test]
    async fn test_either_failure_fails_the_whole_request() {
        let mut server = Server::new_async().await;
        let _analysis = server
            .mock("GET", "/analysis")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"result": "fine"}"#)
            .create_async()
            .await;
        let _sentiment = server
            .mock("GET", "/sentiment")
            .match_query(Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let client = SentimentClient::new(&server.url()).unwrap();
        let err = fetch_video_insights(&client, "abc123").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Upstream(502))
        );
    }
}
