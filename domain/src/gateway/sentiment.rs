//! Client for the comment sentiment and summarization service.
//!
//! The service fetches a video's comments itself; this client only names the
//! video and receives either the per-emotion classification or a free-text
//! summary.

use crate::error::Error;
use crate::gateway::{build_client, endpoint, send_for_json};
use crate::sentiment::SentimentResult;
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;
use utoipa::ToSchema;

const COLLABORATOR: &str = "sentiment service";

/// Body of `GET /sentiment`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SentimentResponse {
    /// Comments grouped by emotion label
    #[schema(value_type = std::collections::HashMap<String, Vec<String>>)]
    pub result: SentimentResult,
}

/// Body of `GET /analysis`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    /// Model-generated summary of the comments
    pub result: String,
}

pub struct SentimentClient {
    client: reqwest::Client,
    base_url: String,
}

impl SentimentClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(config.sentiment_service_url())
    }

    /// Classifies the comments of `video_id` by emotion.
    pub async fn fetch_sentiment(&self, video_id: &str) -> Result<SentimentResponse, Error> {
        debug!("Fetching sentiment for video {video_id}");
        let request = self
            .client
            .get(endpoint(&self.base_url, "sentiment"))
            .query(&[("videoId", video_id)]);

        let response: SentimentResponse = send_for_json(request, COLLABORATOR).await?;
        info!(
            "Received {} comments in {} emotion groups for video {video_id}",
            response.result.total_comments(),
            response.result.len()
        );
        Ok(response)
    }

    /// Summarizes the comments of `video_id`.
    pub async fn fetch_analysis(&self, video_id: &str) -> Result<AnalysisResponse, Error> {
        debug!("Fetching analysis for video {video_id}");
        let request = self
            .client
            .get(endpoint(&self.base_url, "analysis"))
            .query(&[("videoId", video_id)]);

        send_for_json(request, COLLABORATOR).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind};
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_fetch_sentiment_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/sentiment")
            .match_query(Matcher::UrlEncoded("videoId".into(), "abc123".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": {"joy": ["Great at 1:05!"], "anger": []}}"#)
            .create_async()
            .await;

        let client = SentimentClient::new(&server.url()).unwrap();
        let response = client.fetch_sentiment("abc123").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            response.result.comments_for("joy"),
            Some(&["Great at 1:05!".to_string()][..])
        );
        assert_eq!(response.result.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_analysis_success() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/analysis")
            .match_query(Matcher::UrlEncoded("videoId".into(), "abc123".into()))
            .with_status(200)
            .with_body(r#"{"result": "- People loved it"}"#)
            .create_async()
            .await;

        let client = SentimentClient::new(&server.url()).unwrap();
        let response = client.fetch_analysis("abc123").await.unwrap();

        assert_eq!(response.result, "- People loved it");
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/sentiment")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = SentimentClient::new(&server.url()).unwrap();
        let err = client.fetch_sentiment("abc123").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Upstream(503))
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_external_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/sentiment")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"result": {"joy": 3}}"#)
            .create_async()
            .await;

        let client = SentimentClient::new(&server.url()).unwrap();
        let err = client.fetch_sentiment("abc123").await.unwrap_err();

        assert!(matches!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Other(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let client = SentimentClient::new("http://127.0.0.1:9").unwrap();
        let err = client.fetch_analysis("abc123").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Network)
        );
    }
}
