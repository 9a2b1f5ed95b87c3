//! YouTube Data API v3 client for channel discovery and channel video listings.
//!
//! Both operations use the `search.list` endpoint. Response types keep the API's
//! camelCase field names so the front-end receives the shape it expects.

use crate::error::Error;
use crate::gateway::{build_client, endpoint, send_for_json};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;
use std::collections::BTreeMap;
use utoipa::ToSchema;

const COLLABORATOR: &str = "YouTube Data API";

/// Number of channels returned for one search.
pub const CHANNEL_SEARCH_MAX_RESULTS: u8 = 15;

/// Number of videos returned per page of a channel listing.
pub const CHANNEL_VIDEOS_PAGE_SIZE: u8 = 10;

/// One page of `search.list` results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Cursor for the following page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: Option<u64>,
    pub results_per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<Snippet>,
}

/// Identifies the channel or video a search result refers to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Thumbnails keyed by size name (`default`, `medium`, `high`, ...)
    #[serde(default)]
    pub thumbnails: BTreeMap<String, Thumbnail>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub live_broadcast_content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Builds a client from `config`, failing when no Google API key is configured.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let api_key = config.google_api_key().ok_or_else(|| {
            warn!("Google API key is not configured");
            Error::config("Google API key is not configured")
        })?;
        Self::new(config.youtube_api_base_url(), &api_key)
    }

    /// Searches for channels matching `query`.
    pub async fn search_channels(&self, query: &str) -> Result<SearchListResponse, Error> {
        debug!("Searching YouTube channels for {query:?}");
        let max_results = CHANNEL_SEARCH_MAX_RESULTS.to_string();
        let request = self.client.get(endpoint(&self.base_url, "search")).query(&[
            ("part", "snippet"),
            ("q", query),
            ("type", "channel"),
            ("chart", "mostPopular"),
            ("maxResults", max_results.as_str()),
            ("key", self.api_key.as_str()),
        ]);

        send_for_json(request, COLLABORATOR).await
    }

    /// Lists a channel's videos, newest first, one page at a time.
    ///
    /// Pass the previous page's `next_page_token` as `page_token` to continue.
    pub async fn list_channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse, Error> {
        debug!("Listing videos for channel {channel_id} (page token: {page_token:?})");
        let page_size = CHANNEL_VIDEOS_PAGE_SIZE.to_string();
        let mut request = self.client.get(endpoint(&self.base_url, "search")).query(&[
            ("channelId", channel_id),
            ("part", "snippet"),
            ("order", "date"),
            ("type", "video"),
            ("maxResults", page_size.as_str()),
            ("key", self.api_key.as_str()),
        ]);
        if let Some(page_token) = page_token {
            request = request.query(&[("pageToken", page_token)]);
        }

        let page: SearchListResponse = send_for_json(request, COLLABORATOR).await?;
        debug!(
            "Channel {channel_id} page returned {} videos, more available: {}",
            page.items.len(),
            page.next_page_token.is_some()
        );
        Ok(page)
    }
}
