use crate::error::{Context, ErrorBody};
use crate::params::youtube::{SearchParams, VideoSearchParams};
use crate::{AppState, Result};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use domain::gateway::youtube::{SearchListResponse, YouTubeClient};
use log::*;

/// GET search YouTube channels
#[utoipa::path(
    get,
    path = "/api/youtube-search",
    params(SearchParams),
    responses(
        (status = 200, description = "Up to 15 matching channels", body = SearchListResponse),
        (status = 400, description = "Missing q", body = ErrorBody),
        (status = 500, description = "YouTube API unavailable or not configured", body = ErrorBody),
    )
)]
pub async fn search(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse> {
    let query = params.query()?;
    debug!("GET channel search for {query:?}");

    let client = YouTubeClient::from_config(&app_state.config)?;
    let channels = client
        .search_channels(query)
        .await
        .context("Failed to fetch search results")?;

    Ok(Json(channels))
}

/// GET one page of a channel's videos, newest first
#[utoipa::path(
    get,
    path = "/api/youtube-video-search",
    params(VideoSearchParams),
    responses(
        (status = 200, description = "Up to 10 videos and the next page token", body = SearchListResponse),
        (status = 400, description = "Missing channelId", body = ErrorBody),
        (status = 500, description = "YouTube API unavailable or not configured", body = ErrorBody),
    )
)]
pub async fn video_search(
    State(app_state): State<AppState>,
    Query(params): Query<VideoSearchParams>,
) -> Result<impl IntoResponse> {
    let channel_id = params.channel_id()?;
    debug!("GET videos for channel {channel_id}");

    let client = YouTubeClient::from_config(&app_state.config)?;
    let videos = client
        .list_channel_videos(channel_id, params.page_token())
        .await
        .context("Failed to fetch search results")?;

    Ok(Json(videos))
}
