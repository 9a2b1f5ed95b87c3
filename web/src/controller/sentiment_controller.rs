use crate::error::{Context, ErrorBody};
use crate::params::video::VideoParams;
use crate::{AppState, Result};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use domain::gateway::sentiment::{AnalysisResponse, SentimentClient, SentimentResponse};
use domain::insights::{self, VideoInsights};
use log::*;

/// POST classify a video's comments by emotion
#[utoipa::path(
    post,
    path = "/api/sentiment",
    params(VideoParams),
    responses(
        (status = 200, description = "Comments grouped by emotion label", body = SentimentResponse),
        (status = 400, description = "Missing videoId", body = ErrorBody),
        (status = 500, description = "Sentiment service failed", body = ErrorBody),
    )
)]
pub async fn sentiment(
    State(app_state): State<AppState>,
    Query(params): Query<VideoParams>,
) -> Result<impl IntoResponse> {
    let video_id = params.video_id()?;
    debug!("POST sentiment for video {video_id}");

    let client = SentimentClient::from_config(&app_state.config)
        .context("Failed to fetch sentiment analysis")?;
    let response = client
        .fetch_sentiment(video_id)
        .await
        .context("Failed to fetch sentiment analysis")?;

    Ok(Json(response))
}

/// POST summarize a video's comments
#[utoipa::path(
    post,
    path = "/api/analysis",
    params(VideoParams),
    responses(
        (status = 200, description = "Free-text summary of the comments", body = AnalysisResponse),
        (status = 400, description = "Missing videoId", body = ErrorBody),
        (status = 500, description = "Sentiment service failed", body = ErrorBody),
    )
)]
pub async fn analysis(
    State(app_state): State<AppState>,
    Query(params): Query<VideoParams>,
) -> Result<impl IntoResponse> {
    let video_id = params.video_id()?;
    debug!("POST analysis for video {video_id}");

    let client = SentimentClient::from_config(&app_state.config)
        .context("Failed to fetch comment analysis")?;
    let response = client
        .fetch_analysis(video_id)
        .await
        .context("Failed to fetch comment analysis")?;

    Ok(Json(response))
}

/// GET everything the results page shows for a video
///
/// The summary and the classification are requested concurrently; if either
/// fails the request fails.
#[utoipa::path(
    get,
    path = "/api/results",
    params(VideoParams),
    responses(
        (status = 200, description = "Summary, emotion breakdown and comment timeline", body = VideoInsights),
        (status = 400, description = "Missing videoId", body = ErrorBody),
        (status = 500, description = "Sentiment service failed", body = ErrorBody),
    )
)]
pub async fn results(
    State(app_state): State<AppState>,
    Query(params): Query<VideoParams>,
) -> Result<impl IntoResponse> {
    let video_id = params.video_id()?;
    debug!("GET results for video {video_id}");

    let client =
        SentimentClient::from_config(&app_state.config).context("Failed to fetch video results")?;
    let insights = insights::fetch_video_insights(&client, video_id)
        .await
        .context("Failed to fetch video results")?;

    Ok(Json(insights))
}
