use crate::controller::{
    auth_controller, contact_controller, health_check_controller, sentiment_controller,
    youtube_controller,
};
use crate::middleware::{route_guard::route_guard, session::resolve_session};
use crate::{error, params, AppState};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Comment Lens API"
        ),
        paths(
            health_check_controller::health_check,
            sentiment_controller::sentiment,
            sentiment_controller::analysis,
            sentiment_controller::results,
            youtube_controller::search,
            youtube_controller::video_search,
            contact_controller::send,
            auth_controller::check,
            auth_controller::login,
            auth_controller::register,
            auth_controller::callback,
            auth_controller::logout,
        ),
        components(
            schemas(
                domain::gateway::sentiment::SentimentResponse,
                domain::gateway::sentiment::AnalysisResponse,
                domain::gateway::youtube::SearchListResponse,
                domain::insights::VideoInsights,
                domain::timeline::PieSlice,
                domain::timeline::TimelineBin,
                domain::session::UserProfile,
                auth_controller::AuthStatus,
                contact_controller::ContactResponse,
                params::contact::ContactParams,
                error::ErrorBody,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "comment_lens", description = "YouTube comment sentiment API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Signed-in state lives in a cookie session, so that is the only security scheme.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "id",
                    "Session id value set by a successful /api/auth/callback",
                ))),
            )
        }
    }
}

/// Every route of the application, guarded and with the session resolved.
///
/// The returned router still needs a session layer around it; see
/// [`crate::session_layer`].
pub fn define_routes(app_state: AppState) -> Router {
    let static_dir = app_state.config.static_dir.clone();

    Router::new()
        .merge(health_routes())
        .merge(sentiment_routes(app_state.clone()))
        .merge(youtube_routes(app_state.clone()))
        .merge(contact_routes(app_state.clone()))
        .merge(auth_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback_service(static_routes(&static_dir))
        .layer(from_fn(route_guard))
        .layer(from_fn(resolve_session))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn sentiment_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/sentiment", post(sentiment_controller::sentiment))
        .route("/api/analysis", post(sentiment_controller::analysis))
        .route("/api/results", get(sentiment_controller::results))
        .with_state(app_state)
}

fn youtube_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/youtube-search", get(youtube_controller::search))
        .route(
            "/api/youtube-video-search",
            get(youtube_controller::video_search),
        )
        .with_state(app_state)
}

fn contact_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/contact", post(contact_controller::send))
        .with_state(app_state)
}

fn auth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/check", get(auth_controller::check))
        .route("/api/auth/login", get(auth_controller::login))
        .route("/api/auth/register", get(auth_controller::register))
        .route("/api/auth/callback", get(auth_controller::callback))
        .route("/api/auth/logout", get(auth_controller::logout))
        .with_state(app_state)
}

// Everything that is not an API route is part of the front-end bundle.
fn static_routes(static_dir: &str) -> ServeDir {
    ServeDir::new(static_dir)
}
