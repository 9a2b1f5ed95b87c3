use axum::http::{header, HeaderValue, Method};
use log::*;
use time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub use error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod middleware;
mod params;
pub mod router;

/// Binds the configured interface and port and serves the application until
/// the process is stopped.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let config = app_state.config.clone();
    let host = config.interface.as_deref().unwrap_or("127.0.0.1");
    let server_url = format!("{host}:{}", config.port);

    let listener = TcpListener::bind(&server_url).await?;
    info!("Server starting... listening for connections on http://{server_url}");

    let cors_layer = cors_layer(&config.allowed_origins);
    let app = router::define_routes(app_state)
        .layer(session_layer(&config))
        .layer(cors_layer);

    axum::serve(listener, app).await
}

/// Server-side sessions kept in memory; they do not survive a restart.
pub fn session_layer(config: &service::config::Config) -> SessionManagerLayer<MemoryStore> {
    let expiry_seconds = i64::try_from(config.session_expiry_seconds).unwrap_or(i64::MAX);

    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.is_production())
        .with_expiry(Expiry::OnInactivity(Duration::seconds(expiry_seconds)))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Ignoring invalid CORS origin {origin:?}: {err}");
                None
            }
        })
        .collect();
    debug!("CORS allowed origins: {origins:?}");

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_origin(origins)
}
