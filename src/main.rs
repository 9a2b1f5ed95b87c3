use log::{error, info};
use service::{config::Config, logging::Logger, AppState};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!(
        "Starting comment_lens [{}], sentiment service at {}",
        config.runtime_env(),
        config.sentiment_service_url()
    );
    if config.google_api_key().is_none() {
        error!("GOOGLE_API_KEY is not set; YouTube search endpoints will fail");
    }

    let app_state = AppState::new(config);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server exited with error: {e}");
        std::process::exit(1);
    }
}
