use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Default base URL of the comment sentiment/summarization service.
pub const DEFAULT_SENTIMENT_SERVICE_URL: &str = "http://127.0.0.1:5000";

/// Default YouTube Data API v3 base URL used when `YOUTUBE_API_BASE_URL` is not set.
pub const DEFAULT_YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default MailerSend API base URL used when `MAILERSEND_BASE_URL` is not set.
pub const DEFAULT_MAILERSEND_BASE_URL: &str = "https://api.mailersend.com/v1";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Directory holding the compiled front-end bundle served for every non-API path.
    #[arg(long, env, default_value = "./public")]
    pub static_dir: String,

    /// Base URL of the comment sentiment and summarization service.
    #[arg(long, env, default_value = DEFAULT_SENTIMENT_SERVICE_URL)]
    sentiment_service_url: String,

    /// Base URL of the YouTube Data API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_YOUTUBE_API_BASE_URL)]
    youtube_api_base_url: String,

    /// The Google API key used when calling the YouTube Data API.
    #[arg(long, env)]
    google_api_key: Option<String>,

    /// Issuer URL of the identity provider (e.g. https://myapp.kinde.com).
    #[arg(long, env)]
    identity_issuer_url: Option<String>,

    /// OAuth client ID registered with the identity provider.
    #[arg(long, env)]
    identity_client_id: Option<String>,

    /// OAuth client secret registered with the identity provider.
    #[arg(long, env)]
    identity_client_secret: Option<String>,

    /// Absolute URL of this server's `/api/auth/callback` route.
    #[arg(long, env, default_value = "http://localhost:4000/api/auth/callback")]
    identity_redirect_url: String,

    /// Where the browser lands after a successful login.
    #[arg(long, env, default_value = "/")]
    post_login_redirect_url: String,

    /// Where the identity provider sends the browser after logout.
    #[arg(long, env, default_value = "http://localhost:4000/")]
    post_logout_redirect_url: String,

    /// Session expiry on inactivity, in seconds (default: 24 hours = 86400 seconds)
    #[arg(long, env, default_value_t = 86400)]
    pub session_expiry_seconds: u64,

    /// The base URL of the MailerSend API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_MAILERSEND_BASE_URL)]
    mailersend_base_url: String,

    /// The API key to use when calling the MailerSend API.
    #[arg(long, env)]
    mailersend_api_key: Option<String>,

    /// Verified sender address used for contact form submissions.
    #[arg(long, env)]
    contact_email_from: Option<String>,

    /// Inbox that receives contact form submissions.
    #[arg(long, env)]
    contact_email_to: Option<String>,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        // Only defaults and environment variables; the process arguments may belong
        // to a test harness rather than to this server.
        Config::parse_from([env!("CARGO_PKG_NAME")])
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn sentiment_service_url(&self) -> &str {
        &self.sentiment_service_url
    }

    pub fn set_sentiment_service_url(mut self, url: impl Into<String>) -> Self {
        self.sentiment_service_url = url.into();
        self
    }

    pub fn youtube_api_base_url(&self) -> &str {
        &self.youtube_api_base_url
    }

    pub fn set_youtube_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.youtube_api_base_url = url.into();
        self
    }

    pub fn google_api_key(&self) -> Option<String> {
        self.google_api_key.clone()
    }

    pub fn set_google_api_key(mut self, key: Option<String>) -> Self {
        self.google_api_key = key;
        self
    }

    pub fn identity_issuer_url(&self) -> Option<String> {
        self.identity_issuer_url.clone()
    }

    pub fn identity_client_id(&self) -> Option<String> {
        self.identity_client_id.clone()
    }

    pub fn identity_client_secret(&self) -> Option<String> {
        self.identity_client_secret.clone()
    }

    /// Sets every identity provider setting at once, mostly for tests.
    pub fn set_identity_provider(
        mut self,
        issuer_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.identity_issuer_url = Some(issuer_url.into());
        self.identity_client_id = Some(client_id.into());
        self.identity_client_secret = Some(client_secret.into());
        self
    }

    pub fn identity_redirect_url(&self) -> &str {
        &self.identity_redirect_url
    }

    pub fn post_login_redirect_url(&self) -> &str {
        &self.post_login_redirect_url
    }

    pub fn post_logout_redirect_url(&self) -> &str {
        &self.post_logout_redirect_url
    }

    /// Returns the MailerSend API base URL.
    pub fn mailersend_base_url(&self) -> &str {
        &self.mailersend_base_url
    }

    /// Returns the MailerSend API key, if configured.
    pub fn mailersend_api_key(&self) -> Option<String> {
        self.mailersend_api_key.clone()
    }

    pub fn set_mailersend_api_key(mut self, key: Option<String>) -> Self {
        self.mailersend_api_key = key;
        self
    }

    /// Returns the sender address used for contact form email, if configured.
    pub fn contact_email_from(&self) -> Option<String> {
        self.contact_email_from.clone()
    }

    /// Returns the inbox receiving contact form email, if configured.
    pub fn contact_email_to(&self) -> Option<String> {
        self.contact_email_to.clone()
    }

    /// Points the contact relay at `base_url` with the given credentials and addresses.
    pub fn set_contact_relay(
        mut self,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.mailersend_base_url = base_url.into();
        self.mailersend_api_key = Some(api_key.into());
        self.contact_email_from = Some(from.into());
        self.contact_email_to = Some(to.into());
        self
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}
