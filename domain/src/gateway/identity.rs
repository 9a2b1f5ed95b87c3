//! OAuth 2.0 identity provider client.
//!
//! Login, registration and logout are browser redirects to the provider. After
//! the provider sends the browser back with an authorization code, the code is
//! exchanged for an access token and the user's profile is fetched with it.

use crate::error::Error;
use crate::gateway::{build_client, endpoint, send_for_json};
use crate::session::UserProfile;
use log::*;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use service::config::Config;

const COLLABORATOR: &str = "identity provider";
const SCOPES: &str = "openid profile email";
const STATE_LENGTH: usize = 32;

/// Whether the authorization redirect should open the sign-in or the sign-up screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPrompt {
    Login,
    Register,
}

/// Endpoints of the provider, relative to its issuer URL.
#[derive(Debug, Clone)]
pub struct IdentityUrls {
    pub auth_url: String,
    pub token_url: String,
    pub user_profile_url: String,
    pub logout_url: String,
}

impl IdentityUrls {
    pub fn from_issuer(issuer_url: &str) -> Self {
        Self {
            auth_url: endpoint(issuer_url, "oauth2/auth"),
            token_url: endpoint(issuer_url, "oauth2/token"),
            user_profile_url: endpoint(issuer_url, "oauth2/v2/user_profile"),
            logout_url: endpoint(issuer_url, "logout"),
        }
    }
}

/// OAuth token response from the provider
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    grant_type: &'a str,
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
}

pub struct IdentityClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    urls: IdentityUrls,
}

impl IdentityClient {
    pub fn new(
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        urls: IdentityUrls,
    ) -> Result<Self, Error> {
        Ok(Self {
            client: build_client()?,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: redirect_uri.to_string(),
            urls,
        })
    }

    /// Builds a client from `config`, failing when the provider is not configured.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let (Some(issuer_url), Some(client_id), Some(client_secret)) = (
            config.identity_issuer_url(),
            config.identity_client_id(),
            config.identity_client_secret(),
        ) else {
            warn!("Identity provider issuer URL, client ID or client secret is not configured");
            return Err(Error::config("Identity provider is not configured"));
        };

        Self::new(
            &client_id,
            &client_secret,
            config.identity_redirect_url(),
            IdentityUrls::from_issuer(&issuer_url),
        )
    }

    /// Generates a random value for the OAuth `state` parameter.
    pub fn generate_state() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(STATE_LENGTH)
            .map(char::from)
            .collect()
    }

    /// URL the browser is sent to in order to sign in or sign up.
    pub fn authorization_url(&self, state: &str, prompt: AuthPrompt) -> String {
        let mut url = format!(
            "{}?\
            response_type=code&\
            client_id={}&\
            redirect_uri={}&\
            scope={}&\
            state={}",
            self.urls.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(SCOPES),
            urlencoding::encode(state)
        );
        if prompt == AuthPrompt::Register {
            url.push_str("&prompt=create");
        }
        url
    }

    /// URL that ends the provider session and then returns the browser to `redirect`.
    pub fn logout_url(&self, redirect: &str) -> String {
        format!(
            "{}?redirect={}",
            self.urls.logout_url,
            urlencoding::encode(redirect)
        )
    }

    /// Exchange authorization code for an access token
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        let form = TokenExchangeRequest {
            grant_type: "authorization_code",
            code,
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            redirect_uri: &self.redirect_uri,
        };

        debug!("Exchanging authorization code for tokens");
        let request = self.client.post(&self.urls.token_url).form(&form);
        let tokens: TokenResponse = send_for_json(request, COLLABORATOR).await?;
        info!("Successfully exchanged authorization code for tokens");
        Ok(tokens)
    }

    /// Fetches the signed-in user's profile.
    pub async fn fetch_user_profile(&self, access_token: &str) -> Result<UserProfile, Error> {
        let request = self
            .client
            .get(&self.urls.user_profile_url)
            .bearer_auth(access_token);
        send_for_json(request, COLLABORATOR).await
    }

    /// Completes a login: exchanges `code` and returns the user it belongs to.
    pub async fn complete_login(&self, code: &str) -> Result<UserProfile, Error> {
        let tokens = self.exchange_code(code).await?;
        let profile = self.fetch_user_profile(&tokens.access_token).await?;
        info!("User {} signed in", profile.id);
        Ok(profile)
    }
}

/// Checks the `state` returned by the provider against the one issued for this session.
pub fn verify_state(expected: Option<&str>, returned: &str) -> Result<(), Error> {
    match expected {
        Some(expected) if expected == returned => Ok(()),
        Some(_) => {
            warn!("OAuth state mismatch on callback");
            Err(Error::invalid("Invalid login state"))
        }
        None => {
            warn!("OAuth callback received without a pending login");
            Err(Error::invalid("No login in progress"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainErrorKind;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(server_url: &str) -> IdentityClient {
        IdentityClient::new(
            "client_123",
            "secret_456",
            "http://localhost:4000/api/auth/callback",
            IdentityUrls::from_issuer(server_url),
        )
        .unwrap()
    }

    #[test]
    fn test_authorization_url_contains_encoded_parameters() {
        let client = client_for("https://example.kinde.com");
        let url = client.authorization_url("abc", AuthPrompt::Login);

        assert!(url.starts_with("https://example.kinde.com/oauth2/auth?"));
        assert!(url.contains("client_id=client_123"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A4000%2Fapi%2Fauth%2Fcallback"));
        assert!(url.contains("scope=openid%20profile%20email"));
        assert!(url.contains("state=abc"));
        assert!(!url.contains("prompt=create"));
    }

    #[test]
    fn test_register_prompt_requests_sign_up() {
        let client = client_for("https://example.kinde.com");
        assert!(client
            .authorization_url("abc", AuthPrompt::Register)
            .ends_with("&prompt=create"));
    }

    #[test]
    fn test_logout_url_encodes_redirect() {
        let client = client_for("https://example.kinde.com/");
        assert_eq!(
            client.logout_url("http://localhost:4000/"),
            "https://example.kinde.com/logout?redirect=http%3A%2F%2Flocalhost%3A4000%2F"
        );
    }

    #[test]
    fn test_generate_state_is_random_alphanumeric() {
        let first = IdentityClient::generate_state();
        let second = IdentityClient::generate_state();

        assert_eq!(first.len(), STATE_LENGTH);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_state() {
        assert!(verify_state(Some("abc"), "abc").is_ok());

        let mismatch = verify_state(Some("abc"), "xyz").unwrap_err();
        assert!(matches!(
            mismatch.error_kind,
            DomainErrorKind::Internal(ref kind) if kind.is_invalid()
        ));
        assert!(verify_state(None, "abc").is_err());
    }

    #[tokio::test]
    async fn test_complete_login_exchanges_code_and_fetches_profile() {
        let mut server = Server::new_async().await;
        let token_mock = server
            .mock("POST", "/oauth2/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("code".into(), "code_789".into()),
                Matcher::UrlEncoded("client_id".into(), "client_123".into()),
            ]))
            .with_status(200)
            .with_body(json!({"access_token": "token_abc", "token_type": "bearer"}).to_string())
            .create_async()
            .await;
        let profile_mock = server
            .mock("GET", "/oauth2/v2/user_profile")
            .match_header("authorization", "Bearer token_abc")
            .with_status(200)
            .with_body(
                json!({
                    "id": "kp_1",
                    "email": "jane@example.com",
                    "given_name": "Jane",
                    "family_name": "Doe",
                    "picture": "https://example.com/jane.png"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server.url());
        let profile = client.complete_login("code_789").await.unwrap();

        token_mock.assert_async().await;
        profile_mock.assert_async().await;
        assert_eq!(profile.id, "kp_1");
        assert_eq!(profile.picture.as_deref(), Some("https://example.com/jane.png"));
    }

    #[tokio::test]
    async fn test_rejected_code_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth2/token")
            .with_status(400)
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        assert!(client.complete_login("stale").await.is_err());
    }

    #[test]
    fn test_from_config_with_provider_settings() {
        let configured =
            Config::default().set_identity_provider("https://example.kinde.com", "id", "secret");
        assert!(IdentityClient::from_config(&configured).is_ok());
    }
}
