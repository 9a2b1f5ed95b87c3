//! Sign-in through the external identity provider.
//!
//! Login and registration redirect the browser to the provider; the provider
//! redirects back to `callback`, which stores the user's profile in the
//! server-side session. Nothing here issues tokens of its own.

use crate::error::ErrorBody;
use crate::extractors::resolved_session::ResolvedSession;
use crate::middleware::session::{OAUTH_STATE_KEY, USER_KEY};
use crate::params::auth::CallbackParams;
use crate::{AppState, Result};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use domain::error::Error as DomainError;
use domain::gateway::identity::{self, AuthPrompt, IdentityClient};
use domain::session::UserProfile;
use log::*;
use serde::Serialize;
use tower_sessions::Session;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
}

/// GET whether the caller is signed in, and as whom
#[utoipa::path(
    get,
    path = "/api/auth/check",
    responses(
        (status = 200, description = "Authentication state of the caller", body = AuthStatus),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn check(ResolvedSession(session): ResolvedSession) -> impl IntoResponse {
    Json(AuthStatus {
        is_authenticated: session.is_authenticated(),
        user: session.user().cloned(),
    })
}

/// GET start signing in with the identity provider
#[utoipa::path(
    get,
    path = "/api/auth/login",
    responses(
        (status = 303, description = "Redirect to the provider's sign-in page"),
        (status = 500, description = "Identity provider not configured", body = ErrorBody),
    )
)]
pub async fn login(State(app_state): State<AppState>, session: Session) -> Result<Redirect> {
    begin_authorization(&app_state, &session, AuthPrompt::Login).await
}

/// GET start creating an account with the identity provider
#[utoipa::path(
    get,
    path = "/api/auth/register",
    responses(
        (status = 303, description = "Redirect to the provider's sign-up page"),
        (status = 500, description = "Identity provider not configured", body = ErrorBody),
    )
)]
pub async fn register(State(app_state): State<AppState>, session: Session) -> Result<Redirect> {
    begin_authorization(&app_state, &session, AuthPrompt::Register).await
}

async fn begin_authorization(
    app_state: &AppState,
    session: &Session,
    prompt: AuthPrompt,
) -> Result<Redirect> {
    let client = IdentityClient::from_config(&app_state.config)?;
    let state = IdentityClient::generate_state();
    session.insert(OAUTH_STATE_KEY, &state).await?;

    debug!("Starting {prompt:?} with the identity provider");
    Ok(Redirect::to(&client.authorization_url(&state, prompt)))
}

/// GET finish signing in after the identity provider redirects back
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    params(CallbackParams),
    responses(
        (status = 303, description = "Signed in; redirect to the post-login page"),
        (status = 400, description = "Missing code or mismatched state", body = ErrorBody),
        (status = 500, description = "Token exchange or profile lookup failed", body = ErrorBody),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect> {
    let expected_state: Option<String> = session.remove(OAUTH_STATE_KEY).await?;
    identity::verify_state(
        expected_state.as_deref(),
        params.state.as_deref().unwrap_or_default(),
    )?;
    let code = params
        .code
        .as_deref()
        .ok_or_else(|| DomainError::invalid("Authorization code is required"))?;

    let client = IdentityClient::from_config(&app_state.config)?;
    let user = client.complete_login(code).await?;

    // The pre-login session id must not survive into the signed-in session.
    session.cycle_id().await?;
    session.insert(USER_KEY, &user).await?;

    Ok(Redirect::to(app_state.config.post_login_redirect_url()))
}

/// GET sign out here and at the identity provider
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    responses(
        (status = 303, description = "Redirect to the provider's logout page"),
        (status = 500, description = "Session could not be cleared", body = ErrorBody),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn logout(State(app_state): State<AppState>, session: Session) -> Result<Redirect> {
    session.flush().await?;

    let return_to = app_state.config.post_logout_redirect_url();
    let location = match IdentityClient::from_config(&app_state.config) {
        Ok(client) => client.logout_url(return_to),
        Err(err) => {
            warn!("Signing out locally only: {err:?}");
            return_to.to_string()
        }
    };

    Ok(Redirect::to(&location))
}
