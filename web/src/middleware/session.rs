use axum::{extract::Request, middleware::Next, response::Response};
use domain::session::{CurrentSession, UserProfile};
use log::*;
use tower_sessions::Session;

/// Session key holding the signed-in user's profile.
pub(crate) const USER_KEY: &str = "user";

/// Session key holding the OAuth `state` of a login in progress.
pub(crate) const OAUTH_STATE_KEY: &str = "oauth_state";

/// Resolves who is making the request once and stores the answer as a
/// `CurrentSession` request extension for the guard and the handlers to share.
///
/// A session store failure is logged and treated as an anonymous request.
pub(crate) async fn resolve_session(session: Session, mut request: Request, next: Next) -> Response {
    let user = session
        .get::<UserProfile>(USER_KEY)
        .await
        .unwrap_or_else(|err| {
            warn!("Failed to read user from session: {err:?}");
            None
        });

    trace!(
        "Resolved session for {}: authenticated = {}",
        request.uri().path(),
        user.is_some()
    );
    request.extensions_mut().insert(CurrentSession::from(user));

    next.run(request).await
}
