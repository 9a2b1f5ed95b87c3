use crate::extractors::RejectionType;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use domain::session::CurrentSession;
use log::*;

/// The `CurrentSession` resolved by the session middleware for this request.
pub(crate) struct ResolvedSession(pub CurrentSession);

impl<S> FromRequestParts<S> for ResolvedSession
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentSession>() {
            Some(session) => Ok(ResolvedSession(session.clone())),
            None => {
                error!("No resolved session on request; is the session middleware installed?");
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                ))
            }
        }
    }
}
