use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use domain::route_access::{self, GuardDecision};
use domain::session::CurrentSession;
use log::*;

/// Sends anonymous visitors of private pages back to the home page.
///
/// Must run inside `resolve_session`; a request without a resolved session is
/// treated as anonymous.
pub(crate) async fn route_guard(request: Request, next: Next) -> Response {
    let anonymous = CurrentSession::anonymous();
    let session = request
        .extensions()
        .get::<CurrentSession>()
        .unwrap_or(&anonymous);

    let decision = route_access::evaluate(session, request.uri().path());

    match decision {
        GuardDecision::Proceed => next.run(request).await,
        GuardDecision::RedirectTo(location) => {
            debug!(
                "Redirecting anonymous request for {} to {location}",
                request.uri().path()
            );
            Redirect::temporary(location).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::session::{resolve_session, USER_KEY};
    use axum::{
        body::Body,
        http::{header, StatusCode},
        middleware::from_fn,
        routing::get,
        Router,
    };
    use domain::session::UserProfile;
    use time::Duration;
    use tower::ServiceExt;
    use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

    async fn page() -> &'static str {
        "page"
    }

    async fn sign_in(session: Session) -> StatusCode {
        let user = UserProfile {
            id: "kp_1".to_string(),
            email: Some("jane@example.com".to_string()),
            given_name: Some("Jane".to_string()),
            family_name: None,
            picture: None,
        };
        session.insert(USER_KEY, user).await.unwrap();
        StatusCode::OK
    }

    fn test_app() -> Router {
        let session_layer = SessionManagerLayer::new(MemoryStore::default())
            .with_secure(false)
            .with_expiry(Expiry::OnInactivity(Duration::days(1)));

        Router::new()
            .route("/", get(page))
            .route("/about", get(page))
            .route("/videos", get(page))
            .route("/results", get(page))
            .route("/sign-in", get(sign_in))
            .layer(from_fn(route_guard))
            .layer(from_fn(resolve_session))
            .layer(session_layer)
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_anonymous_private_request_redirects_home() {
        let response = test_app()
            .oneshot(get_request("/results?videoId=abc", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_anonymous_public_request_proceeds() {
        let response = test_app()
            .oneshot(get_request("/about", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signed_in_private_request_proceeds() {
        let app = test_app();
        let sign_in_response = app
            .clone()
            .oneshot(get_request("/sign-in", None))
            .await
            .unwrap();
        let set_cookie = sign_in_response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let response = app
            .oneshot(get_request("/videos", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
