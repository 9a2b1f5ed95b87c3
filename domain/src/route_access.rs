//! Which page paths require a signed-in user.
//!
//! Paths are matched by prefix, so `/results?videoId=...` falls under `/result`.

use crate::session::CurrentSession;

/// Where anonymous visitors are sent when they ask for a private page.
pub const HOME_PATH: &str = "/";

pub const PRIVATE_ROUTES: &[&str] = &["/result", "/select", "/videos"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    RedirectTo(&'static str),
}

/// Classifies `path`: private when it starts with a private prefix, public otherwise.
pub fn classify(path: &str) -> RouteAccess {
    if PRIVATE_ROUTES.iter().any(|route| path.starts_with(route)) {
        RouteAccess::Private
    } else {
        RouteAccess::Public
    }
}

/// Decides whether a request for `path` made within `session` may proceed.
pub fn evaluate(session: &CurrentSession, path: &str) -> GuardDecision {
    match classify(path) {
        RouteAccess::Private if !session.is_authenticated() => GuardDecision::RedirectTo(HOME_PATH),
        _ => GuardDecision::Proceed,
    }
}
