pub(crate) mod resolved_session;

use axum::http::StatusCode;

type RejectionType = (StatusCode, String);
