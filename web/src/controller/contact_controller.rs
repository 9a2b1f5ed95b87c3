use crate::params::contact::ContactParams;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::contact::{self, ContactMessage};
use domain::error::{DomainErrorKind, InternalErrorKind};
use log::*;
use serde::Serialize;
use utoipa::ToSchema;

const SENT_MESSAGE: &str = "Your message was sent successfully!";
const FAILED_MESSAGE: &str = "Failed to send your message. Please try again later.";

/// Outcome shown beneath the contact form
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub message: String,
}

fn reply(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ContactResponse>) {
    (
        status,
        Json(ContactResponse {
            message: message.into(),
        }),
    )
}

/// POST forward a contact form submission to the site owner
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactParams,
    responses(
        (status = 200, description = "Message relayed", body = ContactResponse),
        (status = 400, description = "A field is missing or the email is malformed", body = ContactResponse),
        (status = 500, description = "The mail relay failed", body = ContactResponse),
    )
)]
pub async fn send(
    State(app_state): State<AppState>,
    body: Result<Json<ContactParams>, JsonRejection>,
) -> impl IntoResponse {
    let params = match body {
        Ok(Json(params)) => params,
        Err(rejection) => {
            debug!("Unreadable contact form body: {rejection}");
            ContactParams::default()
        }
    };

    let message = match ContactMessage::new(
        params.name.as_deref(),
        params.email.as_deref(),
        params.message.as_deref(),
    ) {
        Ok(message) => message,
        Err(err) => {
            let text = match err.error_kind {
                DomainErrorKind::Internal(InternalErrorKind::Invalid(text)) => text,
                _ => contact::MISSING_FIELDS_MESSAGE.to_string(),
            };
            return reply(StatusCode::BAD_REQUEST, text);
        }
    };

    match contact::send_contact_message(&app_state.config, &message).await {
        Ok(()) => reply(StatusCode::OK, SENT_MESSAGE),
        Err(err) => {
            error!("Error sending contact message: {err:?}");
            reply(StatusCode::INTERNAL_SERVER_ERROR, FAILED_MESSAGE)
        }
    }
}
