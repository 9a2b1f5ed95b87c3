//! Typed inputs for the API endpoints.
//!
//! Every field is optional at the deserialization layer so that a missing value
//! reaches the controller and is rejected with the endpoint's own message
//! rather than a generic extractor rejection.

pub(crate) mod auth;
pub(crate) mod contact;
pub(crate) mod video;
pub(crate) mod youtube;

use domain::error::Error as DomainError;

/// Returns the value of a required parameter; absent and empty both count as missing.
fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, DomainError> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DomainError::invalid(message)),
    }
}
