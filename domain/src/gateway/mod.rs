//! HTTP clients for the collaborators this application delegates to.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use log::*;
use serde::de::DeserializeOwned;

pub mod identity;
pub mod mailersend;
pub mod sentiment;
pub mod youtube;

/// Sends `request` and decodes a JSON body from a successful response.
///
/// Network failures, non-success statuses and undecodable bodies are all
/// logged against `collaborator` and returned as external errors.
pub(crate) async fn send_for_json<T>(
    request: reqwest::RequestBuilder,
    collaborator: &str,
) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let response = request.send().await.map_err(|e| {
        warn!("Request to {collaborator} failed: {e:?}");
        Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        warn!("{collaborator} responded with status {status}: {error_text}");
        return Err(Error::upstream(status.as_u16()));
    }

    response.json::<T>().await.map_err(|e| {
        warn!("Failed to parse {collaborator} response: {e:?}");
        Error::malformed_response(e, collaborator)
    })
}

pub(crate) fn build_client() -> Result<reqwest::Client, Error> {
    Ok(reqwest::Client::builder().use_rustls_tls().build()?)
}

/// Joins `base_url` and `path` without doubling or dropping the separating slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_with_single_slash() {
        assert_eq!(
            endpoint("http://127.0.0.1:5000/", "/sentiment"),
            "http://127.0.0.1:5000/sentiment"
        );
        assert_eq!(endpoint("https://api.test/v1", "email"), "https://api.test/v1/email");
    }
}
