use serde::Deserialize;
use utoipa::ToSchema;

/// Body of a contact form submission
#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct ContactParams {
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) message: Option<String>,
}
