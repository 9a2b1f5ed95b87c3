use serde::Deserialize;
use utoipa::IntoParams;

/// Query string the identity provider appends when redirecting back.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct CallbackParams {
    pub(crate) code: Option<String>,
    pub(crate) state: Option<String>,
}
