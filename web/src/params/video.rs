use super::required;
use domain::error::Error as DomainError;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct VideoParams {
    /// YouTube video id
    #[serde(rename = "videoId")]
    pub(crate) video_id: Option<String>,
}

impl VideoParams {
    pub(crate) fn video_id(&self) -> Result<&str, DomainError> {
        required(&self.video_id, "Video ID parameter is required")
    }
}
