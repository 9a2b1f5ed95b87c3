use super::required;
use domain::error::Error as DomainError;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct SearchParams {
    /// Free-text channel search
    pub(crate) q: Option<String>,
}

impl SearchParams {
    pub(crate) fn query(&self) -> Result<&str, DomainError> {
        required(&self.q, "Query parameter is required")
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct VideoSearchParams {
    #[serde(rename = "channelId")]
    pub(crate) channel_id: Option<String>,
    /// `nextPageToken` from the previous page
    #[serde(rename = "pageToken")]
    pub(crate) page_token: Option<String>,
}

impl VideoSearchParams {
    pub(crate) fn channel_id(&self) -> Result<&str, DomainError> {
        required(&self.channel_id, "Channel ID parameter is required")
    }

    pub(crate) fn page_token(&self) -> Option<&str> {
        self.page_token.as_deref().filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_token_means_first_page() {
        let params = VideoSearchParams {
            channel_id: Some("UC123".to_string()),
            page_token: Some(String::new()),
        };
        assert_eq!(params.channel_id().unwrap(), "UC123");
        assert_eq!(params.page_token(), None);
    }

    #[test]
    fn test_missing_query_is_rejected() {
        assert!(SearchParams::default().query().is_err());
        assert!(VideoSearchParams::default().channel_id().is_err());
    }
}
