//! Who is making the current request.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Profile of a signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    /// Avatar URL shown in the navigation bar
    #[serde(default)]
    pub picture: Option<String>,
}

/// Authentication state resolved once per request and handed to everything
/// that needs it, so the route guard and the handlers always agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentSession {
    user: Option<UserProfile>,
}

impl CurrentSession {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: UserProfile) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}

impl From<Option<UserProfile>> for CurrentSession {
    fn from(user: Option<UserProfile>) -> Self {
        Self { user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_tolerates_missing_optional_fields() {
        let profile: UserProfile = serde_json::from_str(r#"{"id": "kp_1"}"#).unwrap();
        assert_eq!(profile.id, "kp_1");
        assert!(profile.picture.is_none());
    }

    #[test]
    fn test_session_state() {
        assert!(!CurrentSession::anonymous().is_authenticated());

        let profile: UserProfile =
            serde_json::from_str(r#"{"id": "kp_1", "given_name": "Jane"}"#).unwrap();
        let session = CurrentSession::from(Some(profile));
        assert!(session.is_authenticated());
        assert_eq!(
            session.user().and_then(|u| u.given_name.as_deref()),
            Some("Jane")
        );
    }
}
