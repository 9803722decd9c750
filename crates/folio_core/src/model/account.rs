//! Owner account records.

use serde::Serialize;

/// Body of `PUT /api/auth/user`. The server replaces every field, so
/// callers send the full card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Bio")]
    pub bio: String,
    /// Comma-separated URLs.
    #[serde(rename = "SocialMediaLinks")]
    pub social_media_links: String,
    #[serde(rename = "ProfilePictureURL")]
    pub profile_picture_url: String,
}

/// Body of `PUT /api/auth/user/password`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{PasswordChange, ProfileUpdate};

    #[test]
    fn profile_update_uses_server_field_names() {
        let update = ProfileUpdate {
            username: "ada".to_string(),
            social_media_links: "https://a.example".to_string(),
            ..ProfileUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["Username"], "ada");
        assert_eq!(json["SocialMediaLinks"], "https://a.example");
        assert_eq!(json["ProfilePictureURL"], "");
    }

    #[test]
    fn password_change_debug_hides_secrets() {
        let change = PasswordChange {
            old_password: "old-secret".to_string(),
            new_password: "new-secret".to_string(),
        };
        let debug = format!("{change:?}");
        assert!(!debug.contains("secret"));
        assert_eq!(
            serde_json::to_value(&change).unwrap()["new_password"],
            "new-secret"
        );
    }
}
