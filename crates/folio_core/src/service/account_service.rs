//! Owner account settings.
//!
//! # Responsibility
//! - Edit the public owner card (username, bio, social links, picture)
//!   together with the private email.
//! - Change the account password.
//!
//! # Invariants
//! - The server replaces the whole card, so every update carries all
//!   fields; forms are prefilled from the current public card.
//! - Social links and the picture URL must be safe to emit as `href`/`src`.

use super::{require_email, require_session, require_text, ServiceError, ServiceResult};
use crate::api::UserApi;
use crate::codec::html::safe_href;
use crate::model::account::{PasswordChange, ProfileUpdate};
use crate::model::portfolio::PublicUser;
use crate::session::Session;
use log::{info, warn};

pub const PASSWORD_CHANGED_MESSAGE: &str = "Password changed successfully";

/// Editable owner card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountForm {
    pub username: String,
    pub email: String,
    pub bio: String,
    pub social_links: Vec<String>,
    pub profile_picture_url: String,
}

impl AccountForm {
    /// Prefills from the public card. Email is private and starts empty.
    pub fn from_public_user(user: &PublicUser) -> Self {
        Self {
            username: user.username.clone(),
            email: String::new(),
            bio: user.bio.clone(),
            social_links: user.social_links().into_iter().map(str::to_string).collect(),
            profile_picture_url: user.profile_picture_url.clone(),
        }
    }

    pub fn validate(&self) -> ServiceResult<()> {
        require_text("username", &self.username)?;
        require_email("email", &self.email)?;
        for link in self.links() {
            if link.contains(',') || safe_href(link).is_none() {
                return Err(ServiceError::validation(
                    "social_links",
                    format!("`{link}` is not a usable URL"),
                ));
            }
        }
        let picture = self.profile_picture_url.trim();
        if !picture.is_empty() && safe_href(picture).is_none() {
            return Err(ServiceError::validation(
                "profile_picture_url",
                "is not a usable URL",
            ));
        }
        Ok(())
    }

    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            bio: self.bio.trim().to_string(),
            social_media_links: self.links().collect::<Vec<_>>().join(","),
            profile_picture_url: self.profile_picture_url.trim().to_string(),
        }
    }

    fn links(&self) -> impl Iterator<Item = &str> {
        self.social_links
            .iter()
            .map(|link| link.trim())
            .filter(|link| !link.is_empty())
    }
}

/// Result of a profile update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountUpdated {
    /// The stored token still names the old username until the next login.
    pub username_changed: bool,
}

pub struct AccountService<U: UserApi> {
    api: U,
}

impl<U: UserApi> AccountService<U> {
    pub fn new(api: U) -> Self {
        Self { api }
    }

    pub async fn update_profile(
        &self,
        session: Option<&Session>,
        form: &AccountForm,
    ) -> ServiceResult<AccountUpdated> {
        let session = require_session(session)?;
        form.validate()?;
        let update = form.to_update();
        self.api.update_user(session.token(), &update).await?;

        let username_changed = update.username != session.identity().username;
        if username_changed {
            warn!("event=account_update module=account status=ok username_changed=true");
        } else {
            info!("event=account_update module=account status=ok");
        }
        Ok(AccountUpdated { username_changed })
    }

    /// Changes the password. A 401 means the old password was rejected.
    pub async fn change_password(
        &self,
        session: Option<&Session>,
        old_password: &str,
        new_password: &str,
    ) -> ServiceResult<()> {
        let session = require_session(session)?;
        require_text("old_password", old_password)?;
        require_text("new_password", new_password)?;
        if old_password == new_password {
            return Err(ServiceError::validation(
                "new_password",
                "must differ from the old password",
            ));
        }

        let change = PasswordChange {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        match self.api.change_password(session.token(), &change).await {
            Ok(()) => {
                info!("event=password_change module=account status=ok");
                Ok(())
            }
            Err(err) if err.is_unauthorized() => {
                warn!("event=password_change module=account status=rejected");
                Err(ServiceError::validation("old_password", "does not match"))
            }
            Err(err) => Err(err.into()),
        }
    }
}
