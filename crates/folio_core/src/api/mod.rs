//! Remote API contracts.
//!
//! # Responsibility
//! - Describe every endpoint the client consumes as a narrow async trait,
//!   so services depend only on the calls they make.
//! - Provide the shared error taxonomy for remote calls.
//!
//! # Invariants
//! - Bearer tokens are passed per call; implementations never cache them.
//! - Every non-2xx response maps to `ApiError::Status`.

mod http;

pub use http::{HttpApiClient, REQUEST_ID_HEADER};

use crate::model::account::{PasswordChange, ProfileUpdate};
use crate::model::contact::ContactMessage;
use crate::model::portfolio::{
    Achievement, AchievementDraft, Portfolio, PortfolioUpdate, Project, ProjectDraft, RecordId,
};
use crate::model::post::{Post, PostDraft};
use async_trait::async_trait;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// Connection, TLS or timeout failure before a status was received.
    Transport(reqwest::Error),
    /// Server answered with a non-success status.
    Status { status: u16, message: String },
    /// Success response whose body could not be decoded.
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "request failed: {err}"),
            Self::Status { status, message } if message.is_empty() => {
                write!(f, "server responded with status {status}")
            }
            Self::Status { status, message } => {
                write!(f, "server responded with status {status}: {message}")
            }
            Self::Decode(message) => write!(f, "malformed response: {message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status { .. } | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value)
        }
    }
}

/// Body of `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> ApiResult<String>;
    async fn register(&self, registration: &Registration) -> ApiResult<()>;
}

#[async_trait]
pub trait PortfolioApi: Send + Sync {
    /// Fetches a public portfolio. With a token, like fields are scoped to
    /// that identity.
    async fn fetch_portfolio(&self, username: &str, token: Option<&str>) -> ApiResult<Portfolio>;
    async fn update_portfolio(&self, token: &str, update: &PortfolioUpdate)
        -> ApiResult<Portfolio>;
    async fn create_project(&self, token: &str, draft: &ProjectDraft) -> ApiResult<Project>;
    async fn update_project(
        &self,
        token: &str,
        id: RecordId,
        draft: &ProjectDraft,
    ) -> ApiResult<Project>;
    async fn delete_project(&self, token: &str, id: RecordId) -> ApiResult<()>;
    async fn create_achievement(
        &self,
        token: &str,
        draft: &AchievementDraft,
    ) -> ApiResult<Achievement>;
    async fn update_achievement(
        &self,
        token: &str,
        id: RecordId,
        draft: &AchievementDraft,
    ) -> ApiResult<Achievement>;
    async fn delete_achievement(&self, token: &str, id: RecordId) -> ApiResult<()>;
    /// Uploads an image and returns its public URL.
    async fn upload_image(&self, token: &str, file_name: &str, bytes: Vec<u8>)
        -> ApiResult<String>;
}

#[async_trait]
pub trait LikeApi: Send + Sync {
    async fn like_project(&self, token: &str, project_id: RecordId) -> ApiResult<()>;
    async fn unlike_project(&self, token: &str, project_id: RecordId) -> ApiResult<()>;
}

#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn list_posts(&self) -> ApiResult<Vec<Post>>;
    async fn get_post(&self, id: RecordId) -> ApiResult<Post>;
    async fn create_post(&self, token: &str, draft: &PostDraft) -> ApiResult<Post>;
    async fn update_post(&self, token: &str, id: RecordId, draft: &PostDraft) -> ApiResult<Post>;
    async fn delete_post(&self, token: &str, id: RecordId) -> ApiResult<()>;
}

#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn send_contact(&self, message: &ContactMessage) -> ApiResult<()>;
}

/// Owner account settings.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn update_user(&self, token: &str, update: &ProfileUpdate) -> ApiResult<()>;
    /// Fails with 401 when `old_password` does not match.
    async fn change_password(&self, token: &str, change: &PasswordChange) -> ApiResult<()>;
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn status_errors_expose_code() {
        let err = ApiError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "server responded with status 401: Unauthorized"
        );
    }

    #[test]
    fn empty_status_message_is_omitted() {
        let err = ApiError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "server responded with status 500");
        assert_eq!(ApiError::Decode("x".to_string()).status(), None);
    }
}
