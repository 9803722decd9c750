//! Client use-case services.
//!
//! # Responsibility
//! - Orchestrate API calls, local state and the rich-text codec into
//!   page-level operations.
//! - Keep the CLI decoupled from HTTP details.
//!
//! # Invariants
//! - Owner-side operations without a session fail with
//!   `ServiceError::NotAuthenticated` before any network call.
//! - Validation failures are reported before any network call.

pub mod account_service;
pub mod blog_service;
pub mod contact_service;
pub mod like_service;
pub mod portfolio_editor;
pub mod profile_page;

use crate::api::ApiError;
use crate::model::portfolio::RecordId;
use crate::session::Session;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    NotAuthenticated,
    /// A form field failed local validation.
    Validation {
        field: &'static str,
        message: String,
    },
    NotFound {
        kind: &'static str,
        id: RecordId,
    },
    Api(ApiError),
}

impl ServiceError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "you must be logged in to do that"),
            Self::Validation { field, message } => write!(f, "{field}: {message}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Api(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            Self::NotAuthenticated | Self::Validation { .. } | Self::NotFound { .. } => None,
        }
    }
}

impl From<ApiError> for ServiceError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

/// Returns the session or `NotAuthenticated`.
pub(crate) fn require_session(session: Option<&Session>) -> ServiceResult<&Session> {
    session.ok_or(ServiceError::NotAuthenticated)
}

pub(crate) fn require_text(field: &'static str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(field, "must not be blank"));
    }
    Ok(())
}

/// Requires a `local@domain` address without whitespace.
pub(crate) fn require_email(field: &'static str, value: &str) -> ServiceResult<()> {
    require_text(field, value)?;
    let email = value.trim();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        })
        && !email.contains(char::is_whitespace);
    if !valid {
        return Err(ServiceError::validation(field, "is not a valid address"));
    }
    Ok(())
}

/// Maps a 404 from the API onto `ServiceError::NotFound`.
pub(crate) fn not_found_as(kind: &'static str, id: RecordId) -> impl FnOnce(ApiError) -> ServiceError {
    move |err| {
        if err.is_not_found() {
            ServiceError::NotFound { kind, id }
        } else {
            ServiceError::Api(err)
        }
    }
}
