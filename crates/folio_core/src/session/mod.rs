//! Explicit authentication context.
//!
//! # Responsibility
//! - Hold the current bearer token and the identity decoded from it.
//! - Persist the token across process restarts through a `TokenStore`.
//!
//! # Invariants
//! - `AuthContext::session()` is `Some` only for a token whose claims
//!   decoded successfully.
//! - A stored token that no longer decodes is removed during `init`.
//! - Tokens and passwords are never logged.

mod store;
mod token;

pub use store::{SqliteTokenStore, TokenStore};
pub use token::{decode_identity, Identity};

#[cfg(test)]
pub(crate) use token::fake_token;

use crate::api::{ApiError, AuthApi, Registration};
use crate::db::DbError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    Store(DbError),
    Api(ApiError),
    InvalidToken(String),
    /// A required credential field was blank.
    MissingField(&'static str),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "session store error: {err}"),
            Self::Api(err) => write!(f, "{err}"),
            Self::InvalidToken(reason) => write!(f, "invalid token: {reason}"),
            Self::MissingField(field) => write!(f, "{field} is required"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Api(err) => Some(err),
            Self::InvalidToken(_) | Self::MissingField(_) => None,
        }
    }
}

impl From<DbError> for SessionError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for SessionError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(DbError::Sqlite(value))
    }
}

impl From<ApiError> for SessionError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

/// A bearer token together with its decoded identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    identity: Identity,
}

impl Session {
    /// Decodes `token` into a session.
    pub fn from_token(token: impl Into<String>) -> SessionResult<Self> {
        let token = token.into();
        let identity = decode_identity(&token)?;
        Ok(Self { token, identity })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

/// Authentication state owned by one client instance.
pub struct AuthContext<S: TokenStore> {
    store: S,
    session: Option<Session>,
}

impl<S: TokenStore> AuthContext<S> {
    /// Restores the persisted session, if any.
    pub fn init(store: S) -> SessionResult<Self> {
        let session = match store.load_token()? {
            Some(token) => match Session::from_token(token) {
                Ok(session) => {
                    info!(
                        "event=session_restore module=session status=ok user_id={}",
                        session.identity.user_id
                    );
                    Some(session)
                }
                Err(err) => {
                    warn!(
                        "event=session_restore module=session status=error error_code=invalid_token error={err}"
                    );
                    store.clear_token()?;
                    None
                }
            },
            None => None,
        };
        Ok(Self { store, session })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.as_ref().map(Session::identity)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Exchanges credentials for a token, persists it and adopts it.
    ///
    /// On failure the previous session (if any) is kept.
    pub async fn login<A>(&mut self, api: &A, username: &str, password: &str) -> SessionResult<&Identity>
    where
        A: AuthApi + ?Sized,
    {
        require("username", username)?;
        require("password", password)?;

        let token = match api.login(username.trim(), password).await {
            Ok(token) => token,
            Err(err) => {
                warn!(
                    "event=login module=session status=error http_status={}",
                    err.status().unwrap_or(0)
                );
                return Err(err.into());
            }
        };
        let session = Session::from_token(token)?;
        self.store.save_token(session.token())?;
        info!(
            "event=login module=session status=ok user_id={}",
            session.identity.user_id
        );
        Ok(&self.session.insert(session).identity)
    }

    /// Creates an account. Does not sign in.
    pub async fn register<A>(&self, api: &A, registration: &Registration) -> SessionResult<()>
    where
        A: AuthApi + ?Sized,
    {
        require("username", &registration.username)?;
        require("email", &registration.email)?;
        require("password", &registration.password)?;
        api.register(registration).await?;
        info!("event=register module=session status=ok");
        Ok(())
    }

    /// Forgets the session in memory and in the store.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.store.clear_token()?;
        if self.session.take().is_some() {
            info!("event=logout module=session status=ok");
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> SessionResult<()> {
    if value.trim().is_empty() {
        return Err(SessionError::MissingField(field));
    }
    Ok(())
}
