//! Client configuration loaded from the environment.
//!
//! # Responsibility
//! - Resolve the API base URL, local data directory, log level and HTTP
//!   timeout, applying defaults for anything unset.
//!
//! # Invariants
//! - `api_base_url` starts with `http://` or `https://` and has no trailing
//!   slash.
//! - `data_dir` is absolute.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const API_URL_VAR: &str = "FOLIO_API_URL";
pub const DATA_DIR_VAR: &str = "FOLIO_DATA_DIR";
pub const LOG_LEVEL_VAR: &str = "FOLIO_LOG_LEVEL";
pub const HTTP_TIMEOUT_VAR: &str = "FOLIO_HTTP_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const SESSION_DB_FILE: &str = "session.sqlite3";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    /// No `FOLIO_DATA_DIR` and no platform data directory.
    MissingDataDir,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid {key} `{value}`: {reason}")
            }
            Self::MissingDataDir => write!(
                f,
                "no platform data directory found; set {DATA_DIR_VAR} to an absolute path"
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub data_dir: PathBuf,
    pub log_level: &'static str,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_base_url = match read(API_URL_VAR) {
            Some(value) => parse_base_url(&value)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let data_dir = match read(DATA_DIR_VAR) {
            Some(value) => {
                let path = PathBuf::from(value.trim());
                if !path.is_absolute() {
                    return Err(ConfigError::InvalidValue {
                        key: DATA_DIR_VAR,
                        value,
                        reason: "must be an absolute path".to_string(),
                    });
                }
                path
            }
            None => dirs::data_dir()
                .map(|dir| dir.join("folio"))
                .ok_or(ConfigError::MissingDataDir)?,
        };

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(value) => normalize_level(&value).map_err(|reason| ConfigError::InvalidValue {
                key: LOG_LEVEL_VAR,
                value: value.clone(),
                reason,
            })?,
            None => default_log_level(),
        };

        let timeout_secs = match read(HTTP_TIMEOUT_VAR) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: HTTP_TIMEOUT_VAR,
                        value,
                        reason: "expected a positive number of seconds".to_string(),
                    })
                }
            },
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url,
            data_dir,
            log_level,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn session_db_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_DB_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

fn parse_base_url(value: &str) -> ConfigResult<String> {
    let trimmed = value.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.is_empty());
    if !has_scheme || !has_host {
        return Err(ConfigError::InvalidValue {
            key: API_URL_VAR,
            value: value.to_string(),
            reason: "expected an http:// or https:// URL".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError, API_URL_VAR, DATA_DIR_VAR, HTTP_TIMEOUT_VAR};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn load(pairs: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn absolute_dir() -> String {
        std::env::temp_dir().join("folio-config").display().to_string()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let dir = absolute_dir();
        let config = load(&[(DATA_DIR_VAR, dir.as_str())]).expect("config should load");
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(
            config.session_db_path(),
            PathBuf::from(&dir).join("session.sqlite3")
        );
    }

    #[test]
    fn base_url_is_trimmed_and_validated() {
        let dir = absolute_dir();
        let config = load(&[
            (DATA_DIR_VAR, dir.as_str()),
            (API_URL_VAR, " https://api.example.com/ "),
        ])
        .expect("config should load");
        assert_eq!(config.api_base_url, "https://api.example.com");

        let err = load(&[(DATA_DIR_VAR, dir.as_str()), (API_URL_VAR, "ftp://x")])
            .expect_err("non-http scheme must fail");
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == API_URL_VAR));
    }

    #[test]
    fn relative_data_dir_and_zero_timeout_are_rejected() {
        assert!(load(&[(DATA_DIR_VAR, "relative/dir")]).is_err());

        let dir = absolute_dir();
        let err = load(&[(DATA_DIR_VAR, dir.as_str()), (HTTP_TIMEOUT_VAR, "0")])
            .expect_err("zero timeout must fail");
        assert!(err.to_string().contains(HTTP_TIMEOUT_VAR));
    }
}
