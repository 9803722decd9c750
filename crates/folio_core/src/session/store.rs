//! Token persistence contracts and SQLite implementation.

use super::SessionResult;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::time::{SystemTime, UNIX_EPOCH};

/// Storage for the current bearer token.
pub trait TokenStore {
    fn load_token(&self) -> SessionResult<Option<String>>;
    fn save_token(&self, token: &str) -> SessionResult<()>;
    fn clear_token(&self) -> SessionResult<()>;
}

/// SQLite-backed token store, one row per API base URL.
pub struct SqliteTokenStore<'conn> {
    conn: &'conn Connection,
    api_base_url: String,
}

impl<'conn> SqliteTokenStore<'conn> {
    pub fn new(conn: &'conn Connection, api_base_url: impl Into<String>) -> Self {
        Self {
            conn,
            api_base_url: api_base_url.into(),
        }
    }
}

impl TokenStore for SqliteTokenStore<'_> {
    fn load_token(&self) -> SessionResult<Option<String>> {
        let token = self
            .conn
            .query_row(
                "SELECT token FROM session_tokens WHERE api_base_url = ?1;",
                params![self.api_base_url.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(token)
    }

    fn save_token(&self, token: &str) -> SessionResult<()> {
        self.conn.execute(
            "INSERT INTO session_tokens (api_base_url, token, saved_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(api_base_url) DO UPDATE SET
                token = excluded.token,
                saved_at = excluded.saved_at;",
            params![self.api_base_url.as_str(), token, now_epoch_ms()],
        )?;
        debug!("event=token_save module=session status=ok");
        Ok(())
    }

    fn clear_token(&self) -> SessionResult<()> {
        self.conn.execute(
            "DELETE FROM session_tokens WHERE api_base_url = ?1;",
            params![self.api_base_url.as_str()],
        )?;
        debug!("event=token_clear module=session status=ok");
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
