//! Session store schema.
//!
//! # Invariants
//! - The schema version is stored in `PRAGMA user_version`; `0` means the
//!   file has never been initialized.
//! - A file stamped with a newer version is left untouched.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const SESSION_SCHEMA: &str = include_str!("0001_session.sql");
const SESSION_SCHEMA_VERSION: u32 = 1;

/// Returns the schema version written by this build.
pub fn latest_version() -> u32 {
    SESSION_SCHEMA_VERSION
}

/// Creates the session tables on a fresh file and stamps the version.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file was written by a
///   newer client.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    match found {
        SESSION_SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(SESSION_SCHEMA)?;
            tx.pragma_update(None, "user_version", SESSION_SCHEMA_VERSION)?;
            tx.commit()?;
            info!(
                "event=db_schema module=db status=ok version={SESSION_SCHEMA_VERSION}"
            );
            Ok(())
        }
        newer => Err(DbError::UnsupportedSchemaVersion {
            db_version: newer,
            latest_supported: SESSION_SCHEMA_VERSION,
        }),
    }
}
