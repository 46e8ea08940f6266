//! Schema of the SQLite key-value file.
//!
//! The applied step count lives in `PRAGMA user_version`. Steps only ever get
//! appended; pending ones run in a single transaction.

use super::{StorageError, StorageResult};
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("migrations/0001_kv_entries.sql")];

/// Schema version this build writes.
pub fn schema_version() -> u32 {
    STEPS.len() as u32
}

/// Reads the version stamped in the file; `0` for a fresh database.
pub fn stored_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings `conn` up to [`schema_version`], refusing files from newer builds.
pub fn ensure_schema(conn: &mut Connection) -> StorageResult<()> {
    let found = stored_version(conn)?;
    let supported = schema_version();
    if found > supported {
        return Err(StorageError::SchemaTooNew { found, supported });
    }

    let pending = &STEPS[found as usize..];
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for sql in pending {
        tx.execute_batch(sql)?;
    }
    tx.pragma_update(None, "user_version", supported)?;
    tx.commit()?;
    Ok(())
}
