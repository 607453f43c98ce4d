//! SQLite-backed store behind the gateway.
//!
//! One connection is shared behind a mutex, so statements run one at a time.
//! The store holds the `kvdata` table used by the KV endpoints; everything
//! else in the database is whatever clients create through `/sql/exec`.

mod errors;
mod kv;
mod sql;
mod value;

pub use errors::{StoreError, StoreResult};
pub use value::column_value;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::Connection;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const KV_SCHEMA: &str = "
create table if not exists kvdata (
    id integer not null primary key,
    key varchar(255) not null,
    value varchar(4096) not null,
    constraint kvdata_key_idx unique (key)
);
";

/// Shared SQLite connection plus the location it was opened from.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;
        Self::prepare(conn, Some(path))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn, None)
    }

    fn prepare(conn: Connection, path: Option<PathBuf>) -> StoreResult<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(KV_SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Round-trip a trivial statement to confirm the connection answers.
    pub fn ping(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.query_row("select 1", [], |_| Ok(()))?;
        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}
