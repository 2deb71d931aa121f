pub mod schema;

use rusqlite::{Connection, OpenFlags};
use sqlite_vec::sqlite3_vec_init;
use std::path::Path;
use std::sync::Once;

use crate::error::StoreError;

static SQLITE_VEC_INIT: Once = Once::new();

/// Register the sqlite-vec extension globally. Safe to call multiple times.
pub fn load_sqlite_vec() {
    SQLITE_VEC_INIT.call_once(|| unsafe {
        rusqlite::ffi::sqlite3_auto_extension(Some(std::mem::transmute(
            sqlite3_vec_init as *const (),
        )));
    });
}

/// Open (or create) the employee store at the given path with the schema
/// initialized. Does not seed; see [`crate::directory::seed`].
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection, StoreError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let conn = Connection::open(path)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;

    schema::init_schema(&conn)?;

    tracing::debug!(path = %path.display(), "employee store opened");
    Ok(conn)
}

/// Open an existing employee store read-only. Never creates the file or the
/// schema, so a wrong path or an uninitialized store is an error.
pub fn open_existing(path: impl AsRef<Path>) -> Result<Connection, StoreError> {
    let path = path.as_ref();
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;

    tracing::debug!(path = %path.display(), "employee store opened read-only");
    Ok(conn)
}

/// Open an in-memory employee store with the schema initialized.
pub fn open_memory_database() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    schema::init_schema(&conn)?;
    Ok(conn)
}
