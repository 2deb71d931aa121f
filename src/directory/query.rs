//! Read path: the full employee/manager directory listing.

use rusqlite::Connection;

use super::types::{Directory, DirectoryRecord};
use crate::db::schema::DIRECTORY_SQL;
use crate::error::StoreError;

/// Every employee with its resolved manager. Never filters or paginates.
///
/// An empty map means the store has no employees; any storage failure is
/// returned as an error instead.
pub fn query_directory(conn: &Connection) -> Result<Directory, StoreError> {
    let mut stmt = conn.prepare(DIRECTORY_SQL)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            DirectoryRecord {
                name: row.get(1)?,
                designation: row.get(2)?,
                manager_id: row.get(3)?,
                manager_name: row.get(4)?,
            },
        ))
    })?;

    let mut directory = Directory::new();
    for row in rows {
        let (id, record) = row?;
        directory.insert(id, record);
    }

    tracing::debug!(entries = directory.len(), "directory queried");
    Ok(directory)
}
