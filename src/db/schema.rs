//! SQL DDL for the employee store.
//!
//! Defines the `employee` and `reporting` tables. All DDL uses
//! `IF NOT EXISTS` for idempotent initialization.

use rusqlite::Connection;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS employee (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    designation TEXT NOT NULL
);

-- One row per employee that has a manager; the hierarchy root has no row.
CREATE TABLE IF NOT EXISTS reporting (
    id INTEGER NOT NULL,
    manager_id INTEGER,
    FOREIGN KEY (id) REFERENCES employee (id)
);

CREATE INDEX IF NOT EXISTS idx_reporting_id ON reporting(id);
"#;

/// Left join of every employee with its manager, resolved by a second self-join.
pub const DIRECTORY_SQL: &str = "\
    SELECT e.id, e.name, e.designation, r.manager_id, m.name AS manager_name \
    FROM employee e \
    LEFT JOIN reporting r ON e.id = r.id \
    LEFT JOIN employee m ON r.manager_id = m.id \
    ORDER BY e.id";

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
