//! Fixed seed data for the employee store.
//!
//! [`seed`] is strict: running it against a populated store fails with
//! [`StoreError::AlreadySeeded`] and leaves the data untouched, because the
//! whole load runs in one transaction. [`ensure_seeded`] is the idempotent
//! entry point used at startup.

use rusqlite::{params, Connection, ErrorCode};

use super::types::{Employee, ReportingEdge};
use crate::error::StoreError;

pub const SEED_EMPLOYEES: [Employee; 6] = [
    Employee { id: 1, name: "Alice", designation: "CEO" },
    Employee { id: 2, name: "Bob", designation: "CTO" },
    Employee { id: 3, name: "Charlie", designation: "COO" },
    Employee { id: 4, name: "David", designation: "CFO" },
    Employee { id: 5, name: "Eve", designation: "Head of Data & Analytics" },
    Employee { id: 6, name: "Fred", designation: "HR Head" },
];

pub const SEED_REPORTING: [ReportingEdge; 5] = [
    ReportingEdge { id: 2, manager_id: Some(1) },
    ReportingEdge { id: 3, manager_id: Some(1) },
    ReportingEdge { id: 4, manager_id: Some(1) },
    ReportingEdge { id: 5, manager_id: Some(2) },
    ReportingEdge { id: 6, manager_id: Some(3) },
];

/// Insert the fixed employee and reporting lists.
pub fn seed(conn: &mut Connection) -> Result<(), StoreError> {
    let tx = conn.transaction()?;

    for employee in &SEED_EMPLOYEES {
        tx.execute(
            "INSERT INTO employee (id, name, designation) VALUES (?1, ?2, ?3)",
            params![employee.id, employee.name, employee.designation],
        )
        .map_err(|e| match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => StoreError::AlreadySeeded { id: employee.id },
            _ => StoreError::Sqlite(e),
        })?;
    }

    for edge in &SEED_REPORTING {
        tx.execute(
            "INSERT INTO reporting (id, manager_id) VALUES (?1, ?2)",
            params![edge.id, edge.manager_id],
        )?;
    }

    tx.commit()?;
    tracing::info!(
        employees = SEED_EMPLOYEES.len(),
        reporting = SEED_REPORTING.len(),
        "employee store seeded"
    );
    Ok(())
}

/// Seed only if the `employee` table is empty. Returns `true` if rows were inserted.
pub fn ensure_seeded(conn: &mut Connection) -> Result<bool, StoreError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM employee", [], |row| row.get(0))?;
    if count > 0 {
        tracing::debug!(employees = count, "employee store already populated");
        return Ok(false);
    }
    seed(conn)?;
    Ok(true)
}
