//! Row and record types for the employee store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An `employee` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub name: &'static str,
    pub designation: &'static str,
}

/// A `reporting` row: `id` reports to `manager_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingEdge {
    pub id: i64,
    pub manager_id: Option<i64>,
}

/// One employee as seen through the directory join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    pub name: String,
    pub designation: String,
    /// `None` for the hierarchy root.
    pub manager_id: Option<i64>,
    /// `None` for the hierarchy root.
    pub manager_name: Option<String>,
}

/// Directory listing keyed by employee id, ordered by id.
pub type Directory = BTreeMap<i64, DirectoryRecord>;
