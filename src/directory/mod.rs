//! Employee store: seed data, the directory join, and its record types.

pub mod query;
pub mod seed;
pub mod types;

pub use query::query_directory;
pub use seed::{ensure_seeded, seed};
pub use types::{Directory, DirectoryRecord, Employee, ReportingEdge};
