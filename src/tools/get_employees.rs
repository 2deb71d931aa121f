//! `get_employees`: the directory capability.

use std::path::PathBuf;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{parameters_schema, Tool};
use crate::error::{StoreError, ToolError};
use crate::{db, directory};

pub const TOOL_NAME: &str = "get_employees";

/// `get_employees` takes no arguments.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetEmployeesParams {}

/// Opens the employee store per call and returns the full directory as
/// `{"<id>": {name, designation, manager_id, manager_name}}`.
#[derive(Debug, Clone)]
pub struct DirectoryTool {
    db_path: PathBuf,
}

impl DirectoryTool {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Open the existing store and run the directory join (blocking).
    ///
    /// A missing file or table is an error, never an empty listing.
    pub fn list(&self) -> Result<directory::Directory, StoreError> {
        let conn = db::open_existing(&self.db_path)?;
        directory::query_directory(&conn)
    }
}

#[async_trait]
impl Tool for DirectoryTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Gets the employees list."
    }

    fn parameters(&self) -> serde_json::Value {
        parameters_schema::<GetEmployeesParams>()
    }

    async fn call(&self, _args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let tool = self.clone();
        let listing = tokio::task::spawn_blocking(move || tool.list())
            .await
            .map_err(|e| ToolError::Task(e.to_string()))??;

        tracing::debug!(employees = listing.len(), "directory tool returned listing");
        Ok(serde_json::to_value(listing)?)
    }
}
