//! `route_to_department_navigator`: structured handoff to the location responder.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{parameters_schema, Tool};
use crate::agent::Handoff;
use crate::error::ToolError;

pub const TOOL_NAME: &str = "route_to_department_navigator";

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct RouteToNavigatorParams {}

/// Calling this ends the org chatbot's turn and forwards the original query
/// to the department navigator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteToNavigatorTool;

#[async_trait]
impl Tool for RouteToNavigatorTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Route the user's question to the department_navigator agent. \
         Use for questions about departments and where they are located."
    }

    fn parameters(&self) -> serde_json::Value {
        parameters_schema::<RouteToNavigatorParams>()
    }

    async fn call(&self, _args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        Ok(serde_json::json!({ "routed_to": Handoff::DepartmentNavigator.as_str() }))
    }

    fn handoff(&self) -> Option<Handoff> {
        Some(Handoff::DepartmentNavigator)
    }
}
