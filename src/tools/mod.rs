//! Capabilities the org chatbot may invoke on the model's behalf.
//!
//! Each tool advertises a name, description, and JSON Schema for its
//! arguments (generated with `schemars` from a params struct). The
//! [`ToolRegistry`] turns model-issued [`ToolCall`]s into observations.

pub mod get_employees;
pub mod route_to_navigator;

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;

use crate::agent::Handoff;
use crate::error::ToolError;
use crate::llm::{ToolCall, ToolSpec};

pub use get_employees::DirectoryTool;
pub use route_to_navigator::RouteToNavigatorTool;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments object.
    fn parameters(&self) -> serde_json::Value;

    async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError>;

    /// Set when invoking this tool hands the query to another node.
    fn handoff(&self) -> Option<Handoff> {
        None
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// Arguments schema for a params struct, in the shape function-calling APIs accept.
pub fn parameters_schema<T: JsonSchema>() -> serde_json::Value {
    let mut value = serde_json::to_value(schemars::schema_for!(T))
        .unwrap_or_else(|_| serde_json::json!({"type": "object"}));
    if let Some(obj) = value.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
        obj.entry("properties")
            .or_insert_with(|| serde_json::json!({}));
    }
    value
}

/// Result of running one tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// JSON text handed back to the model.
    pub content: String,
    pub handoff: Option<Handoff>,
}

#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.register(Arc::new(tool));
        self
    }

    /// Add a tool, replacing any tool of the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Run `call`. Failures become `{"error": ...}` observations so the model
    /// can tell a broken capability apart from an empty result.
    pub async fn invoke(&self, call: &ToolCall) -> Observation {
        let Some(tool) = self.get(&call.name) else {
            tracing::warn!(tool = %call.name, "model requested unknown tool");
            return error_observation(&ToolError::UnknownTool(call.name.clone()));
        };

        tracing::info!(tool = %call.name, call_id = %call.id, "invoking tool");
        match tool.call(call.arguments.clone()).await {
            Ok(value) => Observation {
                content: value.to_string(),
                handoff: tool.handoff(),
            },
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "tool failed");
                error_observation(&e)
            }
        }
    }
}

fn error_observation(e: &ToolError) -> Observation {
    Observation {
        content: serde_json::json!({ "error": e.to_string() }).to_string(),
        handoff: None,
    }
}
