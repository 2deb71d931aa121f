//! Responders: the nodes the dispatcher runs.
//!
//! - [`GeneralistResponder`]: chat model + instruction + optional tools, with
//!   per-thread conversation memory and a bounded tool loop.
//! - [`LocationResponder`]: retrieval over the location index, then one
//!   templated completion.

pub mod generalist;
pub mod memory;
pub mod navigator;
pub mod prompts;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

pub use generalist::GeneralistResponder;
pub use memory::{ConversationMemory, Turn};
pub use navigator::LocationResponder;

/// Structured request to forward the query to another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handoff {
    DepartmentNavigator,
}

impl Handoff {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepartmentNavigator => "department_navigator",
        }
    }
}

impl std::fmt::Display for Handoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A responder's answer for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub handoff: Option<Handoff>,
}

impl Reply {
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            handoff: None,
        }
    }

    pub fn handoff(text: impl Into<String>, to: Handoff) -> Self {
        Self {
            text: text.into(),
            handoff: Some(to),
        }
    }
}

/// A node that answers a query within a conversation thread.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, thread_id: &str, query: &str) -> Result<Reply>;
}
