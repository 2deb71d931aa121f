//! The routing dispatcher.
//!
//! A two-node state machine:
//!
//! ```text
//! ORG_CHATBOT ──route()──▶ DEPARTMENT_NAVIGATOR ──▶ DONE
//!      │
//!      └──────────────────────────────────────────▶ DONE
//! ```
//!
//! [`route`] is the only decision point out of `ORG_CHATBOT`: a structured
//! [`Handoff`] wins, otherwise the literal [`ROUTING_MARKER`] in the org
//! chatbot's text selects the navigator. The navigator always receives the
//! original query, never the org chatbot's intermediate text.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::agent::{Handoff, Reply, Responder};

/// Substring in the org chatbot's answer that forwards the query.
pub const ROUTING_MARKER: &str = "department_navigator";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    OrgChatbot,
    DepartmentNavigator,
    Done,
}

impl Node {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrgChatbot => "org_chatbot",
            Self::DepartmentNavigator => "department_navigator",
            Self::Done => "__end__",
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Working record threaded through the nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentState {
    pub query: String,
    pub result: String,
}

/// Output of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub node: Node,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The node whose result is final.
    pub final_node: Node,
    pub result: String,
    pub stages: Vec<Stage>,
}

/// Transition out of `ORG_CHATBOT`.
pub fn route(reply: &Reply) -> Node {
    match reply.handoff {
        Some(Handoff::DepartmentNavigator) => Node::DepartmentNavigator,
        None if reply.text.contains(ROUTING_MARKER) => Node::DepartmentNavigator,
        None => Node::Done,
    }
}

pub struct Dispatcher {
    org_chatbot: Arc<dyn Responder>,
    navigator: Arc<dyn Responder>,
}

impl Dispatcher {
    pub fn new(org_chatbot: Arc<dyn Responder>, navigator: Arc<dyn Responder>) -> Self {
        Self {
            org_chatbot,
            navigator,
        }
    }

    pub async fn dispatch(&self, thread_id: &str, query: &str) -> Result<DispatchOutcome> {
        self.dispatch_with(thread_id, query, |_| {}).await
    }

    /// Run one query to `DONE`, calling `on_stage` after each node produces output.
    pub async fn dispatch_with<F>(
        &self,
        thread_id: &str,
        query: &str,
        mut on_stage: F,
    ) -> Result<DispatchOutcome>
    where
        F: FnMut(&Stage) + Send,
    {
        let mut state = AgentState {
            query: query.to_string(),
            result: String::new(),
        };
        let mut stages = Vec::new();
        let mut node = Node::OrgChatbot;
        let mut final_node = node;

        while node != Node::Done {
            let next = match node {
                Node::OrgChatbot => {
                    let reply = self
                        .org_chatbot
                        .respond(thread_id, &state.query)
                        .await
                        .context("org_chatbot failed")?;
                    let next = route(&reply);
                    state.result = reply.text;
                    next
                }
                Node::DepartmentNavigator => {
                    let reply = self
                        .navigator
                        .respond(thread_id, &state.query)
                        .await
                        .context("department_navigator failed")?;
                    state.result = reply.text;
                    Node::Done
                }
                Node::Done => unreachable!("loop exits on Done"),
            };

            tracing::info!(thread_id, from = %node, to = %next, "dispatcher transition");

            let stage = Stage {
                node,
                result: state.result.clone(),
            };
            on_stage(&stage);
            stages.push(stage);

            final_node = node;
            node = next;
        }

        Ok(DispatchOutcome {
            final_node,
            result: state.result,
            stages,
        })
    }
}
