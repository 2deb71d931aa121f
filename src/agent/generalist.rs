//! The tool-using chat responder.
//!
//! One call to [`GeneralistResponder::invoke`] runs the decide/act/observe
//! loop for a single user turn:
//!
//! 1. send instruction + thread history + the new user message (+ tool specs)
//! 2. on a final answer, record the turn and return it
//! 3. on tool requests, run each tool, append the observations, and ask again
//! 4. a handoff tool ends the turn immediately with a [`Handoff`]
//!
//! The loop runs at most `max_tool_rounds` tool rounds; past that the turn
//! ends with [`TOOL_ROUNDS_EXCEEDED`], unless the request only asks for a
//! handoff.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::memory::{ConversationMemory, Turn};
use super::prompts::{HANDOFF_NOTICE, TOOL_ROUNDS_EXCEEDED};
use super::{Reply, Responder};
use crate::llm::{ChatMessage, ChatModel, ChatResponse, ToolCall};
use crate::tools::ToolRegistry;

pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 5;

pub struct GeneralistResponder {
    model: Arc<dyn ChatModel>,
    instruction: String,
    tools: ToolRegistry,
    memory: Arc<ConversationMemory>,
    max_tool_rounds: usize,
}

impl GeneralistResponder {
    pub fn new(
        model: Arc<dyn ChatModel>,
        instruction: impl Into<String>,
        tools: ToolRegistry,
        memory: Arc<ConversationMemory>,
    ) -> Self {
        Self {
            model,
            instruction: instruction.into(),
            tools,
            memory,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    pub fn memory(&self) -> &Arc<ConversationMemory> {
        &self.memory
    }

    /// Answer `user_text` in `thread_id`, recording both turns on success.
    pub async fn invoke(&self, thread_id: &str, user_text: &str) -> Result<Reply> {
        let history = self.memory.thread(thread_id);
        let mut turns = history.lock().await;

        let mut messages = Vec::with_capacity(turns.len() + 2);
        messages.push(ChatMessage::system(&self.instruction));
        messages.extend(turns.iter().map(Turn::to_message));
        messages.push(ChatMessage::user(user_text));

        let specs = self.tools.specs();
        let mut rounds = 0;

        let reply = loop {
            let response = self
                .model
                .complete(&messages, &specs)
                .await
                .with_context(|| format!("chat model {} failed", self.model.model()))?;

            let calls = match response {
                ChatResponse::Final(text) => break Reply::answer(text),
                ChatResponse::ToolCalls(calls) => calls,
            };

            if rounds >= self.max_tool_rounds && !self.is_handoff_only(&calls) {
                tracing::warn!(
                    thread_id,
                    rounds,
                    max = self.max_tool_rounds,
                    "tool round cap reached, returning fallback"
                );
                break Reply::answer(TOOL_ROUNDS_EXCEEDED);
            }
            rounds += 1;

            tracing::debug!(
                thread_id,
                round = rounds,
                calls = calls.len(),
                "model requested tools"
            );

            messages.push(ChatMessage::assistant_tool_calls(calls.clone()));
            let mut handoff = None;
            for call in &calls {
                let observation = self.tools.invoke(call).await;
                handoff = handoff.or(observation.handoff);
                messages.push(ChatMessage::tool_result(&call.id, observation.content));
            }

            if let Some(to) = handoff {
                tracing::info!(thread_id, to = %to, "handoff requested");
                break Reply::handoff(HANDOFF_NOTICE, to);
            }
        };

        turns.push(Turn::user(user_text));
        turns.push(Turn::assistant(&reply.text));

        Ok(reply)
    }

    /// Every call names a handoff tool. Such a request does no work and ends
    /// the turn, so the round cap does not apply to it.
    fn is_handoff_only(&self, calls: &[ToolCall]) -> bool {
        !calls.is_empty()
            && calls.iter().all(|call| {
                self.tools
                    .get(&call.name)
                    .is_some_and(|tool| tool.handoff().is_some())
            })
    }
}

#[async_trait]
impl Responder for GeneralistResponder {
    async fn respond(&self, thread_id: &str, query: &str) -> Result<Reply> {
        self.invoke(thread_id, query).await
    }
}
