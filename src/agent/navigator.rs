//! Department navigator: retrieval-augmented, no memory.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::prompts::{render, NAVIGATOR_TEMPLATE};
use super::{Reply, Responder};
use crate::error::LlmError;
use crate::llm::{ChatMessage, ChatModel, ChatResponse};
use crate::location::{LocationIndex, DEFAULT_TOP_K};

pub struct LocationResponder {
    index: Arc<LocationIndex>,
    model: Arc<dyn ChatModel>,
    template: String,
    top_k: usize,
}

impl LocationResponder {
    pub fn new(index: Arc<LocationIndex>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            index,
            model,
            template: NAVIGATOR_TEMPLATE.to_string(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// The prompt sent for `question`, after retrieval.
    pub async fn prompt_for(&self, question: &str) -> Result<String> {
        let facts = self.index.retrieve(question, self.top_k).await?;
        Ok(render(&self.template, &facts.join("\n"), question))
    }

    /// Answer `question` from the top-k location facts; the model's text is returned verbatim.
    pub async fn chat(&self, question: &str) -> Result<String> {
        let prompt = self.prompt_for(question).await?;
        let response = self
            .model
            .complete(&[ChatMessage::user(prompt)], &[])
            .await
            .with_context(|| format!("navigator model {} failed", self.model.model()))?;

        match response {
            ChatResponse::Final(text) => Ok(text),
            ChatResponse::ToolCalls(calls) => Err(LlmError::InvalidResponse(format!(
                "navigator model requested {} tool call(s) but none were offered",
                calls.len()
            ))
            .into()),
        }
    }
}

#[async_trait]
impl Responder for LocationResponder {
    async fn respond(&self, _thread_id: &str, query: &str) -> Result<Reply> {
        Ok(Reply::answer(self.chat(query).await?))
    }
}
