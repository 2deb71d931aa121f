#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use orgbot::db;
use orgbot::directory;
use orgbot::embedding::hashing::HashingEmbeddingProvider;
use orgbot::error::LlmError;
use orgbot::llm::{ChatMessage, ChatModel, ChatResponse, ToolCall, ToolSpec};
use orgbot::location::LocationIndex;
use tempfile::TempDir;

/// A seeded employee store in a temp directory. Keep the `TempDir` alive.
pub fn seeded_store() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("org.db");
    let mut conn = db::open_database(&path).unwrap();
    directory::seed(&mut conn).unwrap();
    (tmp, path)
}

/// Offline embedder wide enough that the seed facts rank predictably.
pub fn test_embedder() -> Arc<HashingEmbeddingProvider> {
    Arc::new(HashingEmbeddingProvider::new(1024))
}

pub async fn seeded_index() -> Arc<LocationIndex> {
    Arc::new(LocationIndex::seeded(test_embedder()).await.unwrap())
}

/// One request as the model saw it.
#[derive(Debug, Clone)]
pub struct Request {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<String>,
}

type Script = dyn Fn(&[ChatMessage], &[ToolSpec]) -> ChatResponse + Send + Sync;

/// Chat model driven by a closure over the request; records every request.
pub struct FnChatModel {
    script: Box<Script>,
    requests: Mutex<Vec<Request>>,
}

impl FnChatModel {
    pub fn new(
        script: impl Fn(&[ChatMessage], &[ToolSpec]) -> ChatResponse + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Box::new(script),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Always answers `text`.
    pub fn answering(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::new(move |_, _| ChatResponse::Final(text.clone()))
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for FnChatModel {
    fn model(&self) -> &str {
        "fn-model"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> Result<ChatResponse, LlmError> {
        self.requests.lock().unwrap().push(Request {
            messages: messages.to_vec(),
            tools: tools.iter().map(|t| t.name.clone()).collect(),
        });
        Ok((self.script)(messages, tools))
    }
}

/// Chat model whose every call fails.
pub struct FailingChatModel;

#[async_trait]
impl ChatModel for FailingChatModel {
    fn model(&self) -> &str {
        "failing"
    }

    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _tools: &[ToolSpec],
    ) -> Result<ChatResponse, LlmError> {
        Err(LlmError::Api {
            status: 401,
            body: "invalid api key".into(),
        })
    }
}

pub fn call(id: &str, name: &str) -> ToolCall {
    ToolCall {
        id: id.into(),
        name: name.into(),
        arguments: serde_json::json!({}),
    }
}

/// Content of the most recent tool message, if any.
pub fn last_tool_output(messages: &[ChatMessage]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| m.tool_call_id.is_some())
        .map(|m| m.content.as_str())
}
