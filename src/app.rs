//! Wiring: build responders and the dispatcher from configuration.
//!
//! Every dependency (model clients, embedder, index, store path) is
//! constructed here and passed down explicitly.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::agent::prompts::{INFOBANK_INSTRUCTION, ORG_CHATBOT_INSTRUCTION};
use crate::agent::{ConversationMemory, GeneralistResponder, LocationResponder};
use crate::config::OrgbotConfig;
use crate::dispatch::{Dispatcher, Stage};
use crate::embedding::{self, EmbeddingProvider};
use crate::llm::openai::OpenAiChat;
use crate::llm::ChatModel;
use crate::location::LocationIndex;
use crate::tools::{DirectoryTool, RouteToNavigatorTool, ToolRegistry};
use crate::{db, directory};

/// Which responder a one-shot question goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    /// Chat model with an instruction and no tools.
    Plain,
    /// Chat model with the `get_employees` tool.
    Directory,
    /// The full dispatcher.
    Org,
}

/// Open the employee store, seeding it if empty. Returns its path.
pub fn prepare_store(config: &OrgbotConfig) -> Result<PathBuf> {
    let db_path = config.resolved_db_path();
    let mut conn = db::open_database(&db_path)
        .with_context(|| format!("failed to open employee store at {}", db_path.display()))?;
    if directory::ensure_seeded(&mut conn)? {
        tracing::info!(db = %db_path.display(), "seeded empty employee store");
    }
    Ok(db_path)
}

pub fn chat_model(config: &OrgbotConfig, model: &str) -> Result<Arc<dyn ChatModel>> {
    let client = OpenAiChat::from_config(&config.llm, model)
        .with_context(|| format!("failed to build chat client for {model}"))?;
    Ok(Arc::new(client))
}

pub fn embedder(config: &OrgbotConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider = embedding::create_provider(&config.embedding, &config.llm)?;
    Ok(Arc::from(provider))
}

/// Location responder over the seeded index.
pub async fn navigator(config: &OrgbotConfig) -> Result<LocationResponder> {
    let index = LocationIndex::seeded(embedder(config)?).await?;
    Ok(LocationResponder::new(
        Arc::new(index),
        chat_model(config, &config.llm.navigator_model)?,
    )
    .with_top_k(config.retrieval.top_k))
}

/// A generalist responder configured for `kind`.
pub fn generalist(
    config: &OrgbotConfig,
    kind: AgentKind,
    db_path: PathBuf,
    memory: Arc<ConversationMemory>,
) -> Result<GeneralistResponder> {
    let (instruction, tools) = match kind {
        AgentKind::Plain => (INFOBANK_INSTRUCTION, ToolRegistry::new()),
        AgentKind::Directory => (
            INFOBANK_INSTRUCTION,
            ToolRegistry::new().with(DirectoryTool::new(db_path)),
        ),
        AgentKind::Org => (
            ORG_CHATBOT_INSTRUCTION,
            ToolRegistry::new()
                .with(DirectoryTool::new(db_path))
                .with(RouteToNavigatorTool),
        ),
    };

    Ok(GeneralistResponder::new(
        chat_model(config, &config.llm.model)?,
        instruction,
        tools,
        memory,
    )
    .with_max_tool_rounds(config.llm.max_tool_rounds))
}

/// The full org chatbot → department navigator dispatcher.
pub async fn dispatcher(config: &OrgbotConfig) -> Result<Dispatcher> {
    let db_path = prepare_store(config)?;
    let memory = Arc::new(ConversationMemory::new());
    let org = generalist(config, AgentKind::Org, db_path, memory)?;
    let navigator = navigator(config).await?;

    if config.llm.api_key.is_none() {
        tracing::warn!(
            "{} is not set; every model call will fail",
            crate::config::API_KEY_ENV
        );
    }

    Ok(Dispatcher::new(Arc::new(org), Arc::new(navigator)))
}

/// What a chat loop talks to: one generalist, or the routed dispatcher.
pub enum ChatSession {
    Single(GeneralistResponder),
    Routed(Dispatcher),
}

impl ChatSession {
    pub fn is_routed(&self) -> bool {
        matches!(self, Self::Routed(_))
    }

    /// Run one turn and return the final answer. Only routed sessions
    /// report stages through `on_stage`.
    pub async fn turn<F>(&self, thread_id: &str, query: &str, on_stage: F) -> Result<String>
    where
        F: FnMut(&Stage) + Send,
    {
        match self {
            Self::Single(responder) => Ok(responder.invoke(thread_id, query).await?.text),
            Self::Routed(dispatcher) => Ok(dispatcher
                .dispatch_with(thread_id, query, on_stage)
                .await?
                .result),
        }
    }
}

/// Session for `kind`; its conversation memory lives as long as the session.
pub async fn session(config: &OrgbotConfig, kind: AgentKind) -> Result<ChatSession> {
    let db_path = match kind {
        AgentKind::Org => return Ok(ChatSession::Routed(dispatcher(config).await?)),
        AgentKind::Plain => config.resolved_db_path(),
        AgentKind::Directory => prepare_store(config)?,
    };
    let memory = Arc::new(ConversationMemory::new());
    Ok(ChatSession::Single(generalist(config, kind, db_path, memory)?))
}
