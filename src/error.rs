//! Error types for the storage, model, and tool boundaries.
//!
//! Application layers (responders, dispatcher, CLI) work in `anyhow::Result`;
//! these enums exist so callers can tell *what kind* of boundary failed.

use thiserror::Error;

/// Failures from the employee store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Any SQLite failure: unreachable file, bad schema, constraint violation.
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The seed rows collide with rows already present (`employee.id` is unique).
    #[error("employee store already seeded: employee id {id} exists")]
    AlreadySeeded { id: i64 },

    /// Filesystem failure while preparing the database location.
    #[error("failed to prepare database directory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures talking to a hosted chat or embedding service.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("missing credential: set {0} in the environment")]
    MissingCredential(String),

    #[error("connection error: {0}")]
    Http(String),

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("request timed out")]
    Timeout,

    #[error("empty response from model")]
    EmptyResponse,

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Whether a retry has any chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited(_) | Self::Timeout => true,
            Self::Api { status, .. } => *status >= 500,
            Self::MissingCredential(_) | Self::EmptyResponse | Self::InvalidResponse(_) => false,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}

/// Failures executing a capability on the model's behalf.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to serialize tool output: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool task failed: {0}")]
    Task(String),
}
