use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable holding the model service credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OrgbotConfig {
    pub log: LogConfig,
    pub storage: StorageConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    /// Model behind the org chatbot (Generalist Responder).
    pub model: String,
    /// Model behind the department navigator (Location Responder).
    pub navigator_model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub max_tool_rounds: usize,
    /// Populated from the environment only, never from TOML.
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// `"openai"` (hosted) or `"hashing"` (offline, deterministic).
    pub provider: String,
    pub model: String,
    pub dimensions: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ChatConfig {
    pub thread_id: Option<String>,
}

impl Default for OrgbotConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            storage: StorageConfig::default(),
            llm: LlmConfig::default(),
            embedding: EmbeddingConfig::default(),
            retrieval: RetrievalConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_orgbot_dir()
            .join("org.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o".into(),
            navigator_model: "gpt-3.5-turbo".into(),
            temperature: 0.0,
            timeout_secs: 60,
            max_retries: 3,
            retry_backoff_ms: 500,
            max_tool_rounds: 5,
            api_key: None,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "text-embedding-ada-002".into(),
            dimensions: 1536,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: crate::location::DEFAULT_TOP_K,
        }
    }
}

/// Returns `~/.orgbot/`, or `./.orgbot/` when no home directory is known.
pub fn default_orgbot_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".orgbot")
}

/// Returns the default config file path: `~/.orgbot/config.toml`
pub fn default_config_path() -> PathBuf {
    default_orgbot_dir().join("config.toml")
}

impl OrgbotConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            OrgbotConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (ORGBOT_DB, ORGBOT_LOG_LEVEL,
    /// ORGBOT_MODEL, OPENAI_BASE_URL, OPENAI_API_KEY).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ORGBOT_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("ORGBOT_LOG_LEVEL") {
            self.log.level = val;
        }
        if let Ok(val) = std::env::var("ORGBOT_MODEL") {
            self.llm.model = val;
        }
        if let Ok(val) = std::env::var("OPENAI_BASE_URL") {
            self.llm.base_url = val;
        }
        if let Ok(val) = std::env::var(API_KEY_ENV) {
            if !val.trim().is_empty() {
                self.llm.api_key = Some(val);
            }
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
