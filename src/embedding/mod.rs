//! Text-to-vector embedding pipeline.
//!
//! Provides the [`EmbeddingProvider`] trait with a hosted OpenAI
//! implementation and an offline hashing implementation. The provider is
//! created via [`create_provider`] from configuration.

pub mod hashing;
pub mod openai;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{EmbeddingConfig, LlmConfig};

/// Trait for embedding text into vectors.
///
/// Implementations produce vectors of exactly [`dimensions`](Self::dimensions)
/// components.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of text strings. Implementations may override for batched requests.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    /// Return the number of dimensions this provider produces.
    fn dimensions(&self) -> usize;
}

/// Create an embedding provider from config.
///
/// `"openai"` uses the hosted embeddings endpoint (and the `[llm]` transport
/// settings); `"hashing"` is offline and deterministic.
pub fn create_provider(
    config: &EmbeddingConfig,
    llm: &LlmConfig,
) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "openai" => {
            let provider = openai::OpenAiEmbeddingProvider::from_config(config, llm)?;
            Ok(Box::new(provider))
        }
        "hashing" => Ok(Box::new(hashing::HashingEmbeddingProvider::new(
            config.dimensions,
        ))),
        other => anyhow::bail!("unknown embedding provider: {other}. Supported: openai, hashing"),
    }
}

/// View an f32 embedding slice as raw bytes for sqlite-vec.
pub fn embedding_to_bytes(embedding: &[f32]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            embedding.as_ptr() as *const u8,
            embedding.len() * std::mem::size_of::<f32>(),
        )
    }
}

/// L2-normalize a vector. Returns a zero vector if the input norm is zero.
pub fn l2_normalize(v: &[f32]) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}
