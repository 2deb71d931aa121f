//! Hosted embeddings via the OpenAI `/embeddings` endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::config::{EmbeddingConfig, LlmConfig};
use crate::llm::openai::OpenAiHttp;

pub struct OpenAiEmbeddingProvider {
    http: OpenAiHttp,
    model: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiEmbeddingProvider {
    pub fn from_config(config: &EmbeddingConfig, llm: &LlmConfig) -> Result<Self> {
        let http = OpenAiHttp::from_config(llm).context("failed to build embeddings client")?;
        Ok(Self {
            http,
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut batch = self.embed_batch(&[text]).await?;
        batch.pop().context("embeddings endpoint returned no vectors")
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };
        let mut response: EmbeddingResponse = self
            .http
            .post("embeddings", &request)
            .await
            .context("embedding request failed")?;

        anyhow::ensure!(
            response.data.len() == texts.len(),
            "embeddings endpoint returned {} vectors for {} inputs",
            response.data.len(),
            texts.len()
        );

        response.data.sort_by_key(|d| d.index);
        let vectors: Vec<Vec<f32>> = response.data.into_iter().map(|d| d.embedding).collect();

        if let Some(v) = vectors.iter().find(|v| v.len() != self.dimensions) {
            anyhow::bail!(
                "embedding model {} produced {} dimensions, configured {}",
                self.model,
                v.len(),
                self.dimensions
            );
        }

        tracing::debug!(model = %self.model, inputs = texts.len(), "embedded batch");
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
