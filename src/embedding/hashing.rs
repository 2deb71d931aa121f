//! Offline embedding provider: hashed bag-of-words.
//!
//! Each lowercase alphanumeric token is hashed (FNV-1a) into one of
//! `dimensions` buckets; the count vector is L2-normalized. Deterministic
//! across runs and platforms, so it backs tests and credential-free use of
//! the location index.

use anyhow::Result;
use async_trait::async_trait;

use super::{l2_normalize, EmbeddingProvider};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

pub struct HashingEmbeddingProvider {
    dimensions: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimensions];
        for token in tokenize(text) {
            v[(fnv1a(&token) % self.dimensions as u64) as usize] += 1.0;
        }
        l2_normalize(&v)
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_sync(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn fnv1a(token: &str) -> u64 {
    token.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn produces_normalized_vectors_of_configured_size() {
        let provider = HashingEmbeddingProvider::new(64);
        let v = provider.embed("HR is located on the first floor").await.unwrap();
        assert_eq!(v.len(), 64);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn is_deterministic_and_case_insensitive() {
        let provider = HashingEmbeddingProvider::new(128);
        let a = provider.embed("Where is HR?").await.unwrap();
        let b = provider.embed("where is hr").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn shared_tokens_raise_similarity() {
        let provider = HashingEmbeddingProvider::new(1024);
        let q = provider.embed("where is HR located?").await.unwrap();
        let hr = provider.embed("HR is located on the first floor").await.unwrap();
        let sales = provider.embed("Sales is located on the fourth floor").await.unwrap();
        assert!(cosine(&q, &hr) > cosine(&q, &sales));
    }

    #[tokio::test]
    async fn empty_text_is_zero_vector() {
        let provider = HashingEmbeddingProvider::new(8);
        assert_eq!(provider.embed("  ").await.unwrap(), vec![0.0; 8]);
    }

    #[test]
    fn fnv1a_known_value() {
        // FNV-1a of the empty string is the offset basis.
        assert_eq!(fnv1a(""), FNV_OFFSET);
        assert_eq!(fnv1a("a"), 0xaf63_dc4c_8601_ec8c);
    }
}
