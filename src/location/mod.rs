//! Department location index.
//!
//! An in-memory SQLite database holding the location facts and a sqlite-vec
//! `vec0` table of their embeddings. Built once; nearest-neighbour lookup by
//! L2 distance over the provider's vectors.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::db::load_sqlite_vec;
use crate::embedding::{embedding_to_bytes, EmbeddingProvider};

/// Number of facts the navigator retrieves per question.
pub const DEFAULT_TOP_K: usize = 4;

/// The organisation's department floor plan.
pub const SEED_LOCATIONS: [&str; 5] = [
    "HR is located on the first floor",
    "Finance is located on the second floor",
    "Data & Analytics is located on the third floor",
    "Sales is located on the fourth floor",
    "Marketing is located on the fifth floor",
];

/// A retrieved fact and its distance from the question.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedFact {
    pub content: String,
    pub distance: f64,
}

pub struct LocationIndex {
    conn: Mutex<Connection>,
    embedder: Arc<dyn EmbeddingProvider>,
    len: usize,
}

impl LocationIndex {
    /// Embed every fact and load it into a fresh in-memory index.
    pub async fn build<S: AsRef<str>>(
        facts: &[S],
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let texts: Vec<&str> = facts.iter().map(|f| f.as_ref()).collect();
        let vectors = embedder
            .embed_batch(&texts)
            .await
            .context("failed to embed location facts")?;
        anyhow::ensure!(
            vectors.len() == texts.len(),
            "embedder returned {} vectors for {} facts",
            vectors.len(),
            texts.len()
        );

        let dimensions = embedder.dimensions();
        load_sqlite_vec();
        let mut conn = Connection::open_in_memory().context("failed to open index database")?;
        conn.execute_batch(&format!(
            "CREATE TABLE location_fact (id INTEGER PRIMARY KEY, content TEXT NOT NULL);
             CREATE VIRTUAL TABLE location_vec USING vec0(embedding FLOAT[{dimensions}]);"
        ))
        .context("failed to create index tables")?;

        let tx = conn.transaction()?;
        for (i, (text, vector)) in texts.iter().zip(&vectors).enumerate() {
            anyhow::ensure!(
                vector.len() == dimensions,
                "embedding for fact {i} has {} dimensions, expected {dimensions}",
                vector.len()
            );
            let id = i as i64 + 1;
            tx.execute(
                "INSERT INTO location_fact (id, content) VALUES (?1, ?2)",
                params![id, text],
            )?;
            tx.execute(
                "INSERT INTO location_vec (rowid, embedding) VALUES (?1, ?2)",
                params![id, embedding_to_bytes(vector)],
            )?;
        }
        tx.commit()?;

        tracing::info!(facts = texts.len(), dimensions, "location index built");

        Ok(Self {
            conn: Mutex::new(conn),
            embedder,
            len: texts.len(),
        })
    }

    /// Build the index over [`SEED_LOCATIONS`].
    pub async fn seeded(embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        Self::build(&SEED_LOCATIONS, embedder).await
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The `k` facts nearest to `question`, nearest first.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<String>> {
        Ok(self
            .retrieve_scored(question, k)
            .await?
            .into_iter()
            .map(|f| f.content)
            .collect())
    }

    /// Like [`retrieve`](Self::retrieve), with distances.
    pub async fn retrieve_scored(&self, question: &str, k: usize) -> Result<Vec<RetrievedFact>> {
        let k = k.min(self.len);
        if k == 0 {
            return Ok(vec![]);
        }

        let query = self
            .embedder
            .embed(question)
            .await
            .context("failed to embed question")?;

        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("index lock poisoned: {e}"))?;

        let mut stmt = conn.prepare(
            "SELECT f.content, v.distance \
             FROM (SELECT rowid, distance FROM location_vec \
                   WHERE embedding MATCH ?1 ORDER BY distance LIMIT ?2) v \
             JOIN location_fact f ON f.id = v.rowid \
             ORDER BY v.distance, f.id",
        )?;
        let facts = stmt
            .query_map(params![embedding_to_bytes(&query), k as i64], |row| {
                Ok(RetrievedFact {
                    content: row.get(0)?,
                    distance: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(question, k, hits = facts.len(), "location retrieval");
        Ok(facts)
    }
}
