//! Exact-scoring in-memory vector store for tests and offline runs.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::vector_store::{IndexRecord, SearchHit, VectorStore, VectorStoreError};

type BoxFuture<'a, T> = std::pin::Pin<Box<dyn Future<Output = T> + Send + 'a>>;

struct StoredRecord {
    vector: Vec<f32>,
    source: String,
    text: String,
}

pub struct InMemoryVectorStore {
    records: RwLock<HashMap<u64, StoredRecord>>,
    upsert_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl InMemoryVectorStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            upsert_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `upsert` invocations seen, for interaction assertions.
    #[must_use]
    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    /// Number of `search` invocations seen, for interaction assertions.
    #[must_use]
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryVectorStore").finish_non_exhaustive()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl VectorStore for InMemoryVectorStore {
    fn ensure_collection(&self, _vector_size: u64) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        Box::pin(async move { Ok(()) })
    }

    fn upsert(&self, records: Vec<IndexRecord>) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        Box::pin(async move {
            self.upsert_calls.fetch_add(1, Ordering::SeqCst);
            let mut map = self
                .records
                .write()
                .map_err(|e| VectorStoreError::Upsert(e.to_string()))?;
            for record in records {
                map.insert(
                    record.id,
                    StoredRecord {
                        vector: record.vector,
                        source: record.source,
                        text: record.text,
                    },
                );
            }
            Ok(())
        })
    }

    fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
    ) -> BoxFuture<'_, Result<Vec<SearchHit>, VectorStoreError>> {
        Box::pin(async move {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            let map = self
                .records
                .read()
                .map_err(|e| VectorStoreError::Search(e.to_string()))?;

            let mut scored: Vec<SearchHit> = map
                .values()
                .map(|record| SearchHit {
                    text: record.text.clone(),
                    source: record.source.clone(),
                    score: cosine_similarity(&vector, &record.vector),
                })
                .collect();

            scored.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            #[expect(clippy::cast_possible_truncation)]
            scored.truncate(limit as usize);
            Ok(scored)
        })
    }

    fn count(&self) -> BoxFuture<'_, Result<u64, VectorStoreError>> {
        Box::pin(async move {
            let map = self
                .records
                .read()
                .map_err(|e| VectorStoreError::Count(e.to_string()))?;
            Ok(map.len() as u64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, vector: Vec<f32>, source: &str, text: &str) -> IndexRecord {
        IndexRecord {
            id,
            vector,
            source: source.into(),
            text: text.into(),
        }
    }

    #[tokio::test]
    async fn upsert_and_search_ranks_by_similarity() {
        let store = InMemoryVectorStore::new();
        store
            .upsert(vec![
                record(0, vec![1.0, 0.0, 0.0], "a.txt", "alpha"),
                record(1, vec![0.0, 1.0, 0.0], "b.txt", "beta"),
            ])
            .await
            .unwrap();

        let hits = store.search(vec![1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "alpha");
        assert!((hits[0].score - 1.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn search_respects_limit() {
        let store = InMemoryVectorStore::new();
        store
            .upsert(vec![
                record(0, vec![1.0, 0.0], "a", "one"),
                record(1, vec![0.9, 0.1], "a", "two"),
                record(2, vec![0.8, 0.2], "a", "three"),
            ])
            .await
            .unwrap();

        let hits = store.search(vec![1.0, 0.0], 2).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn count_reflects_records() {
        let store = InMemoryVectorStore::new();
        assert_eq!(store.count().await.unwrap(), 0);
        store
            .upsert(vec![record(0, vec![1.0], "a", "one")])
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn upsert_calls_are_counted() {
        let store = InMemoryVectorStore::new();
        store
            .upsert(vec![record(0, vec![1.0], "a", "one")])
            .await
            .unwrap();
        store
            .upsert(vec![record(1, vec![1.0], "a", "two")])
            .await
            .unwrap();
        assert_eq!(store.upsert_calls(), 2);
    }

    #[test]
    fn cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &b)).abs() < f32::EPSILON);
    }

    #[test]
    fn cosine_similarity_zero_vector() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).abs() < f32::EPSILON);
    }
}
