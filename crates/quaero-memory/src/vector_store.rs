use std::future::Future;
use std::pin::Pin;

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("collection error: {0}")]
    Collection(String),
    #[error("upsert error: {0}")]
    Upsert(String),
    #[error("search error: {0}")]
    Search(String),
    #[error("count error: {0}")]
    Count(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Unit persisted into the store: one embedded chunk with its
/// provenance. `text` is never empty for a persisted record.
#[derive(Debug, Clone)]
pub struct IndexRecord {
    pub id: u64,
    pub vector: Vec<f32>,
    pub source: String,
    pub text: String,
}

/// One retrieval result, ranked by the store's similarity metric.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub text: String,
    pub source: String,
    pub score: f32,
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Similarity-searchable index over embedded chunks. Implementations
/// are bound to a single collection at construction.
pub trait VectorStore: Send + Sync {
    /// Create the collection with the given vector dimensionality if it
    /// does not exist yet. Idempotent.
    fn ensure_collection(&self, vector_size: u64) -> BoxFuture<'_, Result<(), VectorStoreError>>;

    /// Bulk-insert records.
    fn upsert(&self, records: Vec<IndexRecord>) -> BoxFuture<'_, Result<(), VectorStoreError>>;

    /// Nearest-neighbor lookup by cosine similarity, best first.
    fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
    ) -> BoxFuture<'_, Result<Vec<SearchHit>, VectorStoreError>>;

    /// Number of records currently in the collection.
    fn count(&self) -> BoxFuture<'_, Result<u64, VectorStoreError>>;
}
