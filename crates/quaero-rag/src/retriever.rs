//! Question embedding and top-K similarity lookup.

use std::sync::Arc;

use quaero_llm::EmbeddingProvider;
use quaero_memory::{SearchHit, VectorStore};

/// Outcome of a retrieval attempt. Only `Hits` reached the store.
#[derive(Debug)]
pub enum RetrievalOutcome {
    /// The question could not be embedded; the store and the
    /// generation service were never contacted.
    EmbeddingUnavailable,
    /// The store lookup itself failed.
    StoreUnavailable,
    /// Ranked results, possibly empty.
    Hits(Vec<SearchHit>),
}

pub struct Retriever<E> {
    provider: Arc<E>,
    store: Arc<dyn VectorStore>,
    top_k: u64,
}

impl<E: EmbeddingProvider> Retriever<E> {
    #[must_use]
    pub fn new(provider: Arc<E>, store: Arc<dyn VectorStore>, top_k: u64) -> Self {
        Self {
            provider,
            store,
            top_k,
        }
    }

    /// Embed the question as a single-item batch and look up the
    /// `top_k` most similar chunks.
    pub async fn retrieve(&self, question: &str) -> RetrievalOutcome {
        let vector = match self.provider.embed_batch(&[question.to_owned()]).await {
            Ok(mut vectors) if !vectors.is_empty() => vectors.swap_remove(0),
            Ok(_) => Vec::new(),
            Err(e) => {
                tracing::warn!("question embedding failed: {e}");
                return RetrievalOutcome::EmbeddingUnavailable;
            }
        };

        if vector.is_empty() {
            tracing::warn!("question embedding came back empty");
            return RetrievalOutcome::EmbeddingUnavailable;
        }

        match self.store.search(vector, self.top_k).await {
            Ok(hits) => RetrievalOutcome::Hits(hits),
            Err(e) => {
                tracing::error!("store lookup failed: {e}");
                RetrievalOutcome::StoreUnavailable
            }
        }
    }
}
