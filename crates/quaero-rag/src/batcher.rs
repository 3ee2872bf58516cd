//! Sequential batched embedding with per-batch degradation.

use std::sync::Arc;

use quaero_llm::EmbeddingProvider;

/// Result of embedding one chunk. A failed batch marks every chunk in
/// it as `Failed` instead of aborting the build; downstream code must
/// decide explicitly what to do with failures.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedOutcome {
    Embedded(Vec<f32>),
    Failed,
}

impl EmbedOutcome {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Groups chunk texts into fixed-size batches and submits them to the
/// embedding service strictly one after another, bounding load on the
/// service and keeping progress logs monotonic.
pub struct EmbeddingBatcher<E> {
    provider: Arc<E>,
    batch_size: usize,
}

impl<E: EmbeddingProvider> EmbeddingBatcher<E> {
    #[must_use]
    pub fn new(provider: Arc<E>, batch_size: usize) -> Self {
        Self {
            provider,
            batch_size: batch_size.max(1),
        }
    }

    /// Embed all texts. The returned list always has one outcome per
    /// input text, in input order; this call never fails as a whole.
    pub async fn embed_all(&self, texts: &[String]) -> Vec<EmbedOutcome> {
        if texts.is_empty() {
            return Vec::new();
        }

        let total_batches = texts.len().div_ceil(self.batch_size);
        let mut outcomes = Vec::with_capacity(texts.len());

        for (index, batch) in texts.chunks(self.batch_size).enumerate() {
            match self.provider.embed_batch(batch).await {
                Ok(vectors) => {
                    outcomes.extend(vectors.into_iter().map(|vector| {
                        // An empty vector is the service's per-item
                        // failure marker.
                        if vector.is_empty() {
                            EmbedOutcome::Failed
                        } else {
                            EmbedOutcome::Embedded(vector)
                        }
                    }));
                    tracing::info!(
                        batch = index + 1,
                        total = total_batches,
                        size = batch.len(),
                        "embedded batch"
                    );
                }
                Err(e) => {
                    outcomes.extend(std::iter::repeat_n(EmbedOutcome::Failed, batch.len()));
                    tracing::warn!(
                        batch = index + 1,
                        total = total_batches,
                        "embedding batch failed, chunks marked failed: {e}"
                    );
                }
            }
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quaero_llm::mock::MockEmbedder;

    fn texts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("chunk {i}")).collect()
    }

    #[tokio::test]
    async fn batches_are_submitted_sequentially_in_order() {
        let embedder = Arc::new(MockEmbedder::new());
        let batcher = EmbeddingBatcher::new(Arc::clone(&embedder), 2);

        let outcomes = batcher.embed_all(&texts(5)).await;

        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(|o| !o.is_failed()));
        // 5 texts at batch size 2 -> batches of 2, 2, 1
        let calls = embedder.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], vec!["chunk 0".to_owned(), "chunk 1".to_owned()]);
        assert_eq!(calls[2], vec!["chunk 4".to_owned()]);
    }

    #[tokio::test]
    async fn failed_batch_degrades_without_aborting() {
        let embedder = Arc::new(MockEmbedder::new().failing_on_call(1));
        let batcher = EmbeddingBatcher::new(embedder, 2);

        let outcomes = batcher.embed_all(&texts(6)).await;

        assert_eq!(outcomes.len(), 6);
        assert!(!outcomes[0].is_failed());
        assert!(!outcomes[1].is_failed());
        assert!(outcomes[2].is_failed());
        assert!(outcomes[3].is_failed());
        assert!(!outcomes[4].is_failed());
        assert!(!outcomes[5].is_failed());
    }

    #[tokio::test]
    async fn all_batches_failing_still_returns_full_length() {
        let embedder = Arc::new(MockEmbedder::failing());
        let batcher = EmbeddingBatcher::new(embedder, 4);

        let outcomes = batcher.embed_all(&texts(10)).await;
        assert_eq!(outcomes.len(), 10);
        assert!(outcomes.iter().all(EmbedOutcome::is_failed));
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let embedder = Arc::new(MockEmbedder::new());
        let batcher = EmbeddingBatcher::new(Arc::clone(&embedder), 4);

        let outcomes = batcher.embed_all(&[]).await;
        assert!(outcomes.is_empty());
        assert_eq!(embedder.call_count(), 0);
    }
}
