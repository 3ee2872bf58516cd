//! Index writes with a process-lifetime id sequence.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use quaero_memory::{IndexRecord, VectorStore};

use crate::batcher::EmbedOutcome;
use crate::error::RagError;
use crate::fanout::SourcedChunk;

/// Counts from one write call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    /// Records persisted to the store.
    pub written: usize,
    /// Chunks dropped because their embedding failed.
    pub skipped: usize,
}

/// Persists embedded chunks, assigning ids from a monotonically
/// increasing sequence owned by the writer. Ids are handed out only at
/// write time and are never reused within the process lifetime.
pub struct IndexWriter {
    store: Arc<dyn VectorStore>,
    next_id: AtomicU64,
}

impl IndexWriter {
    #[must_use]
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self {
            store,
            next_id: AtomicU64::new(0),
        }
    }

    /// Write chunks whose embedding succeeded as one bulk upsert.
    ///
    /// Chunks with a `Failed` outcome are dropped and counted; the
    /// store is not called at all when nothing survives.
    ///
    /// # Errors
    ///
    /// Returns an error if the bulk upsert fails.
    pub async fn write(
        &self,
        chunks: Vec<SourcedChunk>,
        outcomes: Vec<EmbedOutcome>,
    ) -> Result<WriteSummary, RagError> {
        debug_assert_eq!(chunks.len(), outcomes.len());

        let mut records = Vec::with_capacity(chunks.len());
        let mut skipped = 0usize;

        for (chunk, outcome) in chunks.into_iter().zip(outcomes) {
            match outcome {
                EmbedOutcome::Embedded(vector) => {
                    let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                    records.push(IndexRecord {
                        id,
                        vector,
                        source: chunk.source,
                        text: chunk.text,
                    });
                }
                EmbedOutcome::Failed => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "chunks without embeddings were not indexed");
        }

        let written = records.len();
        if written == 0 {
            return Ok(WriteSummary { written, skipped });
        }

        self.store.upsert(records).await?;
        Ok(WriteSummary { written, skipped })
    }
}
