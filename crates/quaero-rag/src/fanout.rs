//! Parallel chunking stage: fans per-document chunking across a
//! bounded worker pool and joins before returning.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use quaero_memory::Document;

use crate::chunker::Chunker;

/// One chunk of text together with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedChunk {
    pub text: String,
    pub source: String,
}

/// Chunk every document on a pool of at most `workers` concurrent
/// tasks, waiting for all of them before returning.
///
/// Ordering across documents follows task completion order; chunks of
/// one document always stay in window-offset order. A document whose
/// task fails contributes zero chunks and never aborts its siblings.
pub async fn chunk_documents(
    documents: Vec<Document>,
    chunker: Chunker,
    workers: usize,
) -> Vec<SourcedChunk> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut join_set = JoinSet::new();

    for document in documents {
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return Vec::new();
            };

            let source = document.metadata.source.clone();
            let content = document.content;
            // Chunking is pure CPU work on owned data, keep it off the
            // async runtime.
            let result = tokio::task::spawn_blocking(move || chunker.chunk(&content)).await;

            match result {
                Ok(windows) => windows
                    .into_iter()
                    .map(|text| SourcedChunk {
                        text,
                        source: source.clone(),
                    })
                    .collect(),
                Err(e) => {
                    tracing::warn!(source, "chunking failed, document skipped: {e}");
                    Vec::new()
                }
            }
        });
    }

    let mut chunks = Vec::new();
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(document_chunks) => chunks.extend(document_chunks),
            Err(e) => tracing::warn!("chunking task panicked: {e}"),
        }
    }

    chunks
}
