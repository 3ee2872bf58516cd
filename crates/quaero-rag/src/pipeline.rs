//! Pipeline orchestration: index builds and question answering.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use quaero_llm::{EmbeddingProvider, GenerationProvider};
use quaero_memory::{CorpusScanner, VectorStore};

use crate::batcher::EmbeddingBatcher;
use crate::chunker::Chunker;
use crate::composer::{self, AnswerComposer};
use crate::config::Config;
use crate::error::RagError;
use crate::fanout::chunk_documents;
use crate::retriever::{RetrievalOutcome, Retriever};
use crate::writer::IndexWriter;

/// Fixed reply when the question itself could not be embedded.
pub const EMBEDDING_FAILED_ANSWER: &str =
    "The question could not be processed. Check the embedding service.";

/// Fixed reply when retrieval finds nothing relevant.
pub const NO_CONTEXT_ANSWER: &str =
    "No relevant information was found in the indexed sources to answer your question.";

/// Summary of one index build.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexReport {
    pub documents: usize,
    pub chunks: usize,
    pub written: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}

/// Orchestrates build (scan → chunk → embed → write) and query
/// (retrieve → compose). Queries only read shared state, so one
/// pipeline value serves concurrent callers without locking.
pub struct RagPipeline<E, G> {
    scanner: CorpusScanner,
    chunker: Chunker,
    workers: usize,
    batcher: EmbeddingBatcher<E>,
    writer: IndexWriter,
    retriever: Retriever<E>,
    composer: AnswerComposer<G>,
}

impl<E, G> RagPipeline<E, G>
where
    E: EmbeddingProvider,
    G: GenerationProvider,
{
    /// # Errors
    ///
    /// Returns `RagError::ChunkConfig` when the configured chunk
    /// geometry is invalid.
    pub fn new(
        config: &Config,
        embedder: E,
        generator: G,
        store: Arc<dyn VectorStore>,
    ) -> Result<Self, RagError> {
        let chunker = Chunker::new(config.chunking.size, config.chunking.overlap)?;
        let embedder = Arc::new(embedder);

        Ok(Self {
            scanner: CorpusScanner::new(
                config.documents.roots.iter().map(PathBuf::from).collect(),
            ),
            chunker,
            workers: config.chunking.workers,
            batcher: EmbeddingBatcher::new(Arc::clone(&embedder), config.embedding.batch_size),
            writer: IndexWriter::new(Arc::clone(&store)),
            retriever: Retriever::new(embedder, store, config.retrieval.top_k),
            composer: AnswerComposer::new(
                Arc::new(generator),
                config.generation.system_prompt.clone(),
            ),
        })
    }

    /// Build the index once: scan, chunk in parallel, embed in
    /// sequential batches, write in one bulk upsert.
    ///
    /// An empty corpus or zero chunks finish early with a warning and
    /// leave the store untouched.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store write fails; collaborator
    /// failures upstream degrade per document or per batch.
    pub async fn build_index(&self) -> Result<IndexReport, RagError> {
        let start = Instant::now();
        let mut report = IndexReport::default();

        let documents = self.scanner.scan().await;
        if documents.is_empty() {
            tracing::warn!("no documents found, index left unchanged");
            report.duration_ms = elapsed_ms(start);
            return Ok(report);
        }
        report.documents = documents.len();

        let chunks = chunk_documents(documents, self.chunker, self.workers).await;
        if chunks.is_empty() {
            tracing::warn!("no chunks produced, index left unchanged");
            report.duration_ms = elapsed_ms(start);
            return Ok(report);
        }
        report.chunks = chunks.len();

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let outcomes = self.batcher.embed_all(&texts).await;

        let summary = self.writer.write(chunks, outcomes).await?;
        report.written = summary.written;
        report.skipped = summary.skipped;
        report.duration_ms = elapsed_ms(start);

        tracing::info!(
            documents = report.documents,
            chunks = report.chunks,
            written = report.written,
            skipped = report.skipped,
            ms = report.duration_ms,
            "index build finished"
        );
        Ok(report)
    }

    /// Answer a question. Always returns a non-empty string: every
    /// downstream failure maps to one of the fixed fallback replies.
    pub async fn query(&self, question: &str) -> String {
        let preview: String = question.chars().take(80).collect();
        tracing::info!(question = %preview, "received question");

        match self.retriever.retrieve(question).await {
            RetrievalOutcome::EmbeddingUnavailable => EMBEDDING_FAILED_ANSWER.to_owned(),
            RetrievalOutcome::StoreUnavailable => composer::APOLOGY.to_owned(),
            RetrievalOutcome::Hits(hits) => {
                if hits.is_empty() {
                    NO_CONTEXT_ANSWER.to_owned()
                } else {
                    self.composer.compose(question, &hits).await
                }
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis().try_into().unwrap_or(u64::MAX)
}
