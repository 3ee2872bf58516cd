//! Indexing and question answering pipeline: corpus scan, parallel
//! chunking, batched embedding, index writes, retrieval, and answer
//! composition with graceful degradation.

pub mod batcher;
pub mod chunker;
pub mod composer;
pub mod config;
pub mod error;
pub mod fanout;
pub mod pipeline;
pub mod retriever;
pub mod writer;

pub use batcher::{EmbedOutcome, EmbeddingBatcher};
pub use chunker::Chunker;
pub use composer::AnswerComposer;
pub use config::Config;
pub use error::RagError;
pub use fanout::SourcedChunk;
pub use pipeline::{IndexReport, RagPipeline};
pub use retriever::{RetrievalOutcome, Retriever};
pub use writer::IndexWriter;
