//! Document acquisition and vector storage for the Quaero pipeline.

pub mod document;
pub mod in_memory_store;
pub mod qdrant;
pub mod vector_store;

pub use document::{CorpusScanner, Document, DocumentError, DocumentLoader, DocumentMetadata};
pub use in_memory_store::InMemoryVectorStore;
pub use qdrant::QdrantStore;
pub use vector_store::{IndexRecord, SearchHit, VectorStore, VectorStoreError};
