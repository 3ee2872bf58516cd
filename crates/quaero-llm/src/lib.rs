//! Clients for the opaque embedding and generation model services.

pub mod embedding;
pub mod error;
pub mod generation;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod provider;

pub use embedding::HttpEmbedder;
pub use error::LlmError;
pub use generation::HttpGenerator;
pub use provider::{EmbeddingProvider, GenerationProvider};
