use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RagError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentsConfig {
    /// Root directories scanned recursively for supported files.
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
        }
    }
}

fn default_roots() -> Vec<String> {
    vec!["data".into()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    /// Window length in whitespace tokens.
    #[serde(default = "default_chunk_size")]
    pub size: usize,
    /// Tokens shared between consecutive windows. Must stay below `size`.
    #[serde(default = "default_chunk_overlap")]
    pub overlap: usize,
    /// Concurrent chunking workers during index builds.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            size: default_chunk_size(),
            overlap: default_chunk_overlap(),
            workers: default_workers(),
        }
    }
}

fn default_chunk_size() -> usize {
    512
}

fn default_chunk_overlap() -> usize {
    100
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    /// Embedding service endpoint. Required.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            batch_size: default_batch_size(),
            timeout_secs: default_embedding_timeout(),
        }
    }
}

fn default_batch_size() -> usize {
    32
}

fn default_embedding_timeout() -> u64 {
    90
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Generation service endpoint. Required.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_generation_timeout(),
            system_prompt: default_system_prompt(),
        }
    }
}

fn default_generation_timeout() -> u64 {
    6000
}

fn default_system_prompt() -> String {
    "You are a documentation assistant. Answer strictly from the provided context. \
     When the context cites a specific rule or section, name it in your answer. \
     If the context does not contain the answer, say so instead of guessing."
        .into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_qdrant_url")]
    pub qdrant_url: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            qdrant_url: default_qdrant_url(),
            collection: default_collection(),
        }
    }
}

fn default_qdrant_url() -> String {
    "http://localhost:6334".into()
}

fn default_collection() -> String {
    "rag_documents".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Number of top-ranked chunks fetched per question.
    #[serde(default = "default_top_k")]
    pub top_k: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> u64 {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            max_body_size: default_max_body_size(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_size() -> usize {
    1_048_576
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, RagError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str::<Self>(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("QUAERO_DOCUMENT_ROOTS") {
            self.documents.roots = v
                .split(',')
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = std::env::var("QUAERO_CHUNK_SIZE")
            && let Ok(n) = v.parse::<usize>()
        {
            self.chunking.size = n;
        }
        if let Ok(v) = std::env::var("QUAERO_CHUNK_OVERLAP")
            && let Ok(n) = v.parse::<usize>()
        {
            self.chunking.overlap = n;
        }
        if let Ok(v) = std::env::var("QUAERO_CHUNK_WORKERS")
            && let Ok(n) = v.parse::<usize>()
        {
            self.chunking.workers = n;
        }
        if let Ok(v) = std::env::var("QUAERO_EMBEDDING_URL") {
            self.embedding.url = v;
        }
        if let Ok(v) = std::env::var("QUAERO_EMBEDDING_BATCH_SIZE")
            && let Ok(n) = v.parse::<usize>()
        {
            self.embedding.batch_size = n;
        }
        if let Ok(v) = std::env::var("QUAERO_EMBEDDING_TIMEOUT")
            && let Ok(secs) = v.parse::<u64>()
        {
            self.embedding.timeout_secs = secs;
        }
        if let Ok(v) = std::env::var("QUAERO_GENERATION_URL") {
            self.generation.url = v;
        }
        if let Ok(v) = std::env::var("QUAERO_GENERATION_TIMEOUT")
            && let Ok(secs) = v.parse::<u64>()
        {
            self.generation.timeout_secs = secs;
        }
        if let Ok(v) = std::env::var("QUAERO_QDRANT_URL") {
            self.store.qdrant_url = v;
        }
        if let Ok(v) = std::env::var("QUAERO_COLLECTION") {
            self.store.collection = v;
        }
        if let Ok(v) = std::env::var("QUAERO_TOP_K")
            && let Ok(k) = v.parse::<u64>()
        {
            self.retrieval.top_k = k;
        }
        if let Ok(v) = std::env::var("QUAERO_GATEWAY_BIND") {
            self.gateway.bind = v;
        }
        if let Ok(v) = std::env::var("QUAERO_GATEWAY_PORT")
            && let Ok(port) = v.parse::<u16>()
        {
            self.gateway.port = port;
        }
    }

    /// Reject configurations the pipeline must not start with.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid chunk geometry, zero-sized worker
    /// or batch settings, or missing service endpoints.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.chunking.overlap >= self.chunking.size {
            return Err(RagError::ChunkConfig {
                size: self.chunking.size,
                overlap: self.chunking.overlap,
            });
        }
        if self.chunking.workers == 0 {
            return Err(RagError::InvalidConfiguration("chunking.workers"));
        }
        if self.embedding.batch_size == 0 {
            return Err(RagError::InvalidConfiguration("embedding.batch_size"));
        }
        if self.retrieval.top_k == 0 {
            return Err(RagError::InvalidConfiguration("retrieval.top_k"));
        }
        if self.embedding.url.is_empty() {
            return Err(RagError::MissingConfiguration("embedding.url"));
        }
        if self.generation.url.is_empty() {
            return Err(RagError::MissingConfiguration("generation.url"));
        }
        Ok(())
    }
}
