use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagError {
    #[error("chunk overlap {overlap} must be smaller than chunk size {size}")]
    ChunkConfig { size: usize, overlap: usize },

    #[error("missing required configuration: {0}")]
    MissingConfiguration(&'static str),

    #[error("configuration value out of range: {0}")]
    InvalidConfiguration(&'static str),

    #[error("failed to read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("storage error: {0}")]
    Store(#[from] quaero_memory::VectorStoreError),
}
