#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {status}")]
    Status { status: u16 },

    #[error("embedding count mismatch: sent {sent} texts, got {got} vectors")]
    LengthMismatch { sent: usize, got: usize },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LlmError>;
