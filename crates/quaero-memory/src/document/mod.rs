pub mod error;
pub mod loader;
pub mod scanner;
pub mod types;

pub use error::DocumentError;
pub use loader::{PdfLoader, TextLoader};
pub use scanner::CorpusScanner;
pub use types::{Document, DocumentMetadata};

/// Default maximum file size: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Per-format opaque decoder: turns one file into a document.
pub trait DocumentLoader: Send + Sync {
    fn load(
        &self,
        path: &std::path::Path,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Document, DocumentError>> + Send + '_>,
    >;

    fn supported_extensions(&self) -> &[&str];
}
