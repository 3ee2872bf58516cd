//! Recursive corpus discovery over configured root directories.

use std::path::{Path, PathBuf};

use super::loader::{PdfLoader, TextLoader};
use super::{Document, DocumentLoader};

/// Walks the configured roots and decodes every supported file.
///
/// Decode failures never abort a scan: a file that cannot be read, or
/// that decodes to whitespace-only content, is logged and skipped.
pub struct CorpusScanner {
    roots: Vec<PathBuf>,
    text: TextLoader,
    pdf: PdfLoader,
}

impl CorpusScanner {
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            text: TextLoader::default(),
            pdf: PdfLoader::default(),
        }
    }

    fn loader_for(&self, path: &Path) -> Option<&dyn DocumentLoader> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)?;
        if self.text.supported_extensions().contains(&ext.as_str()) {
            return Some(&self.text);
        }
        if self.pdf.supported_extensions().contains(&ext.as_str()) {
            return Some(&self.pdf);
        }
        None
    }

    /// Scan all roots and return every successfully decoded, non-empty
    /// document. An empty result is a valid outcome, not an error.
    pub async fn scan(&self) -> Vec<Document> {
        let mut documents = Vec::new();

        for root in &self.roots {
            if !root.exists() {
                tracing::warn!(root = %root.display(), "document root not found, skipping");
                continue;
            }

            let entries: Vec<PathBuf> = ignore::WalkBuilder::new(root)
                .standard_filters(false)
                .build()
                .flatten()
                .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
                .map(ignore::DirEntry::into_path)
                .collect();

            for path in entries {
                let Some(loader) = self.loader_for(&path) else {
                    continue;
                };
                match loader.load(&path).await {
                    Ok(doc) if doc.content.trim().is_empty() => {
                        tracing::warn!(file = %path.display(), "empty or unreadable, skipping");
                    }
                    Ok(doc) => documents.push(doc),
                    Err(e) => {
                        tracing::warn!(file = %path.display(), "failed to decode, skipping: {e}");
                    }
                }
            }
        }

        tracing::info!(documents = documents.len(), "corpus scan finished");
        documents
    }
}
