use crate::error::RagError;

/// Splits text into overlapping whitespace-token windows.
///
/// Windows start at token offsets `0, stride, 2*stride, …` with
/// `stride = size - overlap`; the final window may be shorter than
/// `size`. Construction rejects `overlap >= size`, which would make
/// the stride non-positive.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    size: usize,
    overlap: usize,
}

impl Chunker {
    /// # Errors
    ///
    /// Returns `RagError::ChunkConfig` when `overlap >= size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self, RagError> {
        if overlap >= size {
            return Err(RagError::ChunkConfig { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    fn stride(self) -> usize {
        self.size - self.overlap
    }

    /// Produce windows in ascending offset order, each joined with
    /// single spaces. Empty windows are filtered out.
    #[must_use]
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        (0..tokens.len())
            .step_by(self.stride())
            .map(|start| {
                let end = (start + self.size).min(tokens.len());
                tokens[start..end].join(" ")
            })
            .filter(|window| !window.trim().is_empty())
            .collect()
    }
}
