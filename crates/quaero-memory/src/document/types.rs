#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// File name the content came from, carried into chunk provenance
    /// and answer citations.
    pub source: String,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}
