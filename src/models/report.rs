//! CLI-facing result containers for ingestion and question answering.

use serde::{Deserialize, Serialize};

use super::document::DocumentMetadata;

/// Result of ingesting one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub document_id: String,
    pub file_name: String,
    pub pages_stored: u32,
    /// Present only when metadata generation parsed successfully.
    pub metadata: Option<DocumentMetadata>,
    pub duration_ms: u64,
}

/// Result of answering a question against a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub document_id: String,
    pub question: String,
    /// Generated text, verbatim, with inline `[Page N]` citations.
    pub text: String,
    /// Distinct page numbers cited in the answer, in first-appearance order.
    pub cited_pages: Vec<u32>,
    pub duration_ms: u64,
}
