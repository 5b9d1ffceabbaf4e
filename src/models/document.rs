use serde::{Deserialize, Serialize};

/// A persisted document and its generated metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub file_name: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub keywords: Vec<String>,
    pub created_at: String,
}

/// One page of extracted text, before embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-indexed, matching source pagination.
    pub number: u32,
    pub text: String,
}

/// A stored page: text plus its embedding vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub number: u32,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A page scored against a question embedding. Ephemeral, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPage {
    pub number: u32,
    pub text: String,
    pub similarity: f32,
}

/// Title/summary/keywords derived from a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub summary: String,
    pub keywords: Vec<String>,
}

/// Outcome of metadata generation. Metadata is an enrichment: when the
/// model's output cannot be parsed (or the provider fails), ingestion
/// proceeds without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOutcome {
    Parsed(DocumentMetadata),
    Unavailable,
}

/// Derive a stable document identifier from the uploaded bytes.
pub fn document_id(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let hash = Sha256::digest(bytes);
    hex::encode(&hash[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_stable() {
        let id = document_id(b"some pdf bytes");
        assert_eq!(id.len(), 32);
        assert_eq!(id, document_id(b"some pdf bytes"));
        assert_ne!(id, document_id(b"other pdf bytes"));
    }

    #[test]
    fn test_metadata_outcome() {
        let outcome = MetadataOutcome::Parsed(DocumentMetadata {
            title: "T".to_string(),
            summary: "S".to_string(),
            keywords: vec!["k".to_string()],
        });
        assert_ne!(outcome, MetadataOutcome::Unavailable);
    }
}
