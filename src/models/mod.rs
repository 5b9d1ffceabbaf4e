mod config;
mod document;
mod format;
mod report;

pub use config::{
    Config, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_DIMENSION, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_PROVIDER_URL, DEFAULT_RELEVANCE_THRESHOLD, IngestConfig, ProviderConfig,
    RetrievalConfig, StoreConfig,
};
pub use document::{
    DocumentMetadata, DocumentRecord, MetadataOutcome, Page, PageText, RankedPage, document_id,
};
pub use format::OutputFormat;
pub use report::{Answer, IngestReport};
