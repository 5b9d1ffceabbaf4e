//! Error types for the PDF question-answering pipeline.

use thiserror::Error;

/// Errors raised while extracting text from a PDF byte stream.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("not a readable PDF document: {0}")]
    InvalidDocument(String),

    #[error("document contains no pages")]
    EmptyDocument,
}

/// Errors raised by the embedding endpoint of the model provider.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("failed to build provider client: {0}")]
    ClientError(String),

    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("embedding request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("embedding provider returned status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("embedding task failed: {0}")]
    TaskFailed(String),

    #[error("embedding request timed out")]
    Timeout,
}

/// Errors raised by the completion endpoint of the model provider.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("completion request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("completion provider returned status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("invalid completion response: {0}")]
    InvalidResponse(String),

    #[error("completion request timed out")]
    Timeout,
}

/// Errors raised when comparing embedding vectors.
#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Errors raised by the page store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("embedding (de)serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store path error: {0}")]
    PathError(String),
}

/// Errors raised while composing a grounded answer.
#[derive(Debug, Error)]
pub enum CompositionError {
    #[error("answer generation failed: {0}")]
    Generation(#[from] GenerationError),
}

/// Input validation errors, caught before any provider I/O.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("question text is required")]
    MissingQuestion,

    #[error("document identifier is required")]
    MissingDocumentId,

    #[error("unknown document: {0}")]
    UnknownDocument(String),
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("path error: {0}")]
    PathError(String),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Errors raised during document ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised while answering a question.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("composition error: {0}")]
    Composition(#[from] CompositionError),
}

/// Application-level errors that wrap domain errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("query error: {0}")]
    Query(#[from] QueryError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Other(String),
}
