mod composer;
mod extractor;
mod ingest;
mod metadata;
mod provider;
mod query;
mod ranker;
mod similarity;
mod store;

pub use composer::{NO_RELEVANT_CONTENT_ANSWER, cited_pages, compose};
pub use extractor::extract_pages;
pub use ingest::Ingestor;
pub use metadata::{MAX_KEYWORDS, generate_metadata};
pub use provider::{API_KEY_ENV, OpenAiProvider, TextModel};
pub use query::QueryPipeline;
pub use ranker::rank_pages;
pub use similarity::cosine_similarity;
pub use store::{PageStore, StoreStats};
