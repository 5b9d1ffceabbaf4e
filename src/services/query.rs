//! Query orchestrator: question embedding, page ranking, answer composition.

use std::sync::Arc;
use std::time::Instant;

use crate::error::{QueryError, ValidationError};
use crate::models::{Answer, Config};
use crate::services::composer::{cited_pages, compose};
use crate::services::provider::TextModel;
use crate::services::ranker::rank_pages;
use crate::services::store::PageStore;
use crate::utils::text::truncate_chars;

/// Answers natural-language questions against one stored document.
pub struct QueryPipeline {
    model: Arc<dyn TextModel>,
    store: Arc<PageStore>,
    relevance_threshold: f32,
    max_embed_chars: usize,
}

impl QueryPipeline {
    pub fn new(model: Arc<dyn TextModel>, store: Arc<PageStore>, config: &Config) -> Self {
        Self {
            model,
            store,
            relevance_threshold: config.retrieval.relevance_threshold,
            max_embed_chars: config.ingest.max_embed_chars as usize,
        }
    }

    pub async fn answer(&self, document_id: &str, question: &str) -> Result<Answer, QueryError> {
        let start = Instant::now();

        let document_id = document_id.trim();
        let question = question.trim();
        if document_id.is_empty() {
            return Err(ValidationError::MissingDocumentId.into());
        }
        if question.is_empty() {
            return Err(ValidationError::MissingQuestion.into());
        }
        if !self.store.document_exists(document_id)? {
            return Err(ValidationError::UnknownDocument(document_id.to_string()).into());
        }

        let question_embedding = self
            .model
            .embed(&truncate_chars(question, self.max_embed_chars))
            .await?;
        let pages = self.store.get_pages(document_id)?;
        let ranked = rank_pages(&question_embedding, &pages, self.relevance_threshold)?;
        let text = compose(self.model.as_ref(), question, &ranked).await?;

        Ok(Answer {
            document_id: document_id.to_string(),
            question: question.to_string(),
            cited_pages: cited_pages(&text),
            text,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
