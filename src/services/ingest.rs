//! Ingestion orchestrator: extraction, embedding, storage, metadata.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;

use crate::error::{EmbeddingError, IngestError};
use crate::models::{
    Config, IngestReport, MetadataOutcome, Page, PageText, document_id,
};
use crate::services::extractor::extract_pages;
use crate::services::metadata::generate_metadata;
use crate::services::provider::TextModel;
use crate::services::store::PageStore;
use crate::utils::text::truncate_chars;

/// Turns uploaded PDF bytes into stored, searchable page records plus
/// document metadata.
///
/// The contract is all-or-nothing: pages are persisted only after every
/// page embedding has succeeded, so a failed ingestion leaves no partial
/// document behind to silently degrade retrieval recall.
pub struct Ingestor {
    model: Arc<dyn TextModel>,
    store: Arc<PageStore>,
    dimension: usize,
    max_concurrency: usize,
    max_embed_chars: usize,
}

impl Ingestor {
    pub fn new(model: Arc<dyn TextModel>, store: Arc<PageStore>, config: &Config) -> Self {
        Self {
            model,
            store,
            dimension: config.provider.dimension as usize,
            max_concurrency: (config.ingest.max_concurrency as usize).max(1),
            max_embed_chars: config.ingest.max_embed_chars as usize,
        }
    }

    /// Ingest a PDF byte stream: extract, embed, persist, enrich.
    pub async fn ingest(&self, file_name: &str, bytes: &[u8]) -> Result<IngestReport, IngestError> {
        let document_id = document_id(bytes);
        let pages = extract_pages(bytes)?;
        self.ingest_pages(&document_id, file_name, pages).await
    }

    /// Ingest already-extracted pages under the given document id.
    pub async fn ingest_pages(
        &self,
        document_id: &str,
        file_name: &str,
        pages: Vec<PageText>,
    ) -> Result<IngestReport, IngestError> {
        let start = Instant::now();

        let embeddings = self.embed_pages(&pages).await?;

        let stored: Vec<Page> = pages
            .iter()
            .zip(embeddings)
            .map(|(page, embedding)| Page {
                number: page.number,
                text: page.text.clone(),
                embedding,
            })
            .collect();

        self.store
            .put_document_pages(document_id, file_name, &stored)?;

        let metadata = match generate_metadata(self.model.as_ref(), &pages).await {
            MetadataOutcome::Parsed(metadata) => {
                self.store.put_document_metadata(document_id, &metadata)?;
                Some(metadata)
            }
            MetadataOutcome::Unavailable => None,
        };

        Ok(IngestReport {
            document_id: document_id.to_string(),
            file_name: file_name.to_string(),
            pages_stored: stored.len() as u32,
            metadata,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Embed every page, issuing at most `max_concurrency` provider calls
    /// at a time. The first failure aborts the in-flight siblings and the
    /// whole ingestion.
    ///
    /// Pages without extractable text are not sent to the provider (its
    /// contract requires non-empty input); they receive a zero vector,
    /// which ranks as maximally dissimilar and can never be cited.
    async fn embed_pages(&self, pages: &[PageText]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut by_index: BTreeMap<usize, Vec<f32>> = BTreeMap::new();
        let mut base = 0;

        for window in pages.chunks(self.max_concurrency) {
            let mut tasks = JoinSet::new();

            for (offset, page) in window.iter().enumerate() {
                let index = base + offset;
                if page.text.is_empty() {
                    by_index.insert(index, vec![0.0; self.dimension]);
                    continue;
                }

                let model = Arc::clone(&self.model);
                let text = truncate_chars(&page.text, self.max_embed_chars);
                tasks.spawn(async move { (index, model.embed(&text).await) });
            }

            while let Some(joined) = tasks.join_next().await {
                let (index, result) =
                    joined.map_err(|e| EmbeddingError::TaskFailed(e.to_string()))?;
                match result {
                    Ok(vector) => {
                        if vector.len() != self.dimension {
                            tasks.abort_all();
                            return Err(EmbeddingError::InvalidResponse(format!(
                                "expected {} dimensions, got {}",
                                self.dimension,
                                vector.len()
                            )));
                        }
                        by_index.insert(index, vector);
                    }
                    Err(e) => {
                        tasks.abort_all();
                        return Err(e);
                    }
                }
            }

            base += window.len();
        }

        if by_index.len() != pages.len() {
            return Err(EmbeddingError::TaskFailed(
                "missing page embedding".to_string(),
            ));
        }
        Ok(by_index.into_values().collect())
    }
}
