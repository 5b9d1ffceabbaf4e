use anyhow::Result;
use console::style;

use crate::cli::output::{StatusInfo, get_formatter};
use crate::models::{Config, OutputFormat};
use crate::services::{API_KEY_ENV, PageStore};

pub async fn handle_status(format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let database_path = config.store.database_path()?;
    let store = PageStore::open(&database_path)?;
    let stats = store.stats()?;

    let api_key_present = std::env::var(API_KEY_ENV)
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false);

    if verbose && format == OutputFormat::Text {
        let marker = if api_key_present {
            style("✓").green()
        } else {
            style("✗").red()
        };
        eprintln!("{} {} {}", marker, API_KEY_ENV, if api_key_present { "set" } else { "not set" });
    }

    let status = StatusInfo {
        database_path: database_path.display().to_string(),
        documents: stats.documents,
        pages: stats.pages,
        provider_url: config.provider.base_url.clone(),
        embedding_model: config.provider.embedding_model.clone(),
        chat_model: config.provider.chat_model.clone(),
        embedding_dimension: config.provider.dimension,
        api_key_present,
        relevance_threshold: config.retrieval.relevance_threshold,
    };

    print!("{}", formatter.format_status(&status));
    Ok(())
}
