use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat};
use crate::services::{OpenAiProvider, PageStore, QueryPipeline, TextModel};

#[derive(Debug, Args)]
pub struct AskArgs {
    #[arg(required = true, help = "Document identifier (see `pdfqa list`)")]
    pub document_id: String,

    #[arg(required = true, help = "Question to ask about the document")]
    pub question: String,
}

pub async fn handle_ask(args: AskArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let store = Arc::new(PageStore::open(&config.store.database_path()?)?);
    let model: Arc<dyn TextModel> = Arc::new(OpenAiProvider::new(&config.provider)?);
    let pipeline = QueryPipeline::new(model, store, &config);

    if verbose {
        eprintln!("Question: \"{}\"", args.question.trim());
        eprintln!("  Document: {}", args.document_id.trim());
        eprintln!(
            "  Relevance threshold: {:.2}",
            config.retrieval.relevance_threshold
        );
    }

    let answer = pipeline.answer(&args.document_id, &args.question).await?;

    if verbose {
        eprintln!("  Answered in {}ms", answer.duration_ms);
        eprintln!();
    }

    print!("{}", formatter.format_answer(&answer));
    Ok(())
}
