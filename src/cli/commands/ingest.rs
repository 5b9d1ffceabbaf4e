//! Ingest command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use crate::cli::output::get_formatter;
use crate::models::{Config, IngestReport, OutputFormat};
use crate::services::{Ingestor, OpenAiProvider, PageStore, TextModel};
use crate::utils::file::{is_pdf_file, read_file_bytes};

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// PDF file, or a directory to scan recursively for PDFs
    #[arg(required = true)]
    pub path: PathBuf,
}

pub async fn handle_ingest(args: IngestArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let path = args.path.canonicalize().context("invalid path")?;
    let single_file = path.is_file();
    let files = collect_pdf_files(&path)?;

    if files.is_empty() {
        anyhow::bail!("no PDF files found under {}", path.display());
    }

    if verbose {
        eprintln!("Found {} PDF file(s) to ingest", files.len());
    }

    let store = Arc::new(PageStore::open(&config.store.database_path()?)?);
    let model: Arc<dyn TextModel> = Arc::new(OpenAiProvider::new(&config.provider)?);
    let ingestor = Ingestor::new(model, store, &config);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut reports: Vec<IngestReport> = Vec::new();
    let mut failures: Vec<(PathBuf, String)> = Vec::new();

    for file_path in &files {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());
        pb.set_message(file_name.clone());

        match read_file_bytes(file_path, config.ingest.max_file_size) {
            Ok(bytes) => match ingestor.ingest(&file_name, &bytes).await {
                Ok(report) => reports.push(report),
                Err(e) => failures.push((file_path.clone(), e.to_string())),
            },
            Err(e) => failures.push((file_path.clone(), e.to_string())),
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    // A single-file ingest is one request: its failure fails the command.
    // A directory run is many independent requests: report and continue.
    if single_file && let Some((_, reason)) = failures.first() {
        anyhow::bail!("failed to ingest {}: {}", path.display(), reason);
    }

    for (file_path, reason) in &failures {
        eprint!(
            "{}",
            formatter.format_error(&format!("{}: {}", file_path.display(), reason))
        );
    }

    print!("{}", formatter.format_ingest_reports(&reports));
    Ok(())
}

fn collect_pdf_files(path: &PathBuf) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.clone()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.context("failed to read directory entry")?;
        if entry.path().is_file() && is_pdf_file(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
