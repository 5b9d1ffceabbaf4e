//! CLI module for the PDF question-answering tool.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::models::OutputFormat;

/// Ask questions about PDF documents with cited answers.
#[derive(Debug, Parser)]
#[command(name = "pdfqa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(
        long,
        short = 'f',
        global = true,
        help = "Output format: text, json, or markdown"
    )]
    pub format: Option<OutputFormat>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ingest a PDF file (or every PDF under a directory)
    Ingest(commands::IngestArgs),

    /// Ask a question about an ingested document
    Ask(commands::AskArgs),

    /// List ingested documents
    List,

    /// Delete a document and all of its pages
    Delete(commands::DeleteArgs),

    /// Show store and provider status
    Status,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::ConfigCommand),
}
