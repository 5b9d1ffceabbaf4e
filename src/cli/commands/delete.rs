use anyhow::Result;
use clap::Args;

use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat};
use crate::services::PageStore;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(required = true, help = "Document identifier to delete")]
    pub document_id: String,

    #[arg(long, short = 'y', help = "Skip confirmation prompt")]
    pub yes: bool,
}

pub async fn handle_delete(args: DeleteArgs, format: OutputFormat, _verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    if !args.yes {
        println!(
            "This will delete document '{}' and all of its pages. Continue? [y/N]",
            args.document_id
        );
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.format_message("Cancelled."));
            return Ok(());
        }
    }

    let store = PageStore::open(&config.store.database_path()?)?;
    let removed = store.delete_document(&args.document_id)?;

    if removed {
        println!(
            "{}",
            formatter.format_message(&format!("Deleted document '{}'", args.document_id))
        );
    } else {
        println!(
            "{}",
            formatter.format_message(&format!("No document with id '{}'", args.document_id))
        );
    }

    Ok(())
}
