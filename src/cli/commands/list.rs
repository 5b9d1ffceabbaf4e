use anyhow::Result;

use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat};
use crate::services::PageStore;

pub async fn handle_list(format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let store = PageStore::open(&config.store.database_path()?)?;
    let documents = store.list_documents()?;

    if verbose {
        eprintln!("{} document(s) in store", documents.len());
    }

    print!("{}", formatter.format_documents(&documents));
    Ok(())
}
