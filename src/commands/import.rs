use std::path::Path;

use agenda_core::AgendaStore;
use agenda_core::transfer::read_import;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

pub async fn run(store: &AgendaStore, file: &Path) -> Result<()> {
    let count = read_import(store, file)
        .await
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!("{}", format!("  Imported {} agendas", count).green());
    Ok(())
}
