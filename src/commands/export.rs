use std::path::Path;

use agenda_core::AgendaStore;
use agenda_core::transfer::write_export;
use anyhow::{Context, Result};
use chrono::Local;
use owo_colors::OwoColorize;

pub async fn run(store: &AgendaStore, dir: &Path) -> Result<()> {
    let path = write_export(store, dir, Local::now().date_naive())
        .await
        .with_context(|| format!("Failed to write backup into {}", dir.display()))?;

    println!("{}", format!("  Exported to {}", path.display()).green());
    Ok(())
}
