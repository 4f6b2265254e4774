use agenda_core::AgendaStore;
use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::report_total;

pub fn run(store: &AgendaStore, id: &str, yes: bool) -> Result<()> {
    // delete() reports success even for unknown ids, so check first
    let Some(record) = store.get_by_id(id)? else {
        anyhow::bail!("Agenda '{}' not found", id);
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "  Delete \"{}\"? This cannot be undone",
                record.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "  Cancelled".dimmed());
            return Ok(());
        }
    }

    let mut changes = store.subscribe();
    store.delete(id)?;

    println!("{}", format!("  Deleted: {}", record.title).red());
    report_total(&mut changes);
    Ok(())
}
