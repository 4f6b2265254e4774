use agenda_core::AgendaStore;
use anyhow::Result;

use crate::render::render_list;

pub fn run(store: &AgendaStore, limit: usize) -> Result<()> {
    let records = store.upcoming(limit)?;
    println!("{}", render_list(&records, "No upcoming agendas."));
    Ok(())
}
