use agenda_core::AgendaStore;
use anyhow::Result;

use crate::render::render_detail;

pub fn run(store: &AgendaStore, id: &str) -> Result<()> {
    let Some(record) = store.get_by_id(id)? else {
        anyhow::bail!("Agenda '{}' not found", id);
    };

    println!("{}", render_detail(&record));
    Ok(())
}
