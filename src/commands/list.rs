use agenda_core::AgendaStore;
use anyhow::Result;

use crate::render::render_list;

pub fn run(store: &AgendaStore, json: bool) -> Result<()> {
    let records = store.sorted_for_display()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("{}", render_list(&records, "No agendas yet."));
    }

    Ok(())
}
