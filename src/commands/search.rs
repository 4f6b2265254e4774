use agenda_core::AgendaStore;
use anyhow::Result;

use crate::render::render_list;

pub fn run(store: &AgendaStore, query: &str) -> Result<()> {
    let records = store.search(query)?;
    println!(
        "{}",
        render_list(&records, &format!("No agendas matching \"{}\".", query))
    );
    Ok(())
}
