use agenda_core::AgendaStore;
use anyhow::Result;

use crate::render::Render;

pub fn run(store: &AgendaStore) -> Result<()> {
    println!("{}", store.stats()?.render());
    Ok(())
}
