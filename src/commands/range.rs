use agenda_core::AgendaStore;
use agenda_core::date_range::DateRange;
use anyhow::Result;

use crate::render::render_list;

pub fn run(store: &AgendaStore, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let range = DateRange::from_args(from, to).map_err(|e| anyhow::anyhow!(e))?;

    let mut records = store.filter_by_date_range(&range)?;
    records.sort_by_key(|r| r.event_date());

    println!("{}", render_list(&records, "No agendas in this range."));
    Ok(())
}
