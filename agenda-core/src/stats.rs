//! Summary counts shown alongside the agenda list.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::record::AgendaRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaStats {
    pub total: usize,
    /// Records dated today or later
    pub upcoming: usize,
    /// Records dated within the month containing `today`
    pub this_month: usize,
}

impl AgendaStats {
    pub fn compute(records: &[AgendaRecord], today: NaiveDate) -> Self {
        let mut stats = AgendaStats {
            total: records.len(),
            ..Default::default()
        };

        for date in records.iter().filter_map(AgendaRecord::event_date) {
            if date >= today {
                stats.upcoming += 1;
            }
            if date.year() == today.year() && date.month() == today.month() {
                stats.this_month += 1;
            }
        }

        stats
    }
}
