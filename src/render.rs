//! Terminal rendering for agenda types.

use agenda_core::AgendaRecord;
use agenda_core::stats::AgendaStats;
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for AgendaRecord {
    /// One-line summary: date, status, title, category and id.
    fn render(&self) -> String {
        let today = Local::now().date_naive();
        let status = if self.is_upcoming(today) {
            "upcoming".green().to_string()
        } else {
            "done".dimmed().to_string()
        };

        format!(
            "{:<18} {:<8} {} {} {}",
            format_date(&self.date),
            status,
            self.title.bold(),
            format!("[{}]", self.category).cyan(),
            self.id.dimmed()
        )
    }
}

impl Render for AgendaStats {
    fn render(&self) -> String {
        format!(
            "  Total:      {}\n  Upcoming:   {}\n  This month: {}",
            self.total.bold(),
            self.upcoming.green(),
            self.this_month.cyan()
        )
    }
}

/// Full view of a record, one field per line.
pub fn render_detail(record: &AgendaRecord) -> String {
    let image = match (&record.image, &record.image_file_name) {
        (Some(_), Some(name)) => name.clone(),
        (Some(uri), None) => truncate_text(uri, 40),
        (None, _) => "(none)".to_string(),
    };

    let mut lines = vec![
        format!("{}", record.title.bold()),
        format!("{}: {}", "id".dimmed(), record.id),
        format!("{}: {}", "category".dimmed(), record.category),
        format!("{}: {}", "date".dimmed(), format_date(&record.date)),
        format!("{}: {}", "image".dimmed(), image),
        format!(
            "{}: {}",
            "created".dimmed(),
            record.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ),
    ];
    if record.updated_at != record.created_at {
        lines.push(format!(
            "{}: {}",
            "updated".dimmed(),
            record.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ));
    }
    lines.push(String::new());
    lines.push(record.description.clone());

    lines.join("\n")
}

/// Render a list of records, or a placeholder when empty.
pub fn render_list(records: &[AgendaRecord], empty_message: &str) -> String {
    if records.is_empty() {
        return empty_message.dimmed().to_string();
    }

    records
        .iter()
        .map(|r| {
            format!(
                "{}\n    {}",
                r.render(),
                truncate_text(&r.description, 50).dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a stored date as e.g. "10 January 2025", falling back to the raw string.
fn format_date(date: &str) -> String {
    match agenda_core::record::parse_event_date(date) {
        Some(d) => long_date(d),
        None => date.to_string(),
    }
}

fn long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Cut `text` to `max_chars` characters, appending "..." when shortened.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}
