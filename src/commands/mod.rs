pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod new;
pub mod range;
pub mod search;
pub mod show;
pub mod stats;
pub mod upcoming;

use std::path::PathBuf;

use agenda_core::notify::ChangeEvent;
use agenda_core::record::parse_event_date;
use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;
use tokio::sync::broadcast;

/// Form fields given on the command line. Missing ones may be prompted for.
pub struct FormFields {
    pub title: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub image: Option<PathBuf>,
}

impl FormFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.image.is_none()
    }
}

/// Use `value` if given, otherwise prompt (prefilled with `current` when editing).
fn field_or_prompt(value: Option<String>, prompt: &str, current: Option<&str>) -> Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }

    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(current) = current {
        input = input.with_initial_text(current);
    }
    Ok(input.interact_text()?)
}

/// Prompt for an event date until it parses.
fn date_or_prompt(value: Option<String>, current: Option<&str>) -> Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }

    loop {
        let input = field_or_prompt(None, "  Date (YYYY-MM-DD)", current)?;
        if parse_event_date(&input).is_some() {
            return Ok(input);
        }
        eprintln!("  {}", format!("Invalid date '{}'. Expected YYYY-MM-DD", input).red());
    }
}

/// Print the collection size reported by the last change event, if any.
fn report_total(rx: &mut broadcast::Receiver<ChangeEvent>) {
    if let Some(event) = std::iter::from_fn(|| rx.try_recv().ok()).last() {
        println!("{}", format!("  {} agendas stored", event.total_count).dimmed());
    }
}
