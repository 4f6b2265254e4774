use agenda_core::form::AgendaForm;
use agenda_core::image::load_image;
use agenda_core::{AgendaDraft, AgendaStore};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::{FormFields, date_or_prompt, field_or_prompt, report_total};

pub async fn run(store: &AgendaStore, id: &str, fields: FormFields) -> Result<()> {
    let mut form = AgendaForm::new();
    let current = form.begin_edit(store, id)?;

    // With no flags, walk through every field prefilled with its current value
    let interactive = fields.is_empty();

    let (title, category, date, description) = if interactive {
        (
            field_or_prompt(None, "  Title", Some(&current.title))?,
            field_or_prompt(None, "  Category", Some(&current.category))?,
            date_or_prompt(None, Some(&current.date))?,
            field_or_prompt(None, "  Description", Some(&current.description))?,
        )
    } else {
        (
            fields.title.unwrap_or(current.title),
            fields.category.unwrap_or(current.category),
            fields.date.unwrap_or(current.date),
            fields.description.unwrap_or(current.description),
        )
    };

    let image = match &fields.image {
        Some(path) => Some(
            load_image(path)
                .await
                .with_context(|| format!("Could not use image {}", path.display()))?,
        ),
        None => None,
    };

    let draft = AgendaDraft {
        title,
        category,
        date,
        description,
        image,
    };

    let mut changes = store.subscribe();
    let record = form.submit(store, draft)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Updated: {}", record.title).yellow());
    report_total(&mut changes);

    Ok(())
}
