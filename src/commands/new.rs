use std::path::PathBuf;

use agenda_core::form::AgendaForm;
use agenda_core::image::load_image;
use agenda_core::{AgendaDraft, AgendaStore};
use anyhow::{Context, Result};
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{FormFields, date_or_prompt, field_or_prompt, report_total};

pub async fn run(store: &AgendaStore, fields: FormFields) -> Result<()> {
    let interactive = fields.title.is_none()
        || fields.category.is_none()
        || fields.date.is_none()
        || fields.description.is_none()
        || fields.image.is_none();

    let title = field_or_prompt(fields.title, "  Title", None)?;
    let category = field_or_prompt(fields.category, "  Category", None)?;
    let date = date_or_prompt(fields.date, None)?;
    let description = field_or_prompt(fields.description, "  Description", None)?;

    let image_path = match fields.image {
        Some(p) => p,
        None => PathBuf::from(
            Input::<String>::new()
                .with_prompt("  Image path")
                .interact_text()?,
        ),
    };
    let image = load_image(&image_path)
        .await
        .with_context(|| format!("Could not use image {}", image_path.display()))?;

    let draft = AgendaDraft {
        title,
        category,
        date,
        description,
        image: Some(image),
    };

    let mut changes = store.subscribe();
    let record = AgendaForm::new().submit(store, draft)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", record.title).green());
    println!("{}", format!("  id: {}", record.id).dimmed());
    report_total(&mut changes);

    Ok(())
}
