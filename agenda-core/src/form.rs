//! Editing state for an agenda entry form.
//!
//! The form is either idle (submitting creates a record) or editing one
//! record (submitting updates it). The store itself is stateless; this is the
//! only place the editing mode lives.

use crate::error::{AgendaError, AgendaResult};
use crate::image::ImageData;
use crate::record::{AgendaDraft, AgendaPatch, AgendaRecord};
use crate::store::AgendaStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Idle,
    Editing(String),
}

#[derive(Debug, Default)]
pub struct AgendaForm {
    mode: FormMode,
}

impl AgendaForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Switch to editing `id`, returning the record to prefill the form with.
    pub fn begin_edit(&mut self, store: &AgendaStore, id: &str) -> AgendaResult<AgendaRecord> {
        let record = store
            .get_by_id(id)?
            .ok_or_else(|| AgendaError::NotFound(id.to_string()))?;
        self.mode = FormMode::Editing(id.to_string());
        Ok(record)
    }

    pub fn reset(&mut self) {
        self.mode = FormMode::Idle;
    }

    /// Save the form contents.
    ///
    /// When editing and no new image was chosen, the record keeps its
    /// existing image. On success the form returns to idle; on error it keeps
    /// its current mode.
    pub fn submit(&mut self, store: &AgendaStore, draft: AgendaDraft) -> AgendaResult<AgendaRecord> {
        let record = match &self.mode {
            FormMode::Idle => store.create(draft)?,
            FormMode::Editing(id) => {
                let existing = store
                    .get_by_id(id)?
                    .ok_or_else(|| AgendaError::NotFound(id.clone()))?;

                let image = draft.image.or_else(|| {
                    existing
                        .image
                        .map(|uri| ImageData::from_stored(uri, existing.image_file_name))
                });
                let draft = AgendaDraft { image, ..draft };

                // Same required-field rules as a new record, with the image inherited
                draft.validate()?;

                store.update(
                    id,
                    AgendaPatch {
                        title: Some(draft.title),
                        category: Some(draft.category),
                        date: Some(draft.date),
                        description: Some(draft.description),
                        image: draft.image,
                    },
                )?
            }
        };

        self.mode = FormMode::Idle;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MemorySlots;

    fn make_draft(title: &str) -> AgendaDraft {
        AgendaDraft {
            title: title.to_string(),
            category: "Pendidikan".to_string(),
            date: "2025-01-10".to_string(),
            description: "Desc".to_string(),
            image: Some(ImageData::from_bytes(b"img", "image/png", Some("a.png"))),
        }
    }

    #[test]
    fn test_idle_submit_creates() {
        let store = AgendaStore::enhanced(MemorySlots::new());
        let mut form = AgendaForm::new();

        let record = form.submit(&store, make_draft("Seminar")).unwrap();
        assert_eq!(form.mode(), &FormMode::Idle);
        assert_eq!(store.get_by_id(&record.id).unwrap().unwrap().title, "Seminar");
    }

    #[test]
    fn test_edit_inherits_image() {
        let store = AgendaStore::enhanced(MemorySlots::new());
        let created = store.create(make_draft("Seminar")).unwrap();

        let mut form = AgendaForm::new();
        form.begin_edit(&store, &created.id).unwrap();
        assert_eq!(form.mode(), &FormMode::Editing(created.id.clone()));

        let draft = AgendaDraft {
            image: None,
            ..make_draft("Seminar Baru")
        };
        let updated = form.submit(&store, draft).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Seminar Baru");
        assert_eq!(updated.image, created.image);
        assert_eq!(updated.image_file_name, created.image_file_name);
        assert_eq!(store.list_all().unwrap().len(), 1);
        assert_eq!(form.mode(), &FormMode::Idle);
    }

    #[test]
    fn test_begin_edit_unknown_id() {
        let store = AgendaStore::enhanced(MemorySlots::new());
        let mut form = AgendaForm::new();
        assert!(matches!(
            form.begin_edit(&store, "missing"),
            Err(AgendaError::NotFound(_))
        ));
        assert_eq!(form.mode(), &FormMode::Idle);
    }

    #[test]
    fn test_failed_submit_keeps_mode() {
        let store = AgendaStore::enhanced(MemorySlots::new());
        let created = store.create(make_draft("Seminar")).unwrap();

        let mut form = AgendaForm::new();
        form.begin_edit(&store, &created.id).unwrap();

        let draft = AgendaDraft {
            title: String::new(),
            ..make_draft("")
        };
        assert!(form.submit(&store, draft).is_err());
        assert_eq!(form.mode(), &FormMode::Editing(created.id.clone()));
        assert_eq!(store.get_by_id(&created.id).unwrap().unwrap().title, "Seminar");

        form.reset();
        assert_eq!(form.mode(), &FormMode::Idle);
    }

    #[test]
    fn test_idle_submit_requires_image() {
        let store = AgendaStore::enhanced(MemorySlots::new());
        let mut form = AgendaForm::new();
        let draft = AgendaDraft {
            image: None,
            ..make_draft("Seminar")
        };
        assert!(matches!(
            form.submit(&store, draft),
            Err(AgendaError::Validation { .. })
        ));
    }

    #[test]
    fn test_edit_replaces_image() {
        let store = AgendaStore::enhanced(MemorySlots::new());
        let created = store.create(make_draft("Seminar")).unwrap();

        let mut form = AgendaForm::new();
        form.begin_edit(&store, &created.id).unwrap();

        let draft = AgendaDraft {
            image: Some(ImageData::from_bytes(b"new", "image/webp", Some("b.webp"))),
            ..make_draft("Seminar")
        };
        let updated = form.submit(&store, draft).unwrap();

        assert!(updated.image.unwrap().starts_with("data:image/webp;base64,"));
        assert_eq!(updated.image_file_name.as_deref(), Some("b.webp"));
        assert_eq!(form.mode(), &FormMode::Idle);
    }
}
