//! Agenda record types.
//!
//! `AgendaRecord` is the stored shape of one event entry. `AgendaDraft` carries
//! the fields for a new record and `AgendaPatch` a partial update.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AgendaError, AgendaResult};
use crate::image::ImageData;

const ID_PREFIX: &str = "agenda";
const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A stored agenda entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaRecord {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Event date as an ISO date string (YYYY-MM-DD)
    pub date: String,
    pub description: String,
    /// Image content as a `data:` URI
    pub image: Option<String>,
    /// Original image file name (informational only)
    pub image_file_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AgendaRecord {
    /// Parsed event date, or None if the stored string is not a date.
    pub fn event_date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.date)
    }

    /// Whether the event falls on or after `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.event_date().is_some_and(|d| d >= today)
    }
}

/// Fields for a new agenda record.
#[derive(Debug, Clone, Default)]
pub struct AgendaDraft {
    pub title: String,
    pub category: String,
    pub date: String,
    pub description: String,
    pub image: Option<ImageData>,
}

impl AgendaDraft {
    /// Check that every required field is present and the date parses.
    /// All missing fields are reported at once.
    pub fn validate(&self) -> AgendaResult<NaiveDate> {
        let mut missing = Vec::new();

        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        if self.date.trim().is_empty() {
            missing.push("date");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.image.is_none() {
            missing.push("image");
        }

        if !missing.is_empty() {
            return Err(AgendaError::Validation { missing });
        }

        parse_event_date(&self.date).ok_or_else(|| AgendaError::InvalidDate(self.date.clone()))
    }

    /// Build a fresh record from a validated draft.
    pub(crate) fn into_record(self, now: DateTime<Utc>) -> AgendaRecord {
        let (image, image_file_name) = match self.image {
            Some(img) => (Some(img.data_uri), img.file_name),
            None => (None, None),
        };

        AgendaRecord {
            id: generate_id(),
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            date: self.date.trim().to_string(),
            description: self.description.trim().to_string(),
            image,
            image_file_name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct AgendaPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageData>,
}

impl AgendaPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.image.is_none()
    }

    /// Supplied text fields may not be blank.
    pub fn validate(&self) -> AgendaResult<()> {
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());

        let mut missing = Vec::new();
        if blank(&self.title) {
            missing.push("title");
        }
        if blank(&self.category) {
            missing.push("category");
        }
        if blank(&self.date) {
            missing.push("date");
        }
        if blank(&self.description) {
            missing.push("description");
        }
        if !missing.is_empty() {
            return Err(AgendaError::Validation { missing });
        }

        if let Some(date) = &self.date
            && parse_event_date(date).is_none()
        {
            return Err(AgendaError::InvalidDate(date.clone()));
        }

        Ok(())
    }

    /// Merge this patch over `record`. `created_at` is never touched.
    pub(crate) fn apply(self, record: &mut AgendaRecord, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            record.title = title.trim().to_string();
        }
        if let Some(category) = self.category {
            record.category = category.trim().to_string();
        }
        if let Some(date) = self.date {
            record.date = date.trim().to_string();
        }
        if let Some(description) = self.description {
            record.description = description.trim().to_string();
        }
        if let Some(img) = self.image {
            record.image = Some(img.data_uri);
            record.image_file_name = img.file_name;
        }
        record.updated_at = now.max(record.created_at);
    }
}

/// Parse an event date. Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_event_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Current time at millisecond precision, matching what the slot stores.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Generate a record id: `agenda_<unix millis>_<9 base36 chars>`.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let mut n = Uuid::new_v4().as_u128();

    let mut suffix = String::with_capacity(ID_SUFFIX_LEN);
    for _ in 0..ID_SUFFIX_LEN {
        suffix.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }

    format!("{}_{}_{}", ID_PREFIX, millis, suffix)
}
