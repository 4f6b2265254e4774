//! Mapping between `AgendaRecord` fields and the JSON keys in a slot.
//!
//! Two layouts exist in the wild: the enhanced layout tracks `updatedAt`, the
//! legacy one does not. A mapping with no `updated_at` key never writes it and
//! reads it back as `createdAt`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::AgendaRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    pub id: String,
    pub title: String,
    pub category: String,
    pub date: String,
    pub description: String,
    pub image: String,
    pub image_file_name: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::enhanced()
    }
}

impl FieldMapping {
    pub fn enhanced() -> Self {
        FieldMapping {
            id: "id".into(),
            title: "title".into(),
            category: "category".into(),
            date: "date".into(),
            description: "description".into(),
            image: "image".into(),
            image_file_name: "imageFileName".into(),
            created_at: "createdAt".into(),
            updated_at: Some("updatedAt".into()),
        }
    }

    pub fn legacy() -> Self {
        FieldMapping {
            updated_at: None,
            ..Self::enhanced()
        }
    }

    /// Encode a record as a JSON object using this mapping's keys.
    pub fn encode(&self, record: &AgendaRecord) -> Map<String, Value> {
        let mut obj = Map::new();
        obj.insert(self.id.clone(), Value::String(record.id.clone()));
        obj.insert(self.title.clone(), Value::String(record.title.clone()));
        obj.insert(self.category.clone(), Value::String(record.category.clone()));
        obj.insert(self.date.clone(), Value::String(record.date.clone()));
        obj.insert(
            self.description.clone(),
            Value::String(record.description.clone()),
        );
        obj.insert(self.image.clone(), optional_string(&record.image));
        obj.insert(
            self.image_file_name.clone(),
            optional_string(&record.image_file_name),
        );
        obj.insert(
            self.created_at.clone(),
            Value::String(format_timestamp(record.created_at)),
        );
        if let Some(key) = &self.updated_at {
            obj.insert(key.clone(), Value::String(format_timestamp(record.updated_at)));
        }
        obj
    }

    /// Decode a JSON object into a record.
    ///
    /// Decoding is lenient: missing text fields become empty strings and a
    /// missing or unparsable `createdAt` becomes `fallback`. `updatedAt` is
    /// clamped so it never precedes `createdAt`.
    pub fn decode(&self, obj: &Map<String, Value>, fallback: DateTime<Utc>) -> AgendaRecord {
        let text = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let optional = |key: &str| obj.get(key).and_then(Value::as_str).map(String::from);

        let created_at = optional(&self.created_at)
            .and_then(|s| parse_timestamp(&s))
            .unwrap_or(fallback);

        let updated_at = self
            .updated_at
            .as_ref()
            .and_then(|key| optional(key))
            .and_then(|s| parse_timestamp(&s))
            .unwrap_or(created_at)
            .max(created_at);

        AgendaRecord {
            id: text(&self.id),
            title: text(&self.title),
            category: text(&self.category),
            date: text(&self.date),
            description: text(&self.description),
            image: optional(&self.image),
            image_file_name: optional(&self.image_file_name),
            created_at,
            updated_at,
        }
    }
}

/// Per-key overrides layered on top of a variant's mapping.
///
/// Keys left unset keep the base mapping's name. `track_updated_at` switches
/// the `updatedAt` key on or off; when unset the base decides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_updated_at: Option<bool>,
}

impl FieldOverrides {
    pub fn apply(&self, base: FieldMapping) -> FieldMapping {
        let pick = |over: &Option<String>, name: String| over.clone().unwrap_or(name);

        let updated_at = match self.track_updated_at {
            Some(false) => None,
            Some(true) => Some(
                self.updated_at
                    .clone()
                    .or(base.updated_at)
                    .unwrap_or_else(|| "updatedAt".to_string()),
            ),
            None => base.updated_at.map(|name| pick(&self.updated_at, name)),
        };

        FieldMapping {
            id: pick(&self.id, base.id),
            title: pick(&self.title, base.title),
            category: pick(&self.category, base.category),
            date: pick(&self.date, base.date),
            description: pick(&self.description, base.description),
            image: pick(&self.image, base.image),
            image_file_name: pick(&self.image_file_name, base.image_file_name),
            created_at: pick(&self.created_at, base.created_at),
            updated_at,
        }
    }
}

fn optional_string(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::String(s.clone()),
        None => Value::Null,
    }
}

/// Timestamps are written as `2025-01-10T08:30:00.000Z`.
fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
