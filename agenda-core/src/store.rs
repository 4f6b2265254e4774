//! Agenda record store.
//!
//! `AgendaStore` keeps the whole collection in one slot. Every mutation reads
//! the full collection, modifies it, writes it back and then broadcasts a
//! `ChangeEvent`. Nothing is cached between calls, so another writer sharing
//! the slot is picked up on the next read and silently overwritten on the
//! next write.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde_json::Value;
use tokio::sync::broadcast;

use crate::constants::ENHANCED_STORAGE_KEY;
use crate::date_range::DateRange;
use crate::error::{AgendaError, AgendaResult};
use crate::field_map::FieldMapping;
use crate::notify::{ChangeAction, ChangeBus, ChangeEvent, StorageSignal};
use crate::record::{AgendaDraft, AgendaPatch, AgendaRecord, generate_id, now_millis};
use crate::slot::SlotStorage;
use crate::stats::AgendaStats;

pub struct AgendaStore {
    slots: Box<dyn SlotStorage>,
    key: String,
    mapping: FieldMapping,
    bus: ChangeBus,
}

impl AgendaStore {
    pub fn new(slots: impl SlotStorage + 'static, key: &str, mapping: FieldMapping) -> Self {
        AgendaStore {
            slots: Box::new(slots),
            key: key.to_string(),
            mapping,
            bus: ChangeBus::default(),
        }
    }

    /// Store using the enhanced key and field layout.
    pub fn enhanced(slots: impl SlotStorage + 'static) -> Self {
        Self::new(slots, ENHANCED_STORAGE_KEY, FieldMapping::enhanced())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.bus.subscribe()
    }

    pub fn subscribe_storage(&self) -> broadcast::Receiver<StorageSignal> {
        self.bus.subscribe_storage()
    }

    // READ OPERATIONS:

    /// All records in insertion order.
    ///
    /// An empty slot or one that does not hold a JSON array reads as an empty
    /// collection. Only I/O failures are errors.
    pub fn list_all(&self) -> AgendaResult<Vec<AgendaRecord>> {
        let Some(content) = self.slots.read(&self.key)? else {
            return Ok(Vec::new());
        };

        let entries = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                tracing::warn!(key = %self.key, "slot does not hold a list, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "slot is not valid JSON, treating as empty");
                return Ok(Vec::new());
            }
        };

        let records = entries
            .iter()
            .filter_map(|entry| match entry.as_object() {
                Some(obj) => Some(self.mapping.decode(obj, DateTime::<Utc>::UNIX_EPOCH)),
                None => {
                    tracing::warn!(key = %self.key, "skipping slot entry that is not an object");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    pub fn get_by_id(&self, id: &str) -> AgendaResult<Option<AgendaRecord>> {
        Ok(self.list_all()?.into_iter().find(|r| r.id == id))
    }

    /// Case-insensitive substring match on title, description or category.
    pub fn search(&self, query: &str) -> AgendaResult<Vec<AgendaRecord>> {
        let query = query.to_lowercase();
        let records = self
            .list_all()?
            .into_iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&query)
                    || r.description.to_lowercase().contains(&query)
                    || r.category.to_lowercase().contains(&query)
            })
            .collect();
        Ok(records)
    }

    /// Records whose date falls inside `range` (inclusive).
    pub fn filter_by_date_range(&self, range: &DateRange) -> AgendaResult<Vec<AgendaRecord>> {
        let records = self
            .list_all()?
            .into_iter()
            .filter(|r| r.event_date().is_some_and(|d| range.contains(d)))
            .collect();
        Ok(records)
    }

    /// Records dated today or later, soonest first.
    pub fn upcoming(&self, limit: usize) -> AgendaResult<Vec<AgendaRecord>> {
        self.upcoming_at(limit, Local::now().date_naive())
    }

    pub fn upcoming_at(&self, limit: usize, today: NaiveDate) -> AgendaResult<Vec<AgendaRecord>> {
        let mut records: Vec<_> = self
            .list_all()?
            .into_iter()
            .filter(|r| r.is_upcoming(today))
            .collect();
        records.sort_by_key(AgendaRecord::event_date);
        records.truncate(limit);
        Ok(records)
    }

    /// All records, newest event date first. Undated records come last.
    pub fn sorted_for_display(&self) -> AgendaResult<Vec<AgendaRecord>> {
        let mut records = self.list_all()?;
        records.sort_by(|a, b| b.event_date().cmp(&a.event_date()));
        Ok(records)
    }

    pub fn stats(&self) -> AgendaResult<AgendaStats> {
        self.stats_at(Local::now().date_naive())
    }

    pub fn stats_at(&self, today: NaiveDate) -> AgendaResult<AgendaStats> {
        Ok(AgendaStats::compute(&self.list_all()?, today))
    }

    // WRITE OPERATIONS:

    /// Validate and append a new record.
    pub fn create(&self, draft: AgendaDraft) -> AgendaResult<AgendaRecord> {
        draft.validate()?;

        let mut records = self.list_all()?;
        let record = draft.into_record(now_millis());
        records.push(record.clone());

        let raw = self.persist(&records)?;
        self.notify(ChangeAction::Add, &record, records.len(), raw);

        Ok(record)
    }

    /// Merge `patch` over the record with `id`.
    pub fn update(&self, id: &str, patch: AgendaPatch) -> AgendaResult<AgendaRecord> {
        patch.validate()?;

        let mut records = self.list_all()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AgendaError::NotFound(id.to_string()))?;

        patch.apply(record, now_millis());
        let updated = record.clone();

        let raw = self.persist(&records)?;
        self.notify(ChangeAction::Update, &updated, records.len(), raw);

        Ok(updated)
    }

    /// Remove the record with `id`.
    ///
    /// Always returns true, whether or not a record was removed; use
    /// `get_by_id` first to tell the two apart. A change event is only sent
    /// when something was removed.
    pub fn delete(&self, id: &str) -> AgendaResult<bool> {
        let records = self.list_all()?;
        let (removed, kept): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| r.id == id);

        let raw = self.persist(&kept)?;

        if let Some(record) = removed.first() {
            self.notify(ChangeAction::Delete, record, kept.len(), raw);
        }

        Ok(true)
    }

    /// Serialize the full collection as pretty-printed JSON.
    pub fn export_all(&self) -> AgendaResult<Vec<u8>> {
        let entries = self.encode_all(&self.list_all()?);
        Ok(serde_json::to_vec_pretty(&entries)?)
    }

    /// Append every record in `bytes` to the collection.
    ///
    /// The payload must be a JSON array of objects. Entries are not validated
    /// and ids are not deduplicated against existing records; an entry with no
    /// id gets a fresh one. Returns the number of imported records.
    pub fn import_merge(&self, bytes: &[u8]) -> AgendaResult<usize> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| AgendaError::Format(e.to_string()))?;

        let Value::Array(entries) = value else {
            return Err(AgendaError::Format("expected a list of records".into()));
        };

        let now = now_millis();
        let mut imported = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let obj = entry
                .as_object()
                .ok_or_else(|| AgendaError::Format(format!("entry {} is not a record", i)))?;

            let mut record = self.mapping.decode(obj, now);
            if record.id.is_empty() {
                record.id = generate_id();
            }
            imported.push(record);
        }

        let count = imported.len();
        let mut records = self.list_all()?;
        records.extend(imported);

        let raw = self.persist(&records)?;
        self.bus.emit_storage(StorageSignal {
            key: self.key.clone(),
            new_value: Some(raw),
        });

        tracing::info!(key = %self.key, imported = count, total = records.len(), "agendas imported");

        Ok(count)
    }

    // INTERNAL:

    fn encode_all(&self, records: &[AgendaRecord]) -> Value {
        Value::Array(
            records
                .iter()
                .map(|r| Value::Object(self.mapping.encode(r)))
                .collect(),
        )
    }

    /// Overwrite the slot with `records`, returning the written value.
    fn persist(&self, records: &[AgendaRecord]) -> AgendaResult<String> {
        let raw = serde_json::to_string(&self.encode_all(records))?;
        self.slots.write(&self.key, &raw)?;
        Ok(raw)
    }

    fn notify(&self, action: ChangeAction, record: &AgendaRecord, total_count: usize, raw: String) {
        tracing::info!(%action, id = %record.id, title = %record.title, total = total_count, "agenda changed");

        self.bus.emit(ChangeEvent {
            action,
            record: record.clone(),
            timestamp: Utc::now(),
            total_count,
        });
        self.bus.emit_storage(StorageSignal {
            key: self.key.clone(),
            new_value: Some(raw),
        });
    }
}
