//! Change notifications for agenda mutations.
//!
//! Every add/update/delete is broadcast as a `ChangeEvent`. A `StorageSignal`
//! carrying the raw slot value is mirrored alongside it for readers that
//! watch the slot itself; it is a hint, not a consistency mechanism.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::constants::CHANGE_BUS_CAPACITY;
use crate::record::AgendaRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Add,
    Update,
    Delete,
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ChangeAction::Add => "add",
            ChangeAction::Update => "update",
            ChangeAction::Delete => "delete",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub action: ChangeAction,
    pub record: AgendaRecord,
    pub timestamp: DateTime<Utc>,
    /// Collection size after the change
    pub total_count: usize,
}

/// Raw slot value after a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSignal {
    pub key: String,
    pub new_value: Option<String>,
}

/// Broadcast-backed bus for change events and storage signals.
#[derive(Clone, Debug)]
pub struct ChangeBus {
    changes: broadcast::Sender<ChangeEvent>,
    storage: broadcast::Sender<StorageSignal>,
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(CHANGE_BUS_CAPACITY)
    }
}

impl ChangeBus {
    pub fn new(buffer: usize) -> Self {
        let (changes, _) = broadcast::channel(buffer);
        let (storage, _) = broadcast::channel(buffer);
        Self { changes, storage }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }

    pub fn subscribe_storage(&self) -> broadcast::Receiver<StorageSignal> {
        self.storage.subscribe()
    }

    /// Send a change event. Having no subscribers is fine.
    pub fn emit(&self, event: ChangeEvent) {
        let _ = self.changes.send(event);
    }

    pub fn emit_storage(&self, signal: StorageSignal) {
        let _ = self.storage.send(signal);
    }
}
