//! Persistent key-value slots.
//!
//! A slot holds one serialized collection under a string key. Reads and writes
//! always move the whole value; there is no locking, so the last writer wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{AgendaError, AgendaResult};

/// Storage backend for named slots.
pub trait SlotStorage: Send + Sync {
    /// Read the value stored under `key`, or None if the slot is empty.
    fn read(&self, key: &str) -> AgendaResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> AgendaResult<()>;

    /// Clear the slot. Removing an empty slot is not an error.
    fn remove(&self, key: &str) -> AgendaResult<()>;
}

/// Slots stored as `<dir>/<key>.json` files.
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlots { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> AgendaResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(AgendaError::Config(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SlotStorage for FileSlots {
    fn read(&self, key: &str) -> AgendaResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> AgendaResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let temp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AgendaResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory slots. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // Poisoning is ignored: every mutation is a single insert or remove
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SlotStorage for MemorySlots {
    fn read(&self, key: &str) -> AgendaResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> AgendaResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AgendaResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_slots_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlots::new(dir.path().join("nested"));

        assert_eq!(slots.read("agendaData").unwrap(), None);

        slots.write("agendaData", "[]").unwrap();
        assert_eq!(slots.read("agendaData").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/agendaData.json").exists());
        assert!(!dir.path().join("nested/.agendaData.json.tmp").exists());

        slots.write("agendaData", "[1]").unwrap();
        assert_eq!(slots.read("agendaData").unwrap().as_deref(), Some("[1]"));

        slots.remove("agendaData").unwrap();
        assert_eq!(slots.read("agendaData").unwrap(), None);
        slots.remove("agendaData").unwrap();
    }

    #[test]
    fn test_file_slots_rejects_path_keys() {
        let slots = FileSlots::new("/tmp/unused");
        assert!(slots.path_for("../escape").is_err());
        assert!(slots.path_for("a/b").is_err());
        assert!(slots.path_for("").is_err());
        assert!(slots.path_for("enhanced_agenda_data").is_ok());
    }

    #[test]
    fn test_memory_slots_clones_share_state() {
        let a = MemorySlots::new();
        let b = a.clone();

        a.write("k", "v1").unwrap();
        assert_eq!(b.read("k").unwrap().as_deref(), Some("v1"));

        b.write("k", "v2").unwrap();
        assert_eq!(a.read("k").unwrap().as_deref(), Some("v2"));

        a.remove("k").unwrap();
        assert_eq!(b.read("k").unwrap(), None);
    }
}
