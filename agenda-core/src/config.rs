//! Agenda configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_UPCOMING_LIMIT, ENHANCED_STORAGE_KEY, LEGACY_STORAGE_KEY};
use crate::error::{AgendaError, AgendaResult};
use crate::field_map::{FieldMapping, FieldOverrides};
use crate::slot::FileSlots;
use crate::store::AgendaStore;

static DEFAULT_DATA_DIR: &str = "~/.local/share/agenda";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}

/// Which slot layout to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Enhanced,
    Legacy,
}

impl Variant {
    pub fn storage_key(&self) -> &'static str {
        match self {
            Variant::Enhanced => ENHANCED_STORAGE_KEY,
            Variant::Legacy => LEGACY_STORAGE_KEY,
        }
    }

    pub fn field_mapping(&self) -> FieldMapping {
        match self {
            Variant::Enhanced => FieldMapping::enhanced(),
            Variant::Legacy => FieldMapping::legacy(),
        }
    }
}

/// Configuration at ~/.config/agenda/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AgendaConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub variant: Variant,

    /// Overrides the variant's slot key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,

    /// Renames individual keys of the variant's field layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldOverrides>,

    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            data_dir: default_data_dir(),
            variant: Variant::default(),
            storage_key: None,
            fields: None,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

impl AgendaConfig {
    pub fn config_path() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join("agenda");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented default file on
    /// first run.
    pub fn load() -> AgendaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> AgendaResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AgendaError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# Where agenda data is stored:
# data_dir = \"{}\"

# Slot layout: \"enhanced\" (tracks updatedAt) or \"legacy\"
# variant = \"enhanced\"

# Override the slot key:
# storage_key = \"{}\"

# Number of records shown by `agenda upcoming`:
# upcoming_limit = {}

# Rename keys in the stored JSON (unset keys keep the variant's names):
# [fields]
# title = \"title\"
# image_file_name = \"imageFileName\"
# track_updated_at = true
",
            DEFAULT_DATA_DIR, ENHANCED_STORAGE_KEY, DEFAULT_UPCOMING_LIMIT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned())
    }

    pub fn storage_key(&self) -> String {
        self.storage_key
            .clone()
            .unwrap_or_else(|| self.variant.storage_key().to_string())
    }

    pub fn field_mapping(&self) -> FieldMapping {
        let base = self.variant.field_mapping();
        match &self.fields {
            Some(overrides) => overrides.apply(base),
            None => base,
        }
    }

    /// Switch to `variant`, dropping any `storage_key` override so the
    /// variant's own slot is used. Field renames still apply on top.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self.storage_key = None;
        self
    }

    /// Construct a file-backed store from this configuration.
    pub fn open_store(&self) -> AgendaStore {
        AgendaStore::new(
            FileSlots::new(self.data_path()),
            &self.storage_key(),
            self.field_mapping(),
        )
    }
}
