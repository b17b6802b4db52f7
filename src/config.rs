// ⚙️ Classifier Configuration - Routing table + Meta 2 cutoff + column name
// Loaded once per session, edited in memory, written back only on save()

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::routing::OwnerRoutingTable;

pub const DEFAULT_PROCESS_NUMBER_COLUMN: &str = "numeroProcesso";
pub const DEFAULT_META_CUTOFF_YEAR: u16 = 2018;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Owner already exists: {0}")]
    OwnerExists(String),

    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    #[error("Owner name cannot be empty")]
    EmptyOwnerName,

    #[error("Range #{index} does not exist for {owner} ({len} ranges)")]
    RangeIndexOutOfBounds {
        owner: String,
        index: usize,
        len: usize,
    },

    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// CONFIGURATION AGGREGATE
// ============================================================================

/// Everything the pipeline needs besides the records themselves
///
/// JSON shape:
/// ```json
/// {
///   "routingTable": { "ABEL": [[1, 19]], "CARLOS": [[20, 39]] },
///   "processNumberColumn": "numeroProcesso",
///   "metaCutoffYear": 2018
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    #[serde(default = "default_routing_table")]
    pub routing_table: OwnerRoutingTable,

    #[serde(default = "default_process_number_column")]
    pub process_number_column: String,

    /// Years strictly before this are Meta 2
    #[serde(default = "default_meta_cutoff_year")]
    pub meta_cutoff_year: u16,
}

fn default_routing_table() -> OwnerRoutingTable {
    OwnerRoutingTable::new()
        .with_owner("ABEL", &[(1, 19)])
        .with_owner("CARLOS", &[(20, 39)])
        .with_owner("JACKMARA", &[(40, 59)])
        .with_owner("LEIDIANE", &[(60, 79)])
        .with_owner("TANIA", &[(80, 99)])
}

fn default_process_number_column() -> String {
    DEFAULT_PROCESS_NUMBER_COLUMN.to_string()
}

fn default_meta_cutoff_year() -> u16 {
    DEFAULT_META_CUTOFF_YEAR
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            routing_table: default_routing_table(),
            process_number_column: default_process_number_column(),
            meta_cutoff_year: default_meta_cutoff_year(),
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&content)?;
        debug!(
            path = %path.as_ref().display(),
            owners = config.routing_table.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load from `path` if it exists and parses, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No configuration file, using defaults");
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "Ignoring unreadable configuration: {e}");
                Self::default()
            }
        }
    }

    /// Persist as pretty-printed JSON (explicit save, never automatic)
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), owners = self.routing_table.len(), "Configuration saved");
        Ok(())
    }

    /// Export as a JSON string
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Import from a JSON string; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Back to the default owners, column and cutoff
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// TESTS
// ============================================================================
