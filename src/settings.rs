//! Helper defaults and preferences
//!
//! Persisted as JSON; every field is optional on disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DELIMITER;
use crate::persistence::ObjectFormat;

/// Defaults applied when callers do not pass explicit options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Separator used when joining collection contents
    pub delimiter: String,
    /// Trim each element's string form before joining
    pub trim_contents: bool,
    /// Payload format for newly written object files
    pub object_format: ObjectFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            trim_contents: true,
            object_format: ObjectFormat::Binary,
        }
    }
}

impl Settings {
    /// Delimiter to use, falling back to the default when the configured one is empty
    pub fn effective_delimiter(&self) -> &str {
        if self.delimiter.is_empty() {
            DEFAULT_DELIMITER
        } else {
            &self.delimiter
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| crate::Error::serialization(path, e))?;
        std::fs::write(path, json).map_err(|e| crate::Error::io(path, e))?;
        log::info!("Settings saved");
        Ok(())
    }
}
