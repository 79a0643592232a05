//! Persistence settings
//!
//! Loaded from a JSON file next to the plugin. Missing fields take their
//! defaults, so an empty object is a valid settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::{DEFAULT_FALLBACK, DEFAULT_MAX_CHARS, StringCodec};
use crate::error::SettingsError;
use crate::persistence::encode_type_code;

/// Record tag the store saves under
pub const DEFAULT_RECORD_TYPE: &str = "DFSV";

/// Current record layout version
pub const DEFAULT_RECORD_VERSION: u32 = 1;

/// Store serialization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Four-character record tag
    pub record_type: String,
    /// Version written with every record
    pub record_version: u32,
    /// Editor ids longer than this are truncated on save
    pub max_encoded_chars: usize,
    /// Written in place of an editor id that fails to encode
    pub encode_fallback: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            record_type: DEFAULT_RECORD_TYPE.to_string(),
            record_version: DEFAULT_RECORD_VERSION,
            max_encoded_chars: DEFAULT_MAX_CHARS,
            encode_fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.record_type_code()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }

    /// Record tag packed into the host's u32 form
    pub fn record_type_code(&self) -> Result<u32, SettingsError> {
        encode_type_code(&self.record_type)
            .ok_or_else(|| SettingsError::InvalidRecordType(self.record_type.clone()))
    }

    /// Codec configured with this cap and fallback
    pub fn codec(&self) -> StringCodec {
        StringCodec::new(self.max_encoded_chars, self.encode_fallback.clone())
    }
}
