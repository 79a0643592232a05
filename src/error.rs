//! Error types
//!
//! The store boundary reports failures as `Result`s; `is_ok()` is the
//! success flag the host callbacks hand back.

use std::collections::TryReserveError;

/// String codec failures
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to reserve space for encoded string: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Record serialization failures
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The host refused to open a record
    #[error("failed to open record {record_type} (version {version})")]
    OpenRecord { record_type: String, version: u32 },

    /// A write call into the open record failed
    #[error("failed to write {what}")]
    Write { what: &'static str },

    /// A read call from the current record failed
    #[error("failed to read {what}")]
    Read { what: &'static str },

    #[error("string encoding failed: {0}")]
    Encode(#[from] CodecError),

    /// A stored count does not fit in this platform's `usize`
    #[error("stored length {0} does not fit in memory")]
    LengthOverflow(u64),
}

/// Settings loading failures
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Record types are exactly four ASCII characters
    #[error("invalid record type {0:?}, expected four ASCII characters")]
    InvalidRecordType(String),
}
