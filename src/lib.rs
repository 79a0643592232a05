//! Dynamic form persistence - save/load helpers for a game-engine plugin
//!
//! Core modules:
//! - `codec`: Printable-ASCII string codec for fixed-size record writes
//! - `persistence`: Host record interface, keyed store, save/load
//! - `settings`: Record tag/version and codec configuration
//! - `notify`: Plugin context and player-facing notifications
//! - `types`: Store keys and values

pub mod codec;
pub mod error;
pub mod notify;
pub mod persistence;
pub mod settings;
pub mod types;

pub use codec::{EncodedChar, StringCodec, decode};
pub use error::{CodecError, PersistError, SettingsError};
pub use notify::{LogNotifier, Notification, Notifier, PluginContext, PluginVersion};
pub use persistence::{
    BaseData, DfSaveLoadData, LoadSummary, MemorySerialization, Persist, SerializationInterface,
};
pub use settings::Settings;
pub use types::{DfSaveData, DfSaveDataList, FormId, FormKey, is_dynamic_form_id};
