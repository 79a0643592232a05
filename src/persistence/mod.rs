//! Save/load through the host's record serialization API
//!
//! Features:
//! - Plain-data record layouts matching the host plugin
//! - Size-prefixed codec strings
//! - Re-entrant keyed store with versioned save/load
//! - Form id resolution on load, unresolved entries dropped
//! - In-memory host for tests and offline use

pub mod df_data;
pub mod interface;
pub mod memory;
pub mod record;
pub mod store;

pub use df_data::DfSaveLoadData;
pub use interface::{RecordIo, SerializationInterface};
pub use memory::{MemorySerialization, RecordInfo};
pub use record::{RawEncodedChar, RawSaveData, decode_type_code, encode_type_code};
pub use store::{BaseData, LoadSummary, Persist};
