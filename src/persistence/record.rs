//! Plain-data layouts written to the record stream
//!
//! These mirror the padded C layouts the host writes, so a save produced
//! here reads back in the plugin and vice versa.

use bytemuck::{Pod, Zeroable};

use crate::codec::EncodedChar;
use crate::types::DfSaveData;

/// One codec pair: `code:i32, is_upper:u8, pad:3`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct RawEncodedChar {
    pub code: i32,
    pub is_upper: u8,
    pub _pad: [u8; 3],
}

impl From<EncodedChar> for RawEncodedChar {
    fn from(ch: EncodedChar) -> Self {
        Self {
            code: ch.code,
            is_upper: u8::from(ch.is_upper),
            _pad: [0; 3],
        }
    }
}

impl From<RawEncodedChar> for EncodedChar {
    fn from(raw: RawEncodedChar) -> Self {
        Self {
            code: raw.code,
            is_upper: raw.is_upper != 0,
        }
    }
}

/// One value entry: `dyn_formid:u32, has_custom_id:u8, pad:3, custom_id:u32, elapsed:f32`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RawSaveData {
    pub dyn_formid: u32,
    pub has_custom_id: u8,
    pub _pad: [u8; 3],
    pub custom_id: u32,
    pub acteff_elapsed: f32,
}

impl From<&DfSaveData> for RawSaveData {
    fn from(data: &DfSaveData) -> Self {
        Self {
            dyn_formid: data.dyn_formid,
            has_custom_id: u8::from(data.custom_id.is_some()),
            _pad: [0; 3],
            custom_id: data.custom_id.unwrap_or(0),
            acteff_elapsed: data.acteff_elapsed,
        }
    }
}

impl From<RawSaveData> for DfSaveData {
    fn from(raw: RawSaveData) -> Self {
        Self {
            dyn_formid: raw.dyn_formid,
            custom_id: (raw.has_custom_id != 0).then_some(raw.custom_id),
            acteff_elapsed: raw.acteff_elapsed,
        }
    }
}

/// Render a record type tag as its four characters (`0x44465356` -> `"DFSV"`)
pub fn decode_type_code(type_code: u32) -> String {
    type_code
        .to_be_bytes()
        .iter()
        .map(|&b| char::from(b))
        .collect()
}

/// Pack four ASCII characters into a record type tag
pub fn encode_type_code(tag: &str) -> Option<u32> {
    let bytes: [u8; 4] = tag.as_bytes().try_into().ok()?;
    bytes
        .iter()
        .all(u8::is_ascii)
        .then(|| u32::from_be_bytes(bytes))
}
