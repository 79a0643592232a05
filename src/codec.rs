//! String codec for the record stream
//!
//! The host's record API only accepts fixed-size plain data, so strings are
//! stored as a sequence of `(code, is_upper)` pairs. Only printable ASCII
//! survives; everything else is dropped on the way in.

use crate::error::CodecError;

/// Default cap on encoded characters
pub const DEFAULT_MAX_CHARS: usize = 100;

/// Default payload written when encoding fails
pub const DEFAULT_FALLBACK: &str = "ERROR";

/// A single encoded character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedChar {
    /// Raw character code (not lowercased)
    pub code: i32,
    /// Whether the character was an uppercase letter
    pub is_upper: bool,
}

/// Printable and alphanumeric, whitespace or punctuation, C-locale rules
fn is_storable(byte: u8) -> bool {
    let printable = byte == b' ' || byte.is_ascii_graphic();
    printable
        && (byte.is_ascii_alphanumeric()
            || byte.is_ascii_whitespace()
            || byte.is_ascii_punctuation())
}

/// Encoder/decoder with a character cap and a fallback payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringCodec {
    pub max_chars: usize,
    pub fallback: String,
}

impl Default for StringCodec {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl StringCodec {
    pub fn new(max_chars: usize, fallback: impl Into<String>) -> Self {
        Self {
            max_chars,
            fallback: fallback.into(),
        }
    }

    /// Encode up to `max_chars` bytes of `input`, stopping at a NUL.
    ///
    /// Non-conforming bytes are skipped but still count against the cap.
    pub fn encode(&self, input: &str) -> Result<Vec<EncodedChar>, CodecError> {
        let scanned = input
            .as_bytes()
            .iter()
            .take(self.max_chars)
            .take_while(|&&b| b != 0);

        let mut encoded: Vec<EncodedChar> = Vec::new();
        encoded.try_reserve(scanned.clone().count())?;

        for &byte in scanned {
            if is_storable(byte) {
                encoded.push(EncodedChar {
                    code: i32::from(byte),
                    is_upper: byte.is_ascii_uppercase(),
                });
            }
        }
        Ok(encoded)
    }

    /// Encode `input`, substituting the fallback payload on failure
    pub fn encode_or_fallback(&self, input: &str) -> Vec<EncodedChar> {
        self.or_fallback(self.encode(input))
    }

    fn or_fallback(&self, result: Result<Vec<EncodedChar>, CodecError>) -> Vec<EncodedChar> {
        match result {
            Ok(encoded) => encoded,
            Err(e) => {
                log::warn!("Error encoding string: {e}; writing {:?} instead", self.fallback);
                self.encode(&self.fallback).unwrap_or_default()
            }
        }
    }
}

/// Rebuild a string from encoded pairs.
///
/// Codes outside `[0, 255]` and characters that are not alphanumeric,
/// whitespace or punctuation are dropped. Characters not flagged uppercase
/// are lowercased.
pub fn decode(encoded: &[EncodedChar]) -> String {
    encoded
        .iter()
        .filter_map(|ch| {
            let byte = u8::try_from(ch.code).ok()?;
            if !(byte.is_ascii_alphanumeric()
                || byte.is_ascii_whitespace()
                || byte.is_ascii_punctuation())
            {
                return None;
            }
            let c = char::from(byte);
            Some(if ch.is_upper { c } else { c.to_ascii_lowercase() })
        })
        .collect()
}
