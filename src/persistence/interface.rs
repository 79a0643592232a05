//! Host serialization interface
//!
//! The host hands the plugin a record-oriented save interface during its
//! save/load callbacks. It only moves fixed-size plain data, so everything
//! richer (sizes, strings, value entries) goes through [`RecordIo`].

use bytemuck::{Pod, Zeroable};

use crate::codec::{self, EncodedChar, StringCodec};
use crate::error::PersistError;
use crate::persistence::record::RawEncodedChar;
use crate::types::FormId;

/// Record-oriented save/load API provided by the host
#[cfg_attr(test, mockall::automock)]
pub trait SerializationInterface {
    /// Start a new record with the given type tag and version
    fn open_record(&mut self, record_type: u32, version: u32) -> bool;

    /// Append `data` to the open record
    fn write_record_data(&mut self, data: &[u8]) -> bool;

    /// Fill `buf` from the current record; false on underrun
    fn read_record_data(&mut self, buf: &mut [u8]) -> bool;

    /// Map a form id saved in an earlier session to its current value
    fn resolve_form_id(&self, old_form_id: FormId) -> Option<FormId>;
}

/// Typed reads and writes on top of [`SerializationInterface`]
pub trait RecordIo: SerializationInterface {
    fn write_plain<T: Pod>(&mut self, value: &T, what: &'static str) -> Result<(), PersistError> {
        if self.write_record_data(bytemuck::bytes_of(value)) {
            Ok(())
        } else {
            Err(PersistError::Write { what })
        }
    }

    fn read_plain<T: Pod>(&mut self, what: &'static str) -> Result<T, PersistError> {
        let mut value = <T as Zeroable>::zeroed();
        if self.read_record_data(bytemuck::bytes_of_mut(&mut value)) {
            Ok(value)
        } else {
            Err(PersistError::Read { what })
        }
    }

    /// Sizes are written as the host's 64-bit `size_t`
    fn write_size(&mut self, size: usize, what: &'static str) -> Result<(), PersistError> {
        self.write_plain(&(size as u64), what)
    }

    fn read_size(&mut self, what: &'static str) -> Result<usize, PersistError> {
        let size: u64 = self.read_plain(what)?;
        usize::try_from(size).map_err(|_| PersistError::LengthOverflow(size))
    }

    /// Write a size-prefixed codec string, falling back to the codec's
    /// fallback payload if encoding fails
    fn write_string(&mut self, value: &str, codec: &StringCodec) -> Result<(), PersistError> {
        let encoded = codec.encode_or_fallback(value);
        self.write_size(encoded.len(), "string length")?;
        for ch in encoded {
            self.write_plain(&RawEncodedChar::from(ch), "string character")?;
        }
        Ok(())
    }

    fn read_string(&mut self) -> Result<String, PersistError> {
        let len = self.read_size("string length")?;
        let mut encoded: Vec<EncodedChar> = Vec::new();
        for _ in 0..len {
            let raw: RawEncodedChar = self.read_plain("string character")?;
            encoded.push(raw.into());
        }
        Ok(codec::decode(&encoded))
    }
}

impl<S: SerializationInterface + ?Sized> RecordIo for S {}

