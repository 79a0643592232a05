//! In-memory implementation of [`SerializationInterface`]
//!
//! Stands in for the host outside the game: records are kept as byte
//! buffers, form ids resolve through a remap table, and writes or record
//! opens can be made to fail on demand.

use std::collections::{HashMap, HashSet};

use super::interface::SerializationInterface;
use super::record::decode_type_code;
use crate::types::FormId;

/// Header of a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordInfo {
    pub record_type: u32,
    pub version: u32,
    pub length: usize,
}

#[derive(Debug, Clone)]
struct Record {
    record_type: u32,
    version: u32,
    data: Vec<u8>,
}

/// Read position inside the record list
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    record: usize,
    offset: usize,
}

/// Memory-backed record store
#[derive(Debug, Default)]
pub struct MemorySerialization {
    records: Vec<Record>,
    /// Index of the record currently open for writing
    open: Option<usize>,
    /// Record currently positioned for reading
    cursor: Option<Cursor>,
    /// Next record index scanned by `open_for_read`
    scan_from: usize,
    remapped: HashMap<FormId, FormId>,
    forgotten: HashSet<FormId>,
    writes_left: Option<usize>,
    fail_open: bool,
}

impl MemorySerialization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `old` to `new` on load
    pub fn remap(&mut self, old: FormId, new: FormId) -> &mut Self {
        self.remapped.insert(old, new);
        self
    }

    /// Make `id` fail to resolve on load
    pub fn forget(&mut self, id: FormId) -> &mut Self {
        self.forgotten.insert(id);
        self
    }

    /// Let the next `n` writes succeed, then fail every write after
    pub fn fail_writes_after(&mut self, n: usize) -> &mut Self {
        self.writes_left = Some(n);
        self
    }

    /// Refuse every `open_record` call
    pub fn fail_open(&mut self) -> &mut Self {
        self.fail_open = true;
        self
    }

    /// Headers of all stored records, in write order
    pub fn records(&self) -> Vec<RecordInfo> {
        self.records.iter().map(Record::info).collect()
    }

    /// Raw bytes of the record at `index`
    pub fn record_data(&self, index: usize) -> Option<&[u8]> {
        self.records.get(index).map(|r| r.data.as_slice())
    }

    /// Position the read cursor at the next record of `record_type`.
    ///
    /// Records are scanned in write order, so calling this repeatedly with
    /// the same type walks through every record of that type.
    pub fn open_for_read(&mut self, record_type: u32) -> Option<RecordInfo> {
        self.open = None;
        let index = self
            .records
            .iter()
            .enumerate()
            .skip(self.scan_from)
            .find(|(_, r)| r.record_type == record_type)
            .map(|(i, _)| i);

        let Some(index) = index else {
            log::debug!("No record of type {} left to read", decode_type_code(record_type));
            return None;
        };
        self.scan_from = index + 1;
        self.cursor = Some(Cursor {
            record: index,
            offset: 0,
        });
        Some(self.records[index].info())
    }

    /// Restart record scanning from the first record
    pub fn rewind(&mut self) {
        self.scan_from = 0;
        self.cursor = None;
    }

    /// Bytes left unread in the current record
    pub fn remaining(&self) -> usize {
        self.cursor
            .map(|c| self.records[c.record].data.len() - c.offset)
            .unwrap_or(0)
    }
}

impl Record {
    fn info(&self) -> RecordInfo {
        RecordInfo {
            record_type: self.record_type,
            version: self.version,
            length: self.data.len(),
        }
    }
}

impl SerializationInterface for MemorySerialization {
    fn open_record(&mut self, record_type: u32, version: u32) -> bool {
        if self.fail_open {
            return false;
        }
        self.records.push(Record {
            record_type,
            version,
            data: Vec::new(),
        });
        self.open = Some(self.records.len() - 1);
        true
    }

    fn write_record_data(&mut self, data: &[u8]) -> bool {
        let Some(index) = self.open else {
            return false;
        };
        if let Some(left) = self.writes_left.as_mut() {
            if *left == 0 {
                return false;
            }
            *left -= 1;
        }
        self.records[index].data.extend_from_slice(data);
        true
    }

    fn read_record_data(&mut self, buf: &mut [u8]) -> bool {
        let Some(cursor) = self.cursor.as_mut() else {
            return false;
        };
        let data = &self.records[cursor.record].data;
        let end = cursor.offset + buf.len();
        if end > data.len() {
            return false;
        }
        buf.copy_from_slice(&data[cursor.offset..end]);
        cursor.offset = end;
        true
    }

    fn resolve_form_id(&self, old_form_id: FormId) -> Option<FormId> {
        if self.forgotten.contains(&old_form_id) {
            return None;
        }
        Some(self.remapped.get(&old_form_id).copied().unwrap_or(old_form_id))
    }
}
