//! Generic lock-guarded keyed store
//!
//! [`BaseData`] owns a map behind a re-entrant lock. Every public call holds
//! the lock for its whole duration, so a save or load blocks all other access
//! until it finishes. The lock is re-entrant because host callbacks may nest
//! with other locked entry points on the same thread.

use std::cell::RefCell;
use std::collections::BTreeMap;

use parking_lot::ReentrantMutex;

use super::interface::SerializationInterface;
use super::record::decode_type_code;
use crate::error::PersistError;

/// Outcome of a successful load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Entries restored into the store
    pub loaded: usize,
    /// Entries dropped because their form id no longer resolves
    pub skipped: usize,
}

/// Save/load hooks for a store serialized through the host
pub trait Persist {
    /// Short name used in log lines
    fn type_name(&self) -> &'static str;

    /// Serialize the store into the record that is already open
    fn save(&self, intfc: &mut dyn SerializationInterface) -> Result<(), PersistError>;

    /// Open a record of `record_type`/`version`, then [`save`](Persist::save) into it
    fn save_record(
        &self,
        intfc: &mut dyn SerializationInterface,
        record_type: u32,
        version: u32,
    ) -> Result<(), PersistError> {
        if !intfc.open_record(record_type, version) {
            log::error!("Failed to open record for {} serialization!", self.type_name());
            return Err(PersistError::OpenRecord {
                record_type: decode_type_code(record_type),
                version,
            });
        }
        self.save(intfc)
    }

    /// Replace the store contents with what the current record holds
    fn load(&self, intfc: &mut dyn SerializationInterface) -> Result<LoadSummary, PersistError>;

    fn dump_to_log(&self);
}

/// Map from `K` to `V` guarded by a re-entrant lock
pub struct BaseData<K, V> {
    data: ReentrantMutex<RefCell<BTreeMap<K, V>>>,
}

impl<K: Ord, V> Default for BaseData<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> BaseData<K, V> {
    pub fn new() -> Self {
        Self {
            data: ReentrantMutex::new(RefCell::new(BTreeMap::new())),
        }
    }

    /// Stored value for `key`, or `missing` if absent
    pub fn get_data(&self, key: &K, missing: V) -> V
    where
        V: Clone,
    {
        let guard = self.data.lock();
        let map = guard.borrow();
        map.get(key).cloned().unwrap_or(missing)
    }

    /// Insert or overwrite the value for `key`
    pub fn set_data(&self, key: K, value: V) {
        let guard = self.data.lock();
        guard.borrow_mut().insert(key, value);
    }

    pub fn clear(&self) {
        let guard = self.data.lock();
        guard.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.data.lock().borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &K) -> bool {
        self.data.lock().borrow().contains_key(key)
    }

    /// Snapshot of the current keys in order
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.data.lock().borrow().keys().cloned().collect()
    }

    /// Whether any key maps to `value`
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.data.lock().borrow().values().any(|v| v == value)
    }

    /// Copy of the whole map
    pub fn snapshot(&self) -> BTreeMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.data.lock().borrow().clone()
    }

    /// Run `f` over a copy of the entries with the lock held.
    ///
    /// The map is not borrowed while `f` runs, so `f` may re-enter the store,
    /// including to mutate it. Other threads stay blocked until `f` returns.
    pub(crate) fn with_entries<R>(&self, f: impl FnOnce(Vec<(K, V)>) -> R) -> R
    where
        K: Clone,
        V: Clone,
    {
        let guard = self.data.lock();
        let entries: Vec<(K, V)> = guard
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        f(entries)
    }

    /// Empty the map and insert entries produced by `fill` one at a time.
    ///
    /// The map is not borrowed while `fill` runs, so `fill` may re-enter the
    /// store. Entries inserted before an error are kept.
    pub(crate) fn replace_with<E>(
        &self,
        fill: impl FnOnce(&mut dyn FnMut(K, V)) -> Result<(), E>,
    ) -> Result<(), E> {
        let guard = self.data.lock();
        guard.borrow_mut().clear();
        let mut insert = |key: K, value: V| {
            guard.borrow_mut().insert(key, value);
        };
        fill(&mut insert)
    }
}
