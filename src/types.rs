//! Keys and values held by the dynamic form store

/// Host-assigned handle to a persistent game object
pub type FormId = u32;

/// First form id in the host's dynamic (runtime-created) range
pub const DYNAMIC_FORMID_START: FormId = 0xFF00_0000;

/// Sentinel for an unset active-effect elapsed time
pub const UNSET_ELAPSED: f32 = -1.0;

/// Dynamic forms are renumbered by the host across reloads
#[inline]
pub fn is_dynamic_form_id(id: FormId) -> bool {
    id >= DYNAMIC_FORMID_START
}

/// Store key: a form id together with its editor id
///
/// Either half may fail to resolve after a reload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormKey {
    pub form_id: FormId,
    pub editor_id: String,
}

impl FormKey {
    pub fn new(form_id: FormId, editor_id: impl Into<String>) -> Self {
        Self {
            form_id,
            editor_id: editor_id.into(),
        }
    }
}

/// Per-instance data saved for a dynamic form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DfSaveData {
    pub dyn_formid: FormId,
    /// Custom id override, if one was assigned
    pub custom_id: Option<u32>,
    /// Elapsed active-effect time, [`UNSET_ELAPSED`] when not tracked
    pub acteff_elapsed: f32,
}

impl Default for DfSaveData {
    fn default() -> Self {
        Self {
            dyn_formid: 0,
            custom_id: None,
            acteff_elapsed: UNSET_ELAPSED,
        }
    }
}

impl DfSaveData {
    pub fn new(dyn_formid: FormId) -> Self {
        Self {
            dyn_formid,
            ..Default::default()
        }
    }

    /// Elapsed time, or `None` for the unset sentinel
    pub fn elapsed(&self) -> Option<f32> {
        (self.acteff_elapsed != UNSET_ELAPSED).then_some(self.acteff_elapsed)
    }
}

/// Stored value sequence for one key
pub type DfSaveDataList = Vec<DfSaveData>;
