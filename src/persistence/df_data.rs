//! Save/load of dynamic form instance data
//!
//! Record layout, repeated per entry after a leading entry count:
//!
//! ```text
//! [formid:u32] [editorid: len:u64, len x (code:i32 upper:u8 pad:3)]
//! [count:u64] count x [dyn_formid:u32 has_custom:u8 pad:3 custom_id:u32 elapsed:f32]
//! ```

use super::interface::{RecordIo, SerializationInterface};
use super::record::RawSaveData;
use super::store::{BaseData, LoadSummary, Persist};
use crate::codec::StringCodec;
use crate::error::PersistError;
use crate::types::{DfSaveData, DfSaveDataList, FormKey};

/// Store of dynamic form data keyed by `(form id, editor id)`
#[derive(Default)]
pub struct DfSaveLoadData {
    data: BaseData<FormKey, DfSaveDataList>,
    codec: StringCodec,
}

impl DfSaveLoadData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `codec` for editor ids
    pub fn with_codec(codec: StringCodec) -> Self {
        Self {
            data: BaseData::new(),
            codec,
        }
    }

    pub fn codec(&self) -> &StringCodec {
        &self.codec
    }

    pub fn get_data(&self, key: &FormKey, missing: DfSaveDataList) -> DfSaveDataList {
        self.data.get_data(key, missing)
    }

    pub fn set_data(&self, key: FormKey, value: DfSaveDataList) {
        self.data.set_data(key, value);
    }

    pub fn clear(&self) {
        self.data.clear();
    }

    /// Underlying keyed store
    pub fn store(&self) -> &BaseData<FormKey, DfSaveDataList> {
        &self.data
    }
}

/// One entry read back from the record, before id resolution
struct LoadedEntry {
    raw_form_id: u32,
    resolved: Option<u32>,
    editor_id: String,
    values: DfSaveDataList,
}

fn read_entry(intfc: &mut dyn SerializationInterface) -> Result<LoadedEntry, PersistError> {
    let raw_form_id: u32 = intfc.read_plain("formid")?;
    let resolved = intfc.resolve_form_id(raw_form_id);

    let editor_id = intfc.read_string().inspect_err(|_| {
        log::error!("Failed to read editorid");
    })?;

    let count = intfc.read_size("rhs record count")?;
    log::trace!("Formid:{raw_form_id:#X} Editorid:{editor_id} rhs records:{count}");

    let mut values = DfSaveDataList::new();
    for _ in 0..count {
        let raw: RawSaveData = intfc.read_plain("rhs record")?;
        let value = DfSaveData::from(raw);
        log::trace!(
            "rhs content: dyn_formid: {:#X}, custom_id: {:?}, acteff_elapsed: {}",
            value.dyn_formid,
            value.custom_id,
            value.acteff_elapsed
        );
        values.push(value);
    }

    Ok(LoadedEntry {
        raw_form_id,
        resolved,
        editor_id,
        values,
    })
}

impl Persist for DfSaveLoadData {
    fn type_name(&self) -> &'static str {
        "DFSaveLoadData"
    }

    fn save(&self, intfc: &mut dyn SerializationInterface) -> Result<(), PersistError> {
        self.data.with_entries(|entries| -> Result<(), PersistError> {
            let num_records = entries.len();
            intfc.write_size(num_records, "record count").inspect_err(|_| {
                log::error!("Failed to save {num_records} data records");
            })?;

            for (key, values) in &entries {
                log::trace!("Formid:{:#X} Editorid:{}", key.form_id, key.editor_id);
                intfc.write_plain(&key.form_id, "formid").inspect_err(|_| {
                    log::error!("Failed to save formid {:#X}", key.form_id);
                })?;

                intfc
                    .write_string(&key.editor_id, &self.codec)
                    .inspect_err(|_| log::error!("Failed to save editorid {}", key.editor_id))?;

                intfc.write_size(values.len(), "rhs record count").inspect_err(|_| {
                    log::error!("Failed to save the size {} of rhs records", values.len());
                })?;

                for value in values {
                    intfc
                        .write_plain(&RawSaveData::from(value), "rhs record")
                        .inspect_err(|_| log::error!("Failed to save data"))?;
                }
            }
            log::info!("Saved {num_records} {} records", self.type_name());
            Ok(())
        })
    }

    fn load(&self, intfc: &mut dyn SerializationInterface) -> Result<LoadSummary, PersistError> {
        let mut summary = LoadSummary::default();

        self.data.replace_with(|insert| -> Result<(), PersistError> {
            let num_records = intfc.read_size("record count").inspect_err(|_| {
                log::error!("Failed to read {} record count", self.type_name());
            })?;
            log::info!("Loading data from serialization interface with size: {num_records}");

            for _ in 0..num_records {
                let entry = read_entry(intfc)?;
                let Some(form_id) = entry.resolved else {
                    log::warn!(
                        "Failed to resolve form ID {:#X} ({}), dropping its data",
                        entry.raw_form_id,
                        entry.editor_id
                    );
                    summary.skipped += 1;
                    continue;
                };

                log::debug!("Loaded data for formid {form_id:#X}, editorid {}", entry.editor_id);
                insert(FormKey::new(form_id, entry.editor_id), entry.values);
                summary.loaded += 1;
            }
            Ok(())
        })?;

        log::info!(
            "Loaded {} {} records ({} skipped)",
            summary.loaded,
            self.type_name(),
            summary.skipped
        );
        Ok(summary)
    }

    fn dump_to_log(&self) {
        let map = self.data.snapshot();
        log::info!("{}: {} entries", self.type_name(), map.len());
        for (key, values) in &map {
            log::info!(
                "  {:#X} {:?}: {} instances",
                key.form_id,
                key.editor_id,
                values.len()
            );
            for value in values {
                log::debug!("    {value:?}");
            }
        }
    }
}
