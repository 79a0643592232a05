use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

use dynform_persist::{
    DfSaveData, DfSaveLoadData, FormKey, MemorySerialization, Notification, Notifier, Persist,
    PersistError, PluginContext, PluginVersion, Settings,
};
use proptest::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn editor_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_ ]{0,40}"
}

fn save_data() -> impl Strategy<Value = DfSaveData> {
    (
        any::<u32>(),
        proptest::option::of(any::<u32>()),
        prop_oneof![Just(-1.0f32), 0.0f32..10_000.0],
    )
        .prop_map(|(dyn_formid, custom_id, acteff_elapsed)| DfSaveData {
            dyn_formid,
            custom_id,
            acteff_elapsed,
        })
}

fn store_contents() -> impl Strategy<Value = BTreeMap<FormKey, Vec<DfSaveData>>> {
    proptest::collection::btree_map(
        (any::<u32>(), editor_id()).prop_map(|(id, eid)| FormKey::new(id, eid)),
        proptest::collection::vec(save_data(), 0..5),
        0..20,
    )
}

fn fill(store: &DfSaveLoadData, contents: &BTreeMap<FormKey, Vec<DfSaveData>>) {
    for (key, values) in contents {
        store.set_data(key.clone(), values.clone());
    }
}

fn snapshot(store: &DfSaveLoadData) -> BTreeMap<FormKey, Vec<DfSaveData>> {
    store.store().snapshot()
}

proptest! {
    #[test]
    fn test_save_then_load_reproduces_store(contents in store_contents()) {
        let settings = Settings::default();
        let tag = settings.record_type_code().unwrap();

        let store = DfSaveLoadData::with_codec(settings.codec());
        fill(&store, &contents);

        let mut host = MemorySerialization::new();
        store.save_record(&mut host, tag, settings.record_version).unwrap();
        let info = host.open_for_read(tag).unwrap();
        prop_assert_eq!(info.version, settings.record_version);

        let restored = DfSaveLoadData::with_codec(settings.codec());
        let summary = restored.load(&mut host).unwrap();
        prop_assert_eq!(summary.loaded, contents.len());
        prop_assert_eq!(summary.skipped, 0);
        prop_assert_eq!(snapshot(&restored), contents);
    }

    #[test]
    fn test_unresolvable_key_is_absent_after_load(
        contents in store_contents().prop_filter("need a key", |c| !c.is_empty()),
        pick in any::<prop::sample::Index>(),
    ) {
        let store = DfSaveLoadData::new();
        fill(&store, &contents);
        let lost = pick.get(&contents.keys().collect::<Vec<_>>()).form_id;

        let mut host = MemorySerialization::new();
        store.save_record(&mut host, 1, 1).unwrap();
        host.open_for_read(1).unwrap();
        host.forget(lost);

        let restored = DfSaveLoadData::new();
        let summary = restored.load(&mut host).unwrap();

        let expected: BTreeMap<_, _> = contents
            .into_iter()
            .filter(|(key, _)| key.form_id != lost)
            .collect();
        prop_assert_eq!(summary.loaded, expected.len());
        prop_assert!(summary.skipped >= 1);
        prop_assert_eq!(snapshot(&restored), expected);
    }
}

#[test]
fn test_long_editor_id_is_truncated_on_save() {
    init_logger();
    let store = DfSaveLoadData::new();
    let long_id = "X".repeat(120);
    store.set_data(FormKey::new(10, long_id), vec![DfSaveData::new(0xFF00_0001)]);

    let mut host = MemorySerialization::new();
    store.save_record(&mut host, 1, 1).unwrap();
    host.open_for_read(1).unwrap();

    let restored = DfSaveLoadData::new();
    restored.load(&mut host).unwrap();
    assert_eq!(restored.store().keys(), vec![FormKey::new(10, "X".repeat(100))]);
}

#[test]
fn test_get_set_clear() {
    let store = DfSaveLoadData::new();
    let key = FormKey::new(0x0001_0F00, "SteelDagger");
    let sentinel = vec![DfSaveData::new(0xDEAD)];

    assert_eq!(store.get_data(&key, sentinel.clone()), sentinel);

    let value = vec![DfSaveData::new(0xFF00_0001), DfSaveData::new(0xFF00_0002)];
    store.set_data(key.clone(), value.clone());
    assert_eq!(store.get_data(&key, sentinel.clone()), value);

    store.clear();
    assert_eq!(store.get_data(&key, sentinel.clone()), sentinel);
}

#[test]
fn test_concurrent_writers_keep_every_key() {
    let store = Arc::new(DfSaveLoadData::new());
    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..100u32 {
                    let key = FormKey::new((t << 16) | i, format!("Item{t}_{i}"));
                    store.set_data(key.clone(), vec![DfSaveData::new(i)]);
                    store.set_data(key, vec![DfSaveData::new(i + 1)]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.store().len(), 400);
    for t in 0..4u32 {
        for i in 0..100u32 {
            let key = FormKey::new((t << 16) | i, format!("Item{t}_{i}"));
            assert_eq!(store.get_data(&key, Vec::new()), vec![DfSaveData::new(i + 1)]);
        }
    }
}

#[derive(Default)]
struct Collected(std::sync::Mutex<Vec<String>>);

impl Notifier for Collected {
    fn notify(&self, ctx: &PluginContext, notification: &Notification) {
        self.0.lock().unwrap().push(notification.text(ctx));
    }
}

#[test]
fn test_failed_save_is_reported_by_caller() {
    init_logger();
    let ctx = PluginContext::new("Dynamic Forms", PluginVersion::new(0, 3, 0, 0));
    let notifier = Collected::default();

    let store = DfSaveLoadData::new();
    store.set_data(FormKey::new(1, "One"), vec![DfSaveData::new(2)]);
    let mut host = MemorySerialization::new();
    host.fail_writes_after(0);

    if let Err(e) = store.save_record(&mut host, 1, 1) {
        assert!(matches!(e, PersistError::Write { what: "record count" }));
        notifier.notify(&ctx, &Notification::Custom(format!("Save failed: {e}")));
    }
    assert_eq!(
        notifier.0.lock().unwrap().as_slice(),
        ["Dynamic Forms: Save failed: failed to write record count"]
    );
}
