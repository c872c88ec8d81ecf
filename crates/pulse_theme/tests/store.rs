use std::sync::{Arc, Mutex};

use pollster::block_on;
use pretty_assertions::assert_eq;
use pulse_theme::{
    Appearance, ColorScheme, FileStorage, ManualAppearance, MemoryStorage, ThemePreference,
    ThemePreferenceStore, STORAGE_KEY,
};

struct Harness {
    storage: Arc<MemoryStorage>,
    os: Arc<ManualAppearance>,
    store: Arc<ThemePreferenceStore>,
}

impl Harness {
    fn new(os: Appearance) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let os = Arc::new(ManualAppearance::new(os));
        let store = ThemePreferenceStore::new(storage.clone(), os.clone());
        Self { storage, os, store }
    }

    /// A second store over the same storage, as after a process restart
    fn restart(&self, os: Appearance) -> Arc<ThemePreferenceStore> {
        let store = ThemePreferenceStore::new(
            self.storage.clone(),
            Arc::new(ManualAppearance::new(os)),
        );
        block_on(store.initialize());
        store
    }

    fn stored(&self) -> Option<ThemePreference> {
        self.storage
            .value(STORAGE_KEY)
            .map(|raw| ThemePreference::from_json(&raw).unwrap())
    }
}

#[test]
fn default_state_before_initialize() {
    let h = Harness::new(Appearance::Dark);
    assert_eq!(h.store.preference(), ThemePreference::system(ColorScheme::Light));
}

#[test]
fn first_run_seeds_from_os() {
    for (os, expected) in [
        (Appearance::Dark, ColorScheme::Dark),
        (Appearance::Light, ColorScheme::Light),
        (Appearance::NoPreference, ColorScheme::Light),
    ] {
        let h = Harness::new(os);
        block_on(h.store.initialize());
        assert_eq!(h.store.preference(), ThemePreference::system(expected), "os={os}");
        // Seeding is not a mutation; nothing is written.
        assert_eq!(h.stored(), None);
    }
}

#[test]
fn set_color_scheme_applies_before_persisting() {
    let h = Harness::new(Appearance::Dark);
    block_on(h.store.initialize());

    let pending = h.store.set_color_scheme(ColorScheme::Dark);
    // Same value as the OS, but it is now an explicit override.
    assert_eq!(h.store.preference(), ThemePreference::manual(ColorScheme::Dark));
    assert_eq!(h.stored(), None);

    block_on(pending);
    assert_eq!(h.stored(), Some(ThemePreference::manual(ColorScheme::Dark)));
}

#[test]
fn toggle_flips_and_clears_system_mode() {
    let h = Harness::new(Appearance::Light);
    block_on(h.store.initialize());

    let mut expected = ColorScheme::Light;
    for _ in 0..3 {
        let pending = h.store.toggle_color_scheme();
        expected = expected.toggle();
        assert_eq!(h.store.preference(), ThemePreference::manual(expected));
        block_on(pending);
    }
    assert_eq!(h.stored(), Some(ThemePreference::manual(ColorScheme::Dark)));
}

#[test]
fn entering_system_mode_rereads_os() {
    let h = Harness::new(Appearance::Light);
    block_on(h.store.set_color_scheme(ColorScheme::Light));

    h.os.set(Appearance::Dark);
    assert_eq!(h.store.color_scheme(), ColorScheme::Light);

    block_on(h.store.set_is_system_theme(true));
    assert_eq!(h.store.preference(), ThemePreference::system(ColorScheme::Dark));
    assert_eq!(h.stored(), Some(ThemePreference::system(ColorScheme::Dark)));

    h.os.set(Appearance::NoPreference);
    block_on(h.store.set_is_system_theme(true));
    assert_eq!(h.store.preference(), ThemePreference::system(ColorScheme::Light));
}

#[test]
fn leaving_system_mode_keeps_scheme() {
    let h = Harness::new(Appearance::Dark);
    block_on(h.store.initialize());

    block_on(h.store.set_is_system_theme(false));
    assert_eq!(h.store.preference(), ThemePreference::manual(ColorScheme::Dark));
    assert_eq!(h.stored(), Some(ThemePreference::manual(ColorScheme::Dark)));
}

#[test]
fn os_events_only_apply_in_system_mode() {
    let h = Harness::new(Appearance::Light);
    block_on(h.store.initialize());

    h.os.set(Appearance::Dark);
    assert_eq!(h.store.preference(), ThemePreference::system(ColorScheme::Dark));
    h.os.set(Appearance::NoPreference);
    assert_eq!(h.store.preference(), ThemePreference::system(ColorScheme::Light));

    block_on(h.store.set_color_scheme(ColorScheme::Light));
    h.os.set(Appearance::Dark);
    assert_eq!(h.store.preference(), ThemePreference::manual(ColorScheme::Light));
}

#[test]
fn os_driven_changes_are_not_persisted() {
    let h = Harness::new(Appearance::Light);
    block_on(h.store.set_is_system_theme(true));
    let writes = h.storage.write_count();

    h.os.set(Appearance::Dark);
    assert_eq!(h.storage.write_count(), writes);
    assert_eq!(h.stored(), Some(ThemePreference::system(ColorScheme::Light)));
}

#[test]
fn restart_restores_persisted_pair() {
    let h = Harness::new(Appearance::Light);
    block_on(h.store.initialize());

    let cases: Vec<(Box<dyn Fn(&ThemePreferenceStore)>, ThemePreference)> = vec![
        (
            Box::new(|s: &ThemePreferenceStore| block_on(s.set_color_scheme(ColorScheme::Dark))),
            ThemePreference::manual(ColorScheme::Dark),
        ),
        (
            Box::new(|s: &ThemePreferenceStore| block_on(s.toggle_color_scheme())),
            ThemePreference::manual(ColorScheme::Light),
        ),
        (
            Box::new(|s: &ThemePreferenceStore| block_on(s.set_is_system_theme(true))),
            ThemePreference::system(ColorScheme::Light),
        ),
        (
            Box::new(|s: &ThemePreferenceStore| block_on(s.set_is_system_theme(false))),
            ThemePreference::manual(ColorScheme::Light),
        ),
    ];

    for (mutate, expected) in cases {
        mutate(h.store.as_ref());
        // The restarted process sees a different OS value; the record wins.
        let restarted = h.restart(Appearance::Dark);
        assert_eq!(restarted.preference(), expected);
    }
}

#[test]
fn write_failure_keeps_in_memory_state() {
    let h = Harness::new(Appearance::Light);
    block_on(h.store.initialize());
    block_on(h.store.set_color_scheme(ColorScheme::Light));

    h.storage.set_fail_writes(true);
    block_on(h.store.set_color_scheme(ColorScheme::Dark));

    assert_eq!(h.store.preference(), ThemePreference::manual(ColorScheme::Dark));
    // Durable state still holds the last successful write.
    assert_eq!(h.stored(), Some(ThemePreference::manual(ColorScheme::Light)));
    assert_eq!(
        h.restart(Appearance::Light).preference(),
        ThemePreference::manual(ColorScheme::Light)
    );
}

#[test]
fn read_failure_leaves_default_state() {
    let h = Harness::new(Appearance::Dark);
    h.storage.set_fail_reads(true);
    block_on(h.store.initialize());
    assert_eq!(h.store.preference(), ThemePreference::default());
}

#[test]
fn read_failure_on_remount_resets_to_default() {
    let h = Harness::new(Appearance::Light);
    block_on(h.store.set_color_scheme(ColorScheme::Dark));

    h.storage.set_fail_reads(true);
    block_on(h.store.initialize());
    assert_eq!(h.store.preference(), ThemePreference::system(ColorScheme::Light));
    // The durable record is left alone.
    assert_eq!(h.stored(), Some(ThemePreference::manual(ColorScheme::Dark)));
}

#[test]
fn corrupt_record_falls_back_to_os() {
    let h = Harness::new(Appearance::Dark);
    h.storage.insert(STORAGE_KEY, "{\"colorScheme\":");
    block_on(h.store.initialize());
    assert_eq!(h.store.preference(), ThemePreference::system(ColorScheme::Dark));
}

#[test]
fn unpersisted_mutation_is_lost_on_restart() {
    let h = Harness::new(Appearance::Light);
    block_on(h.store.set_color_scheme(ColorScheme::Light));

    // Crash inside the window: applied in memory, write never ran.
    let pending = h.store.set_color_scheme(ColorScheme::Dark);
    drop(pending);

    assert_eq!(h.store.color_scheme(), ColorScheme::Dark);
    assert_eq!(
        h.restart(Appearance::Light).preference(),
        ThemePreference::manual(ColorScheme::Light)
    );
}

#[test]
fn racing_writes_last_landed_wins() {
    let h = Harness::new(Appearance::Light);
    let first = h.store.set_color_scheme(ColorScheme::Dark);
    let second = h.store.set_color_scheme(ColorScheme::Light);

    // In-memory reflects the most recent mutation regardless of I/O order.
    assert_eq!(h.store.preference(), ThemePreference::manual(ColorScheme::Light));

    block_on(second);
    block_on(first);
    assert_eq!(h.stored(), Some(ThemePreference::manual(ColorScheme::Dark)));
    assert_eq!(h.store.preference(), ThemePreference::manual(ColorScheme::Light));
}

#[test]
fn subscribers_see_each_change_once() {
    let h = Harness::new(Appearance::Light);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let id = h.store.subscribe(move |p| sink.lock().unwrap().push(p));

    block_on(h.store.initialize());
    h.os.set(Appearance::Dark);
    h.os.set(Appearance::Dark);
    block_on(h.store.set_color_scheme(ColorScheme::Light));
    h.os.set(Appearance::Light);
    block_on(h.store.set_color_scheme(ColorScheme::Light));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ThemePreference::system(ColorScheme::Dark),
            ThemePreference::manual(ColorScheme::Light),
        ]
    );

    assert!(h.store.unsubscribe(id));
    block_on(h.store.toggle_color_scheme());
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn file_storage_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let open = |os| {
        let store = ThemePreferenceStore::new(
            Arc::new(FileStorage::new(dir.path())),
            Arc::new(ManualAppearance::new(os)),
        );
        block_on(store.initialize());
        store
    };

    let store = open(Appearance::Light);
    assert_eq!(store.preference(), ThemePreference::system(ColorScheme::Light));
    block_on(store.toggle_color_scheme());
    drop(store);

    let store = open(Appearance::Light);
    assert_eq!(store.preference(), ThemePreference::manual(ColorScheme::Dark));

    let raw = std::fs::read_to_string(dir.path().join(format!("{STORAGE_KEY}.json"))).unwrap();
    assert_eq!(raw, r#"{"colorScheme":"dark","isSystemTheme":false}"#);
}
