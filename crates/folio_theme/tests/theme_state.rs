use folio_theme::{
    ColorScheme, JsonFileStore, KeyValueStore, MemoryStore, ReadOnlyStore, ThemeState,
    THEME_STORAGE_KEY,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

#[test]
fn first_visit_defaults_to_dark() {
    let store = Arc::new(MemoryStore::new());
    let theme = ThemeState::load(store.clone());

    assert_eq!(theme.get(), ColorScheme::Dark);
    assert_eq!(theme.root_class(), Some("dark"));
    assert_eq!(store.get(THEME_STORAGE_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn double_toggle_restores_original() {
    for initial in ["light", "dark"] {
        let store = Arc::new(MemoryStore::with_entry(THEME_STORAGE_KEY, initial));
        let mut theme = ThemeState::load(store.clone());
        let original = theme.get();

        theme.toggle();
        theme.toggle();

        assert_eq!(theme.get(), original);
        assert_eq!(store.get(THEME_STORAGE_KEY).unwrap().as_deref(), Some(initial));
    }
}

#[test]
fn toggle_persists_across_reload() {
    let store = Arc::new(MemoryStore::new());
    let mut theme = ThemeState::load(store.clone());
    assert_eq!(theme.toggle(), ColorScheme::Light);
    drop(theme);

    let reloaded = ThemeState::load(store);
    assert_eq!(reloaded.get(), ColorScheme::Light);
    assert_eq!(reloaded.root_class(), None);
}

#[test]
fn file_store_persists_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".folio").join("storage.json");

    let mut theme = ThemeState::load(Arc::new(JsonFileStore::new(&path)));
    theme.toggle();

    let reloaded = ThemeState::load(Arc::new(JsonFileStore::new(&path)));
    assert_eq!(reloaded.get(), ColorScheme::Light);
}

#[test]
fn unknown_stored_value_falls_back_to_dark() {
    let store = Arc::new(MemoryStore::with_entry(THEME_STORAGE_KEY, "sepia"));
    let theme = ThemeState::load(store.clone());

    assert_eq!(theme.get(), ColorScheme::Dark);
    assert_eq!(store.get(THEME_STORAGE_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn failing_store_still_applies_theme_for_the_session() {
    let store = Arc::new(ReadOnlyStore::new().with_entry(THEME_STORAGE_KEY, "light"));
    let mut theme = ThemeState::load(store.clone());
    assert_eq!(theme.get(), ColorScheme::Light);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    theme.subscribe(move |scheme| sink.borrow_mut().push(scheme));

    assert_eq!(theme.toggle(), ColorScheme::Dark);
    assert_eq!(theme.get(), ColorScheme::Dark);
    assert_eq!(*seen.borrow(), vec![ColorScheme::Dark]);

    // Nothing was written, so a reload sees the old value
    let reloaded = ThemeState::load(store);
    assert_eq!(reloaded.get(), ColorScheme::Light);
}
