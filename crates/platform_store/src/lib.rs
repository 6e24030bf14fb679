//! Durable key/value persistence for the desktop session core.
//!
//! Every user-facing collection (settings, security, notes, files, and so
//! on) persists independently and synchronously under its own named key.
//! The core talks to [`KeyValueStore`] only, so reducer and session logic
//! are testable against [`MemoryStore`] without a browser storage backend.
//!
//! # Example
//!
//! ```rust
//! use platform_store::{load_collection_or_default, save_collection, MemoryStore};
//!
//! let store = MemoryStore::default();
//! save_collection(&store, "webtop.counter.v1", &3_u32).expect("save");
//! let value: u32 = load_collection_or_default(&store, "webtop.counter.v1");
//! assert_eq!(value, 3);
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod local;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

pub use local::LocalStore;

/// Persisted key for the user settings record.
pub const SETTINGS_KEY: &str = "webtop.settings.v1";
/// Persisted key for security credentials and wake-lock policy.
pub const SECURITY_KEY: &str = "webtop.security.v1";
/// Persisted key for the power-on flag used by resume-on-load.
pub const POWER_FLAG_KEY: &str = "webtop.power.v1";
/// Persisted key for the notes collection.
pub const NOTES_KEY: &str = "webtop.notes.v1";
/// Persisted key for the virtual-file collection.
pub const FILES_KEY: &str = "webtop.files.v1";
/// Persisted key for the installed-app list.
pub const INSTALLED_APPS_KEY: &str = "webtop.installed-apps.v1";
/// Persisted key for the user-defined custom app catalog.
pub const CUSTOM_APPS_KEY: &str = "webtop.custom-apps.v1";
/// Persisted key for the desktop shortcut list.
pub const SHORTCUTS_KEY: &str = "webtop.shortcuts.v1";
/// Persisted key for the widget list.
pub const WIDGETS_KEY: &str = "webtop.widgets.v1";
/// Persisted key for the notification list.
pub const NOTIFICATIONS_KEY: &str = "webtop.notifications.v1";
/// Persisted key for saved theme profiles.
pub const THEME_PROFILES_KEY: &str = "webtop.theme-profiles.v1";

/// Synchronous durable store addressed by named collection keys.
///
/// Writes land on the same tick as the mutation that triggered them; there
/// is no batching and no transactional grouping across collections.
pub trait KeyValueStore {
    /// Loads the raw JSON string stored under `key`, if present.
    fn load(&self, key: &str) -> Result<Option<String>, String>;

    /// Overwrites the raw JSON string stored under `key`.
    fn save(&self, key: &str, raw_json: &str) -> Result<(), String>;

    /// Deletes the value stored under `key`.
    fn delete(&self, key: &str) -> Result<(), String>;
}

/// No-op store for targets without durable storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl KeyValueStore for NoopStore {
    fn load(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

/// In-memory store used by tests and non-wasm targets.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, raw_json: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed collection, falling back to `T::default()`.
///
/// The fallback covers three distinct situations with one contract: the key
/// has never been written, the backend is unavailable, or the stored record
/// is corrupt JSON from a prior version or a manual edit. A parse failure
/// must never crash the session; it resets that collection only.
pub fn load_collection_or_default<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match store.load(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
        Ok(None) | Err(_) => T::default(),
    }
}

/// Loads a typed collection, distinguishing absence from corruption.
///
/// # Errors
///
/// Returns an error when the backend fails or the stored JSON is malformed.
pub fn load_collection<S, T>(store: &S, key: &str) -> Result<Option<T>, String>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.load(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| format!("corrupt record under `{key}`: {e}"))
}

/// Serializes and saves a typed collection as a full overwrite.
///
/// # Errors
///
/// Returns an error when serialization or the backend write fails.
pub fn save_collection<S, T>(store: &S, key: &str, value: &T) -> Result<(), String>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save(key, &raw)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        volume: u8,
        wifi: bool,
    }

    #[test]
    fn memory_store_round_trip_and_delete() {
        let store = MemoryStore::default();
        let store_obj: &dyn KeyValueStore = &store;

        store_obj.save("k", "{\"volume\":4}").expect("save");
        assert_eq!(store_obj.load("k").expect("load").as_deref(), Some("{\"volume\":4}"));
        store_obj.delete("k").expect("delete");
        assert_eq!(store_obj.load("k").expect("load"), None);
    }

    #[test]
    fn typed_helpers_round_trip() {
        let store = MemoryStore::default();
        let prefs = Prefs {
            volume: 7,
            wifi: true,
        };
        save_collection(&store, SETTINGS_KEY, &prefs).expect("save typed");
        let loaded: Option<Prefs> = load_collection(&store, SETTINGS_KEY).expect("load typed");
        assert_eq!(loaded, Some(prefs));
    }

    #[test]
    fn missing_key_loads_default() {
        let store = MemoryStore::default();
        let prefs: Prefs = load_collection_or_default(&store, SETTINGS_KEY);
        assert_eq!(prefs, Prefs::default());
    }

    #[test]
    fn corrupt_record_falls_back_to_default() {
        let store = MemoryStore::default();
        store.save(SETTINGS_KEY, "{not json").expect("save raw");

        let prefs: Prefs = load_collection_or_default(&store, SETTINGS_KEY);
        assert_eq!(prefs, Prefs::default());

        let strict: Result<Option<Prefs>, String> = load_collection(&store, SETTINGS_KEY);
        assert!(strict.is_err());
    }

    #[test]
    fn collections_persist_independently() {
        let store = MemoryStore::default();
        save_collection(&store, NOTES_KEY, &vec!["a".to_string()]).expect("notes");
        save_collection(&store, WIDGETS_KEY, &vec!["clock".to_string()]).expect("widgets");
        store.delete(NOTES_KEY).expect("delete notes");

        let widgets: Vec<String> = load_collection_or_default(&store, WIDGETS_KEY);
        assert_eq!(widgets, vec!["clock".to_string()]);
        let notes: Vec<String> = load_collection_or_default(&store, NOTES_KEY);
        assert!(notes.is_empty());
    }
}
