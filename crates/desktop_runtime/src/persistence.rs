//! Persistence adapters between the desktop state and the durable store.
//!
//! Window state is deliberately never persisted: the registry is empty
//! again after a full reload regardless of the prior session. What does
//! persist is user data — settings, security, the power flag, and the
//! auxiliary collections — each as an independent, immediate full
//! overwrite of its own store key.

use platform_store::{
    load_collection, load_collection_or_default, save_collection, KeyValueStore, CUSTOM_APPS_KEY,
    FILES_KEY, INSTALLED_APPS_KEY, NOTES_KEY, NOTIFICATIONS_KEY, POWER_FLAG_KEY, SECURITY_KEY,
    SETTINGS_KEY, SHORTCUTS_KEY, THEME_PROFILES_KEY, WIDGETS_KEY,
};

use crate::{
    collections::{
        CustomAppEntry, DesktopShortcut, InstalledApp, Note, NotificationRecord, ThemeProfile,
        VirtualFile, Widget,
    },
    model::{SecuritySettings, Settings},
};

/// Loads user settings, default-filling missing fields and falling back
/// to the full default record when the stored JSON is corrupt.
pub fn load_settings(store: &dyn KeyValueStore) -> Settings {
    load_or_reset(store, SETTINGS_KEY)
}

/// Persists the full settings record.
///
/// # Errors
///
/// Returns an error when serialization or the backend write fails.
pub fn save_settings(store: &dyn KeyValueStore, settings: &Settings) -> Result<(), String> {
    save_collection(store, SETTINGS_KEY, settings)
}

/// Loads security settings with the same corruption fallback as settings.
pub fn load_security(store: &dyn KeyValueStore) -> SecuritySettings {
    load_or_reset(store, SECURITY_KEY)
}

fn load_or_reset<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match load_collection(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            leptos::logging::warn!("{err}; falling back to defaults");
            T::default()
        }
    }
}

/// Persists the security record.
///
/// # Errors
///
/// Returns an error when serialization or the backend write fails.
pub fn save_security(store: &dyn KeyValueStore, security: &SecuritySettings) -> Result<(), String> {
    save_collection(store, SECURITY_KEY, security)
}

/// Reads the power-on flag used by resume-on-load. Absent or corrupt
/// records read as powered off.
pub fn load_power_flag(store: &dyn KeyValueStore) -> bool {
    load_collection_or_default(store, POWER_FLAG_KEY)
}

/// Persists the power-on flag.
///
/// # Errors
///
/// Returns an error when the backend write fails.
pub fn save_power_flag(store: &dyn KeyValueStore, powered_on: bool) -> Result<(), String> {
    save_collection(store, POWER_FLAG_KEY, &powered_on)
}

macro_rules! collection_accessors {
    ($load:ident, $save:ident, $ty:ty, $key:ident, $what:literal) => {
        #[doc = concat!("Loads the ", $what, " collection, defaulting on absence or corruption.")]
        pub fn $load(store: &dyn KeyValueStore) -> Vec<$ty> {
            load_collection_or_default(store, $key)
        }

        #[doc = concat!("Persists the ", $what, " collection as a full overwrite.")]
        ///
        /// # Errors
        ///
        /// Returns an error when serialization or the backend write fails.
        pub fn $save(store: &dyn KeyValueStore, items: &[$ty]) -> Result<(), String> {
            save_collection(store, $key, &items)
        }
    };
}

collection_accessors!(load_notes, save_notes, Note, NOTES_KEY, "notes");
collection_accessors!(load_files, save_files, VirtualFile, FILES_KEY, "virtual-file");
collection_accessors!(
    load_installed_apps,
    save_installed_apps,
    InstalledApp,
    INSTALLED_APPS_KEY,
    "installed-app"
);
collection_accessors!(
    load_custom_apps,
    save_custom_apps,
    CustomAppEntry,
    CUSTOM_APPS_KEY,
    "custom-app catalog"
);
collection_accessors!(
    load_shortcuts,
    save_shortcuts,
    DesktopShortcut,
    SHORTCUTS_KEY,
    "desktop-shortcut"
);
collection_accessors!(load_widgets, save_widgets, Widget, WIDGETS_KEY, "widget");
collection_accessors!(
    load_notifications,
    save_notifications,
    NotificationRecord,
    NOTIFICATIONS_KEY,
    "notification"
);
collection_accessors!(
    load_theme_profiles,
    save_theme_profiles,
    ThemeProfile,
    THEME_PROFILES_KEY,
    "theme-profile"
);

#[cfg(test)]
mod tests {
    use platform_store::MemoryStore;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn settings_round_trip() {
        let store = MemoryStore::default();
        let mut settings = Settings::default();
        settings.display_name = "Ada".to_string();
        settings.brightness = 40;
        save_settings(&store, &settings).expect("save");
        assert_eq!(load_settings(&store), settings);
    }

    #[test]
    fn partial_settings_record_is_default_filled() {
        let store = MemoryStore::default();
        store
            .save(SETTINGS_KEY, r#"{"volume":15,"display_name":"Ada"}"#)
            .expect("seed partial record");

        let settings = load_settings(&store);
        assert_eq!(settings.volume, 15);
        assert_eq!(settings.display_name, "Ada");
        assert_eq!(settings.theme, Settings::default().theme);
        assert_eq!(settings.wifi_enabled, Settings::default().wifi_enabled);
    }

    #[test]
    fn corrupt_settings_record_resets_that_collection_only() {
        let store = MemoryStore::default();
        store.save(SETTINGS_KEY, "{broken").expect("seed corrupt");
        save_security(
            &store,
            &SecuritySettings {
                password: Some("pw".to_string()),
                pin: None,
                require_sign_in_on_wake: true,
            },
        )
        .expect("save security");

        assert_eq!(load_settings(&store), Settings::default());
        assert!(load_security(&store).has_credential());
    }

    #[test]
    fn power_flag_defaults_to_off() {
        let store = MemoryStore::default();
        assert!(!load_power_flag(&store));
        save_power_flag(&store, true).expect("save");
        assert!(load_power_flag(&store));
    }

    #[test]
    fn aux_collections_round_trip_independently() {
        let store = MemoryStore::default();
        let notes = vec![Note {
            id: 1,
            title: "groceries".to_string(),
            body: "eggs".to_string(),
            updated_at_ms: 0,
        }];
        save_notes(&store, &notes).expect("notes");
        save_widgets(
            &store,
            &[Widget {
                id: 9,
                kind: "clock".to_string(),
            }],
        )
        .expect("widgets");

        assert_eq!(load_notes(&store), notes);
        assert_eq!(load_widgets(&store).len(), 1);
        assert!(load_theme_profiles(&store).is_empty());
    }
}
