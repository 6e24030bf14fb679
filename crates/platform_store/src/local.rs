//! Browser localStorage adapter for the durable store contract.

use crate::KeyValueStore;

/// localStorage-backed store on wasm targets.
///
/// On non-wasm targets every operation reports the backend as unavailable,
/// which the typed loaders translate into collection defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or_else(|| "window unavailable".to_string())?
        .local_storage()
        .map_err(|_| "localStorage access denied".to_string())?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        local_storage()?
            .get_item(key)
            .map_err(|_| format!("localStorage read failed for `{key}`"))
    }

    fn save(&self, key: &str, raw_json: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, raw_json)
            .map_err(|_| format!("localStorage write failed for `{key}`"))
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        local_storage()?
            .remove_item(key)
            .map_err(|_| format!("localStorage delete failed for `{key}`"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for LocalStore {
    fn load(&self, _key: &str) -> Result<Option<String>, String> {
        Err("localStorage requires a wasm target".to_string())
    }

    fn save(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
        Err("localStorage requires a wasm target".to_string())
    }

    fn delete(&self, _key: &str) -> Result<(), String> {
        Err("localStorage requires a wasm target".to_string())
    }
}
