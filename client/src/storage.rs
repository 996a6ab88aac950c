use gloo_storage::Storage;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key-value persistence for small JSON documents.
pub trait KeyValueStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<T, String>;
    fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<(), String>;
}

/// Browser `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    /// gloo throws instead of returning `Err` when `localStorage` is blocked
    /// (privacy mode, disabled storage), so probe it first.
    fn ensure_available() -> Result<(), String> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .map(|_| ())
            .ok_or_else(|| "local storage unavailable".to_string())
    }
}

impl KeyValueStore for BrowserStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<T, String> {
        Self::ensure_available()?;
        gloo_storage::LocalStorage::get(key).map_err(|e| format!("storage read error: {e}"))
    }

    fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<(), String> {
        Self::ensure_available()?;
        gloo_storage::LocalStorage::set(key, value).map_err(|e| format!("storage write error: {e}"))
    }
}
