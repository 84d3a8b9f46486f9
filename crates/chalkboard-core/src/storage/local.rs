//! Browser `localStorage` backend (WASM only).

use super::{Storage, StorageError, StorageResult};
use wasm_bindgen::JsValue;

fn js_error(context: &str, e: JsValue) -> StorageError {
    StorageError::Other(format!("{}: {:?}", context, e))
}

/// Storage backed by `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error("localStorage unavailable", e))?
            .ok_or_else(|| StorageError::Other("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, payload: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, payload)
            .map_err(|e| js_error("Failed to write localStorage", e))
    }

    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("Failed to read localStorage", e))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_error("Failed to delete from localStorage", e))
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let len = self
            .storage
            .length()
            .map_err(|e| js_error("Failed to read localStorage", e))?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = self
                .storage
                .key(i)
                .map_err(|e| js_error("Failed to read localStorage", e))?
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
