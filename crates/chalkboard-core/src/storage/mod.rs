//! Storage abstraction for persistence.
//!
//! Backends are plain key-value string stores; the board is serialized to
//! JSON before it reaches them.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use thiserror::Error;

/// Prefix put in front of user-chosen board names to form storage keys.
pub const BOARD_KEY_PREFIX: &str = "board_";

/// Storage key for a board saved under `name`.
pub fn board_key(name: &str) -> String {
    format!("{BOARD_KEY_PREFIX}{name}")
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for key-value storage backends.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Store `payload` under `key`, replacing any previous value.
    fn save(&self, key: &str, payload: &str) -> StorageResult<()>;

    /// Fetch the payload stored under `key`, if any.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.load(key)?.is_some())
    }
}

/// Trait for key-value storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Store `payload` under `key`, replacing any previous value.
    fn save(&self, key: &str, payload: &str) -> StorageResult<()>;

    /// Fetch the payload stored under `key`, if any.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.load(key)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_key() {
        assert_eq!(board_key("myboard1"), "board_myboard1");
    }
}
