//! Application configuration.

use chalkboard_core::shapes::SerializableColor;
use chalkboard_core::storage::{FileStorage, StorageResult};
use std::path::PathBuf;

/// File name used for PNG exports unless overridden.
pub const EXPORT_FILE_NAME: &str = "board.png";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Board surface width in pixels.
    pub width: u32,
    /// Board surface height in pixels.
    pub height: u32,
    pub background_color: SerializableColor,
    /// Directory holding saved boards. `None` uses the platform data dir.
    pub storage_dir: Option<PathBuf>,
    /// Where PNG exports are written.
    pub export_path: PathBuf,
    /// TrueType/OpenType font for text. `None` uses the bundled font.
    pub font_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            background_color: SerializableColor::white(),
            storage_dir: None,
            export_path: PathBuf::from(EXPORT_FILE_NAME),
            font_path: None,
        }
    }
}

impl AppConfig {
    /// Open the file storage this configuration points at.
    pub fn open_storage(&self) -> StorageResult<FileStorage> {
        match &self.storage_dir {
            Some(dir) => FileStorage::new(dir.clone()),
            None => FileStorage::default_location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkboard_core::storage::Storage;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!((config.width, config.height), (1280, 800));
        assert_eq!(config.export_path, PathBuf::from("board.png"));
        assert_eq!(config.background_color, SerializableColor::white());
    }

    #[test]
    fn test_open_storage_in_dir() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            storage_dir: Some(dir.path().join("boards")),
            ..AppConfig::default()
        };
        let storage = config.open_storage().unwrap();
        storage.save("board_x", "[]").unwrap();
        assert!(dir.path().join("boards").join("board_x.json").exists());
    }
}
