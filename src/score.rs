use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "arena-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Failures of the persisted settings backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Integer key-value settings that outlive a process.
pub trait SettingsStore {
    /// Returns the stored value for `key`, if any.
    fn get_int(&self, key: &str) -> Option<i64>;

    /// Stores `value` under `key`.
    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

/// Settings kept only for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: BTreeMap<String, i64>,
}

impl MemorySettingsStore {
    /// Creates a store pre-populated with `key = value`.
    #[must_use]
    pub fn with_value(key: &str, value: i64) -> Self {
        let mut values = BTreeMap::new();
        values.insert(key.to_owned(), value);
        Self { values }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// On-disk shape: a flat JSON object of integer settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct SettingsFile {
    values: BTreeMap<String, i64>,
}

/// Settings persisted as a flat JSON object, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
    file: SettingsFile,
}

impl JsonSettingsStore {
    /// Opens the settings file at the platform-correct location.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(settings_path())
    }

    /// Opens `path`, starting empty when the file does not exist yet.
    ///
    /// Returns `Err` when the file exists but cannot be read or parsed, so
    /// the caller can surface a warning before entering raw terminal mode.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let file = load_settings(&path)?;
        Ok(Self { path, file })
    }

    /// Creates an empty store that will write to `path` without reading it first.
    #[must_use]
    pub fn empty(path: PathBuf) -> Self {
        Self {
            path,
            file: SettingsFile::default(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.file.values.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.file.values.insert(key.to_owned(), value);
        save_settings(&self.path, &self.file)
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    data_dir().join(SETTINGS_FILE_NAME)
}

/// Returns the per-user data directory for this game.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

fn load_settings(path: &Path) -> Result<SettingsFile, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SettingsFile::default()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_owned(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_owned(),
        source,
    })
}

fn save_settings(path: &Path, file: &SettingsFile) -> Result<(), StoreError> {
    let io_error = |source| StoreError::Io {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let json = serde_json::to_string_pretty(file).map_err(|source| StoreError::Parse {
        path: path.to_owned(),
        source,
    })?;

    fs::write(path, json).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{JsonSettingsStore, MemorySettingsStore, SettingsStore, StoreError};

    #[test]
    fn json_store_persists_between_opens() {
        let path = unique_test_path("persist");

        let mut store = JsonSettingsStore::open(path.clone()).expect("open should succeed");
        store.set_int("HighScore", 42).expect("save should succeed");

        let reopened = JsonSettingsStore::open(path.clone()).expect("reopen should succeed");
        assert_eq!(reopened.get_int("HighScore"), Some(42));
        assert_eq!(reopened.get_int("Missing"), None);

        cleanup_test_path(&path);
    }

    #[test]
    fn missing_settings_file_is_empty() {
        let path = unique_test_path("missing");
        // Deliberately do not create the file.
        let store = JsonSettingsStore::open(path).expect("missing file should open empty");
        assert_eq!(store.get_int("HighScore"), None);
    }

    #[test]
    fn malformed_settings_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        let result = JsonSettingsStore::open(path.clone());
        assert!(
            matches!(result, Err(StoreError::Parse { .. })),
            "malformed file should return a parse error"
        );

        cleanup_test_path(&path);
    }

    #[test]
    fn memory_store_overwrites_values() {
        let mut store = MemorySettingsStore::with_value("HighScore", 5);
        assert_eq!(store.get_int("HighScore"), Some(5));

        store.set_int("HighScore", 7).expect("memory store never fails");
        assert_eq!(store.get_int("HighScore"), Some(7));
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("arena-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
