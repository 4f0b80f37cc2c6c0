use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::workflows::intake::domain::ApplicationData;

/// Key the last submitted application is kept under.
pub const LOCAL_STORAGE_KEY: &str = "landlordApplication";

#[derive(Debug, thiserror::Error)]
pub enum LocalStoreError {
    #[error("local state unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("local state is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Per-user key/value state that survives between sessions.
pub trait LocalStore: Send + Sync {
    fn load(&self) -> Result<Option<ApplicationData>, LocalStoreError>;
    fn save(&self, data: &ApplicationData) -> Result<(), LocalStoreError>;
}

/// JSON object on disk mapping storage keys to values.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Value>, LocalStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl LocalStore for JsonFileStore {
    fn load(&self) -> Result<Option<ApplicationData>, LocalStoreError> {
        let mut entries = self.read_entries()?;
        match entries.remove(LOCAL_STORAGE_KEY) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn save(&self, data: &ApplicationData) -> Result<(), LocalStoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(LOCAL_STORAGE_KEY.to_string(), serde_json::to_value(data)?);
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&entries)?)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<ApplicationData>>,
}

impl MemoryStore {
    pub fn with(data: ApplicationData) -> Self {
        Self {
            saved: Mutex::new(Some(data)),
        }
    }
}

impl LocalStore for MemoryStore {
    fn load(&self) -> Result<Option<ApplicationData>, LocalStoreError> {
        Ok(self.saved.lock().expect("local store mutex poisoned").clone())
    }

    fn save(&self, data: &ApplicationData) -> Result<(), LocalStoreError> {
        *self.saved.lock().expect("local store mutex poisoned") = Some(data.clone());
        Ok(())
    }
}
