use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use serde_json::Value;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage name: {0}")]
    InvalidName(String),
}

/// Durable name -> JSON value storage for UI preferences.
/// Values are trusted as written; decoding them is the caller's job.
pub trait KeyValueStore {
    fn get(&self, name: &str) -> Result<Option<Value>, StoreError>;
    fn set(&self, name: &str, value: Value) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        (**self).get(name)
    }

    fn set(&self, name: &str, value: Value) -> Result<(), StoreError> {
        (**self).set(name, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        (**self).get(name)
    }

    fn set(&self, name: &str, value: Value) -> Result<(), StoreError> {
        (**self).set(name, value)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(name).cloned())
    }

    fn set(&self, name: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(name.to_string(), value);
        Ok(())
    }
}

/// One `<name>.json` file per entry under a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> Result<PathBuf, StoreError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path(name)?;
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn set(&self, name: &str, value: Value) -> Result<(), StoreError> {
        let path = self.path(name)?;
        std::fs::create_dir_all(&self.dir)?;
        // Atomic replace.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(&value)?)?;
        std::fs::rename(&tmp, &path)?;
        debug!("Persisted {} to {}", name, path.display());
        Ok(())
    }
}
