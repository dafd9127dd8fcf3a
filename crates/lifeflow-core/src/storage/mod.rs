//! Single-device key-value storage backed by one JSON file.
//!
//! Holds client-only values such as the exam countdown target. Values are
//! strings; a missing file reads as empty.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const LOCAL_STORAGE_FILE: &str = "local-storage.json";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Open the store at `path`, reading existing values if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let raw = std::fs::read_to_string(&path).map_err(|error| {
            Error::Storage(format!("Failed to read {}: {}", path.display(), error))
        })?;
        let values = if raw.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&raw).map_err(|error| {
                Error::Storage(format!("Failed to parse {}: {}", path.display(), error))
            })?
        };
        Ok(Self { path, values })
    }

    /// Open `local-storage.json` inside `dir`.
    pub fn open_in(dir: &Path) -> Result<Self> {
        Self::open(dir.join(LOCAL_STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set `key` and write the whole file back.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.values.insert(key.to_string(), value.into());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                Error::Storage(format!(
                    "Failed to create storage directory {}: {}",
                    parent.display(),
                    error
                ))
            })?;
        }
        let serialized = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, serialized).map_err(|error| {
            Error::Storage(format!("Failed to write {}: {}", self.path.display(), error))
        })
    }
}
