//! Owner session flag, persisted in a small JSON key/value file.
//!
//! The file is separate from the database so the flag can be read and
//! cleared synchronously. Every change is written to disk immediately.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value as JsonValue};

use crate::error::{Result, StoreError};

/// Key holding the owner login flag.
pub const OWNER_LOGGED_IN_KEY: &str = "owner_logged_in";

const LOGGED_IN: &str = "1";

/// File-backed key/value store for the session flag.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the owner flag is set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Session` or `StoreError::SessionFormat` if the
    /// file exists but cannot be read.
    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.get(OWNER_LOGGED_IN_KEY)?.as_deref() == Some(LOGGED_IN))
    }

    /// Set the owner flag.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Session` if the file cannot be written.
    pub fn set_logged_in(&self) -> Result<()> {
        self.set(OWNER_LOGGED_IN_KEY, LOGGED_IN)
    }

    /// Clear the owner flag. Clearing an absent flag is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Session` if the file cannot be written.
    pub fn clear_logged_in(&self) -> Result<()> {
        self.remove(OWNER_LOGGED_IN_KEY)
    }

    /// Read a string value.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.load()?;
        Ok(entries
            .get(key)
            .and_then(JsonValue::as_str)
            .map(str::to_owned))
    }

    /// Write a string value and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), JsonValue::String(value.to_owned()));
        self.save(&entries)
    }

    /// Remove a key and persist. No write happens if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Map<String, JsonValue>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&text).map_err(StoreError::SessionFormat)
    }

    fn save(&self, entries: &Map<String, JsonValue>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let text = serde_json::to_string_pretty(entries).map_err(StoreError::SessionFormat)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
