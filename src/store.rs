//! Settings persistence.
//!
//! The menu saves and loads one opaque [`SettingsRecord`]. Where it lives
//! is up to the [`SettingsStore`] implementation.

use crate::config::{validate_record, SettingsRecord};
use crate::error::Result;

/// Durable home of the settings record.
pub trait SettingsStore {
    /// Load the saved record; `Ok(None)` if nothing was ever saved.
    fn load(&mut self) -> Result<Option<SettingsRecord>>;

    /// Replace the saved record.
    fn save(&mut self, record: &SettingsRecord) -> Result<()>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for &mut T {
    fn load(&mut self) -> Result<Option<SettingsRecord>> {
        (**self).load()
    }

    fn save(&mut self, record: &SettingsRecord) -> Result<()> {
        (**self).save(record)
    }
}

/// Store that keeps the record in RAM.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<SettingsRecord>,
}

impl MemoryStore {
    /// An empty store.
    pub const fn new() -> Self {
        Self { record: None }
    }

    /// A store pre-loaded with `record`.
    pub fn with_record(record: SettingsRecord) -> Self {
        Self {
            record: Some(record),
        }
    }

    /// The last saved record.
    pub fn record(&self) -> Option<&SettingsRecord> {
        self.record.as_ref()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&mut self) -> Result<Option<SettingsRecord>> {
        match &self.record {
            Some(record) => {
                validate_record(record)?;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, record: &SettingsRecord) -> Result<()> {
        validate_record(record)?;
        self.record = Some(record.clone());
        Ok(())
    }
}

/// Store backed by a TOML file (std only).
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(feature = "std")]
impl FileStore {
    /// Store the record at `path`.
    pub fn new<P: Into<std::path::PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "std")]
impl SettingsStore for FileStore {
    fn load(&mut self) -> Result<Option<SettingsRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        crate::config::load_record(&self.path).map(Some)
    }

    fn save(&mut self, record: &SettingsRecord) -> Result<()> {
        crate::config::save_record(&self.path, record)
    }
}
