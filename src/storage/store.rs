//! Record persistence behind a get/set/clear blob interface.
//!
//! The whole log travels as one opaque string blob; encoding and decoding
//! live next to the trait so every implementation moves the same format.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::training::types::WorkoutRecord;

/// Storage for the serialized record log, addressed as a single blob.
pub trait RecordStore {
    /// Read the blob, if one has ever been written.
    fn get(&self) -> Option<String>;

    /// Replace the blob.
    fn set(&self, blob: &str) -> Result<(), StoreError>;

    /// Remove the blob entirely.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Blob store backed by a single file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store writing to the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default platform data location.
    pub fn default_location() -> Self {
        Self::new(crate::storage::config::data_dir().join("records.json"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileStore {
    fn get(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn set(&self, blob: &str) -> Result<(), StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::IoError(e.to_string()))?;
        }
        std::fs::write(&self.path, blob).map_err(|e| StoreError::IoError(e.to_string()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }
}

/// In-memory blob store, used in tests and anywhere persistence is unwanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a blob.
    pub fn with_blob(blob: &str) -> Self {
        Self {
            blob: RefCell::new(Some(blob.to_string())),
        }
    }
}

impl RecordStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.blob.borrow().clone()
    }

    fn set(&self, blob: &str) -> Result<(), StoreError> {
        *self.blob.borrow_mut() = Some(blob.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.blob.borrow_mut() = None;
        Ok(())
    }
}

/// Serialize records into a blob for the store.
pub fn encode_records(records: &[WorkoutRecord]) -> Result<String, StoreError> {
    serde_json::to_string(records).map_err(|e| StoreError::SerializationError(e.to_string()))
}

/// Deserialize a stored blob, treating malformed data as an empty log.
pub fn decode_records(blob: &str) -> Vec<WorkoutRecord> {
    match serde_json::from_str(blob) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Discarding malformed record blob: {}", e);
            Vec::new()
        }
    }
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("IO error: {0}")]
    IoError(String),

    /// Record encoding failure
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
