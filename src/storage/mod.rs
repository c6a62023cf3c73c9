// src/storage/mod.rs
pub mod resume;

use crate::edgar::models::{Cik, DocumentName};
use crate::utils::error::StorageError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub use resume::is_folder_complete;

pub const RUN_SUMMARY_FILE: &str = "run_summary.json";

/// Document content as it should land on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Extracted text, written as UTF-8.
    Text(String),
    /// Bytes exactly as fetched.
    Raw(Vec<u8>),
}

impl Payload {
    fn len(&self) -> usize {
        match self {
            Payload::Text(text) => text.len(),
            Payload::Raw(bytes) => bytes.len(),
        }
    }
}

/// Owns the download tree for one classification code:
/// `<base_dir>/<cik>/<base name>.<extension>`.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the company's folder, creating it if needed.
    pub fn entity_dir(&self, cik: &Cik) -> Result<PathBuf, StorageError> {
        let dir = self.base_dir.join(cik.as_str());
        fs::create_dir_all(&dir).map_err(StorageError::IoError)?;
        Ok(dir)
    }

    /// Writes a document into `folder`, silently replacing any file of the same name.
    pub fn save_document(
        &self,
        folder: &Path,
        name: &DocumentName,
        payload: &Payload,
    ) -> Result<PathBuf, StorageError> {
        let file_path = folder.join(name.file_name());

        match payload {
            Payload::Text(text) => fs::write(&file_path, text.as_bytes()),
            Payload::Raw(bytes) => fs::write(&file_path, bytes),
        }
        .map_err(StorageError::IoError)?;

        tracing::debug!("Wrote {} bytes to {}", payload.len(), file_path.display());
        Ok(file_path)
    }

    /// Saves a run summary as pretty JSON next to the company folders.
    pub fn save_run_summary<T: Serialize>(&self, summary: &T) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(RUN_SUMMARY_FILE);

        let summary_str = serde_json::to_string_pretty(summary)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, summary_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved run summary to {}", file_path.display());
        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(base: &str, extension: &str) -> DocumentName {
        DocumentName {
            base: base.to_string(),
            extension: extension.to_string(),
        }
    }

    #[test]
    fn creates_base_and_entity_folders() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("sic_filings").join("7311")).unwrap();
        assert!(storage.base_dir().is_dir());

        let entity = storage.entity_dir(&Cik::new("0000012345")).unwrap();
        assert!(entity.is_dir());
        assert!(entity.ends_with("7311/0000012345"));
    }

    #[test]
    fn raw_payload_is_written_byte_for_byte_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let folder = storage.entity_dir(&Cik::new("1")).unwrap();

        let first = storage
            .save_document(&folder, &name("report", "xml"), &Payload::Raw(b"<old/>".to_vec()))
            .unwrap();
        let bytes = vec![0u8, 159, 146, 150, b'<', b'x', b'/', b'>'];
        let second = storage
            .save_document(&folder, &name("report", "xml"), &Payload::Raw(bytes.clone()))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&second).unwrap(), bytes);
        assert_eq!(fs::read_dir(&folder).unwrap().count(), 1);
    }

    #[test]
    fn run_summary_is_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let path = storage
            .save_run_summary(&serde_json::json!({ "documents_saved": 3 }))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["documents_saved"], 3);
    }
}
