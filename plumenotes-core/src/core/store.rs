//! JSON-file persistence for the notes collection.
//!
//! The whole collection is written as one pretty-printed JSON document on
//! every save. There is no append path and no locking; the application is
//! single-process and single-writer, and concurrent instances fall back to
//! last-writer-wins on the whole file.

use crate::{Note, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The two operations the core exposes across the process boundary.
///
/// The session controller saves through this trait; [`JsonStore`] is the
/// production implementation.
pub trait NotesStore {
    /// Reads the full notes collection.
    ///
    /// A missing file is an empty collection, not an error. A file that
    /// exists but cannot be parsed is an error and must reach the caller —
    /// silently treating a damaged store as empty would overwrite it on the
    /// next save.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PlumenotesError::Io`] if the file cannot be read, or
    /// [`crate::PlumenotesError::Json`] if it cannot be parsed.
    fn load(&self) -> Result<Vec<Note>>;

    /// Replaces the stored collection with `notes`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PlumenotesError::Io`] on any filesystem failure.
    fn save(&mut self, notes: &[Note]) -> Result<()>;
}

/// Whole-file JSON store at a fixed path.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store backed by the file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a store at the platform-default data file location.
    pub fn at_default_location() -> Self {
        Self::new(default_data_path())
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NotesStore for JsonStore {
    fn load(&self) -> Result<Vec<Note>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let notes = serde_json::from_str(&content)?;
        Ok(notes)
    }

    fn save(&mut self, notes: &[Note]) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        // Write to a sibling temp file and rename over the target, so no
        // reader ever observes a half-written document.
        let json = serde_json::to_string_pretty(notes)?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        log::debug!("saved {} notes to {}", notes.len(), self.path.display());
        Ok(())
    }
}

/// Returns the path to the notes data file.
///
/// - macOS / Linux: `~/.config/plumenotes/notes.json`
/// - Windows: `%APPDATA%/Plumenotes/notes.json`
pub fn default_data_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("Plumenotes").join("notes.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("plumenotes").join("notes.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlumenotesError;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample_notes() -> Vec<Note> {
        let mut first = Note::new(1716899000001);
        first.title = "Groceries".to_string();
        first.content = "milk\neggs".to_string();
        first.updated_at = Some(Utc::now());
        let mut second = Note::new(1716899000000);
        second.title = "Ideas".to_string();
        vec![first, second]
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("notes.json"));
        assert_eq!(store.load().unwrap(), Vec::new());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::new(dir.path().join("notes.json"));

        let notes = sample_notes();
        store.save(&notes).unwrap();
        assert_eq!(store.load().unwrap(), notes);
    }

    #[test]
    fn test_empty_collection_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::new(dir.path().join("notes.json"));

        store.save(&[]).unwrap();
        assert_eq!(store.load().unwrap(), Vec::new());
    }

    #[test]
    fn test_corrupt_file_errors_instead_of_returning_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "not valid json").unwrap();

        let store = JsonStore::new(&path);
        match store.load() {
            Err(PlumenotesError::Json(_)) => {}
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = JsonStore::new(&path);

        let notes = sample_notes();
        store.save(&notes).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        store.save(&notes).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.load().unwrap(), notes);
    }

    #[test]
    fn test_save_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep").join("nested").join("notes.json");
        let mut store = JsonStore::new(&path);

        store.save(&sample_notes()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_written_document_is_a_pretty_printed_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = JsonStore::new(&path);

        store.save(&sample_notes()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('['));
        assert!(content.contains('\n'));
        assert!(content.contains("\"createdAt\""));
    }

    #[test]
    fn test_default_data_path_is_stable() {
        assert_eq!(default_data_path(), default_data_path());
        assert!(default_data_path().ends_with("notes.json"));
    }
}
