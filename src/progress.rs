#![warn(missing_docs)]
//! Persistence of the learner's progress
//!
//! Only the highest unlocked level survives a session. The tutor core never touches a store itself. The
//! surrounding shell loads the progress at startup and saves it whenever the core signals an unlock.
use std::{
    fs,
    path::{Path, PathBuf},
};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{TutorError, TutorResult};

/// The persisted progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// highest level the learner may select
    pub unlocked_level: usize,
}
impl Default for Progress {
    fn default() -> Self {
        Self { unlocked_level: 1 }
    }
}
impl Progress {
    /// Parse a progress record from its JSON representation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the text is not a valid progress record.
    pub fn from_json(json: &str) -> TutorResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TutorError::Progress(format!("malformed progress data: {e}")))
    }
    /// JSON representation of this record.
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization fails.
    pub fn to_json(&self) -> TutorResult<String> {
        serde_json::to_string(self)
            .map_err(|e| TutorError::Progress(format!("serialization of progress failed: {e}")))
    }
    /// Limit the unlocked level to `1..=number_of_levels`.
    #[must_use]
    pub fn clamped(self, number_of_levels: usize) -> Self {
        Self {
            unlocked_level: self.unlocked_level.clamp(1, number_of_levels.max(1)),
        }
    }
}

/// Key-value store for the [`Progress`].
pub trait ProgressStore {
    /// Read the raw record, `None` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying storage cannot be read.
    fn read(&self) -> TutorResult<Option<String>>;
    /// Write the raw record.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying storage cannot be written.
    fn write(&mut self, record: &str) -> TutorResult<()>;

    /// Load the stored progress.
    ///
    /// Absent or malformed data yields the default progress (level 1).
    fn load(&self) -> Progress {
        match self.read() {
            Ok(Some(record)) => Progress::from_json(&record).unwrap_or_else(|e| {
                warn!("ignoring stored progress: {e}");
                Progress::default()
            }),
            Ok(None) => Progress::default(),
            Err(e) => {
                warn!("cannot read stored progress: {e}");
                Progress::default()
            }
        }
    }
    /// Save the progress. Failures are logged and otherwise ignored.
    fn save(&mut self, progress: &Progress) {
        if let Err(e) = progress.to_json().and_then(|record| self.write(&record)) {
            warn!("cannot save progress: {e}");
        }
    }
}

/// In-memory [`ProgressStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
}
impl MemoryStore {
    /// Create a store already holding the given raw record.
    #[must_use]
    pub fn with_record(record: &str) -> Self {
        Self {
            record: Some(record.to_owned()),
        }
    }
}
impl ProgressStore for MemoryStore {
    fn read(&self) -> TutorResult<Option<String>> {
        Ok(self.record.clone())
    }
    fn write(&mut self, record: &str) -> TutorResult<()> {
        self.record = Some(record.to_owned());
        Ok(())
    }
}

/// [`ProgressStore`] keeping the record as JSON file `<storage key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}
impl JsonFileStore {
    /// Create a store for the given directory and storage key.
    #[must_use]
    pub fn new(directory: &Path, storage_key: &str) -> Self {
        let mut path = directory.to_path_buf();
        path.push(storage_key);
        path.set_extension("json");
        Self { path }
    }
    /// Returns the path of the JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
impl ProgressStore for JsonFileStore {
    fn read(&self) -> TutorResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path).map(Some).map_err(|e| {
            TutorError::Progress(format!("cannot read file {} : {e}", self.path.display()))
        })
    }
    fn write(&mut self, record: &str) -> TutorResult<()> {
        fs::write(&self.path, record).map_err(|e| {
            TutorError::Progress(format!("cannot write file {} : {e}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::test_helper::test_helper::check_warnings;
    use tempfile::tempdir;
    #[test]
    fn default() {
        assert_eq!(Progress::default().unlocked_level, 1);
    }
    #[test]
    fn json() {
        let p = Progress { unlocked_level: 3 };
        assert_eq!(p.to_json().unwrap(), r#"{"unlockedLevel":3}"#);
        assert_eq!(Progress::from_json(r#"{"unlockedLevel":2}"#).unwrap().unlocked_level, 2);
        assert!(Progress::from_json("{}").is_err());
        assert!(Progress::from_json(r#"{"unlockedLevel":-1}"#).is_err());
    }
    #[test]
    fn clamped() {
        assert_eq!(Progress { unlocked_level: 9 }.clamped(4).unlocked_level, 4);
        assert_eq!(Progress { unlocked_level: 0 }.clamped(4).unlocked_level, 1);
        assert_eq!(Progress { unlocked_level: 2 }.clamped(4).unlocked_level, 2);
    }
    #[test]
    fn memory_store() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load(), Progress::default());
        store.save(&Progress { unlocked_level: 3 });
        assert_eq!(store.load().unlocked_level, 3);
    }
    #[test]
    fn malformed_record() {
        testing_logger::setup();
        let store = MemoryStore::with_record("not json");
        assert_eq!(store.load(), Progress::default());
        testing_logger::validate(|logs| {
            assert_eq!(logs.len(), 1);
            assert!(logs[0]
                .body
                .starts_with("ignoring stored progress: Progress:malformed progress data:"));
        });
        let store = MemoryStore::with_record(r#"{"unlockedLevel":2}"#);
        testing_logger::setup();
        assert_eq!(store.load().unlocked_level, 2);
        check_warnings(&[]);
    }
    #[test]
    fn file_store() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path(), "lens-tutor-progress-v1");
        assert!(store.path().ends_with("lens-tutor-progress-v1.json"));
        assert_eq!(store.load(), Progress::default());
        store.save(&Progress { unlocked_level: 2 });
        let reopened = JsonFileStore::new(dir.path(), "lens-tutor-progress-v1");
        assert_eq!(reopened.load().unlocked_level, 2);
    }
    #[test]
    fn file_store_unwritable() {
        testing_logger::setup();
        let dir = tempdir().unwrap();
        let mut missing = dir.path().to_path_buf();
        missing.push("does_not_exist");
        let mut store = JsonFileStore::new(&missing, "progress");
        store.save(&Progress { unlocked_level: 2 });
        testing_logger::validate(|logs| {
            assert_eq!(logs.len(), 1);
            assert!(logs[0].body.starts_with("cannot save progress:"));
        });
        assert_eq!(store.load(), Progress::default());
    }
}
