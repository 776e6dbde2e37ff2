//! File-backed shot history store
//!
//! Keeps the same JSON blob the page writes to local storage, one file per
//! server instance.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use shared::{decode_history, encode_history, HistoryStore, ShotError, ShotLogEntry};

/// History persisted as a JSON file on disk
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
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<ShotLogEntry>, ShotError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => decode_history(&blob),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(ShotError::Storage(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, history: &[ShotLogEntry]) -> Result<(), ShotError> {
        let blob = encode_history(history)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ShotError::Storage(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        // Write beside the target and rename so readers never see a partial blob
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, blob)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                ShotError::Storage(format!("failed to write {}: {}", self.path.display(), e))
            })
    }
}
