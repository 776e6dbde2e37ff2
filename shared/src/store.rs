//! Persistence boundary for shot history
//!
//! The blob is a JSON array of flat shot records. Storage adapters live in
//! the host crates; this module owns the encoding and the tolerant decoding.

use std::sync::Mutex;

use crate::error::ShotError;
use crate::models::ShotLogEntry;
use crate::shot_log::MAX_SHOTS;

/// Key the page uses for its local history blob
pub const STORAGE_KEY: &str = "coffeeGrinderDialer:shots";

/// Somewhere to keep the ordered shot history between sessions
pub trait HistoryStore {
    /// Load history, oldest first. Missing data is an empty history.
    fn load(&self) -> Result<Vec<ShotLogEntry>, ShotError>;

    /// Replace the stored history with `history`
    fn save(&self, history: &[ShotLogEntry]) -> Result<(), ShotError>;
}

/// Encode history, keeping at most [`MAX_SHOTS`] of the newest entries
pub fn encode_history(history: &[ShotLogEntry]) -> Result<String, ShotError> {
    let skip = history.len().saturating_sub(MAX_SHOTS);
    serde_json::to_string(&history[skip..]).map_err(ShotError::Serialization)
}

/// Decode a stored blob.
///
/// Blank input is an empty history. Records that do not parse as shots are
/// dropped individually; a blob that is not a JSON array is an error.
pub fn decode_history(blob: &str) -> Result<Vec<ShotLogEntry>, ShotError> {
    if blob.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<serde_json::Value> =
        serde_json::from_str(blob).map_err(ShotError::CorruptHistory)?;

    Ok(records
        .into_iter()
        .filter_map(|record| serde_json::from_value(record).ok())
        .collect())
}

/// In-process store, used by tests and as a fallback when no storage exists
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an already-encoded blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|blob| blob.clone())
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<ShotLogEntry>, ShotError> {
        match self.blob() {
            Some(blob) => decode_history(&blob),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, history: &[ShotLogEntry]) -> Result<(), ShotError> {
        let encoded = encode_history(history)?;
        let mut blob = self
            .blob
            .lock()
            .map_err(|_| ShotError::Storage("memory store lock poisoned".to_string()))?;
        *blob = Some(encoded);
        Ok(())
    }
}
