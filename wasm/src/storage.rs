//! Browser `localStorage` adapter for the shot history

use shared::{decode_history, encode_history, HistoryStore, ShotError, ShotLogEntry, STORAGE_KEY};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// History kept under [`STORAGE_KEY`] in the page's local storage
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::with_key(STORAGE_KEY)
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage(&self) -> Result<Storage, ShotError> {
        let window =
            web_sys::window().ok_or_else(|| ShotError::Storage("no window".to_string()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| ShotError::Storage("local storage unavailable".to_string()))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for LocalStorageStore {
    fn load(&self) -> Result<Vec<ShotLogEntry>, ShotError> {
        match self.storage()?.get_item(&self.key).map_err(js_error)? {
            Some(blob) => decode_history(&blob),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, history: &[ShotLogEntry]) -> Result<(), ShotError> {
        let blob = encode_history(history)?;
        self.storage()?
            .set_item(&self.key, &blob)
            .map_err(js_error)
    }
}

fn js_error(value: JsValue) -> ShotError {
    ShotError::Storage(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}
