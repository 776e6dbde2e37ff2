//! WebAssembly module for the Espresso Dialer page
//!
//! Provides client-side:
//! - Shot evaluation from raw form fields
//! - Dial and puck label helpers
//! - Shot history kept in local storage

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

use shared::display::{self, score_gauge, ScoreGauge, ShotSummary};
use shared::{evaluate_raw, HistoryStore, ScaleBounds, ShotError, ShotLog, ShotLogEntry};

mod storage;

pub use storage::LocalStorageStore;

/// Evaluation payload handed back to the page
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum PageEvaluation {
    NeedsMoreInput {
        message: String,
    },
    Evaluated {
        result: EvaluationResult,
        gauge: ScoreGauge,
        #[serde(skip_serializing_if = "Option::is_none")]
        entry: Option<ShotLogEntry>,
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<ShotSummary>,
    },
}

impl PageEvaluation {
    fn needs_more_input() -> Self {
        PageEvaluation::NeedsMoreInput {
            message: ShotError::InsufficientInput.to_string(),
        }
    }
}

fn parse_raw_input(raw_json: &str) -> Result<RawShotInput, String> {
    serde_json::from_str(raw_json).map_err(|e| format!("Invalid shot JSON: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Unable to encode result: {}", e))
}

/// Evaluate raw form fields without logging anything
pub fn evaluate_shot_json(raw_json: &str) -> Result<String, String> {
    let input = parse_raw_input(raw_json)?;
    let (_, outcome) = evaluate_raw(&input, ScaleBounds::default());

    let page = match outcome.into_result() {
        Some(result) => PageEvaluation::Evaluated {
            gauge: score_gauge(result.score),
            result,
            entry: None,
            summary: None,
        },
        None => PageEvaluation::needs_more_input(),
    };
    to_json(&page)
}

/// Evaluate a shot from a JSON object of raw form fields
#[wasm_bindgen]
pub fn evaluate_shot(raw_json: &str) -> Result<String, JsValue> {
    evaluate_shot_json(raw_json).map_err(|e| JsValue::from_str(&e))
}

/// Label for a 1-10 puck wetness rating
#[wasm_bindgen]
pub fn describe_puck_wetness(value: f64) -> String {
    let wetness = shared::normalize_puck_wetness(Some(value));
    PuckDescription::from_wetness(wetness).to_string()
}

/// Coaching note for a 1-10 puck wetness rating
#[wasm_bindgen]
pub fn puck_wetness_note(value: f64) -> String {
    let wetness = shared::normalize_puck_wetness(Some(value));
    PuckDescription::from_wetness(wetness).note().to_string()
}

/// Needle rotation in degrees for a dial spanning `min..=max`
#[wasm_bindgen]
pub fn gauge_needle_angle(value: f64, min: f64, max: f64) -> f64 {
    display::gauge_angle(value, min, max)
}

/// Format a reading, `—` when it was not recorded
#[wasm_bindgen]
pub fn format_reading(value: Option<f64>, digits: usize) -> String {
    display::format_number(value, digits)
}

/// Shot history owner for the page
#[wasm_bindgen]
pub struct ShotDialer {
    log: ShotLog,
    store: LocalStorageStore,
}

#[wasm_bindgen]
impl ShotDialer {
    /// Restore history from local storage; unreadable data starts empty
    #[wasm_bindgen(constructor)]
    pub fn new() -> ShotDialer {
        let store = LocalStorageStore::new();
        let log = match store.load() {
            Ok(entries) => ShotLog::restore(entries),
            Err(e) => {
                warn(&format!("Unable to restore shot history: {}", e));
                ShotLog::new()
            }
        };
        ShotDialer { log, store }
    }

    /// Evaluate raw form fields, log the shot and persist the history
    pub fn evaluate(&mut self, raw_json: &str) -> Result<String, JsValue> {
        let input = parse_raw_input(raw_json).map_err(|e| JsValue::from_str(&e))?;
        let (params, outcome) = evaluate_raw(&input, ScaleBounds::default());

        let page = match (params, outcome.into_result()) {
            (Some(params), Some(result)) => {
                let entry = self.log.append_at(result.clone(), params, now());
                self.persist();
                PageEvaluation::Evaluated {
                    gauge: score_gauge(result.score),
                    summary: Some(ShotSummary::from(&entry)),
                    entry: Some(entry),
                    result,
                }
            }
            _ => PageEvaluation::needs_more_input(),
        };
        to_json(&page).map_err(|e| JsValue::from_str(&e))
    }

    /// History cards, newest first
    pub fn history(&self) -> Result<String, JsValue> {
        let cards: Vec<ShotSummary> = self.log.recent_first().map(ShotSummary::from).collect();
        to_json(&cards).map_err(|e| JsValue::from_str(&e))
    }

    /// Most recent entry, for restoring the gauges on load
    pub fn latest(&self) -> Option<String> {
        self.log.latest().and_then(|entry| to_json(entry).ok())
    }

    #[wasm_bindgen(js_name = lastId)]
    pub fn last_id(&self) -> f64 {
        self.log.last_id() as f64
    }

    /// Clear history in memory and in local storage
    pub fn clear(&mut self) {
        self.log.clear();
        self.persist();
    }
}

impl ShotDialer {
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.log.history()) {
            warn(&format!("Unable to persist shots locally: {}", e));
        }
    }
}

impl Default for ShotDialer {
    fn default() -> Self {
        Self::new()
    }
}

fn now() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(js_sys::Date::now() as i64)
        .single()
        .unwrap_or_default()
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}
