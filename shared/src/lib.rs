//! Shared core of the Espresso Shot Dialer
//!
//! Normalizes raw brew inputs, scores the shot, recommends the next grind
//! setting and keeps a bounded history. Used by the backend and by the page
//! through the WASM crate.

pub mod display;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod shot_log;
pub mod store;
pub mod types;
pub mod validation;

pub use error::ShotError;
pub use evaluation::evaluate;
pub use models::*;
pub use shot_log::{ShotLog, MAX_SHOTS};
pub use store::{decode_history, encode_history, HistoryStore, MemoryStore, STORAGE_KEY};
pub use types::*;
pub use validation::*;

/// Normalize raw form fields and evaluate them in one step.
///
/// Insufficient dose/yield surfaces as [`EvaluationOutcome::NeedsMoreInput`];
/// the returned parameters are `None` in that case.
pub fn evaluate_raw(
    input: &RawShotInput,
    fallback_bounds: ScaleBounds,
) -> (Option<ShotParameters>, EvaluationOutcome) {
    let bounds = normalize_scale_bounds(input, fallback_bounds);
    match normalize_shot(input) {
        Ok(params) => {
            let outcome = evaluate(&params, &bounds);
            (Some(params), outcome)
        }
        Err(_) => (None, EvaluationOutcome::NeedsMoreInput),
    }
}
