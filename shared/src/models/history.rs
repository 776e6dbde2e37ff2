//! Shot history models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EvaluationResult, ShotParameters};

/// A logged shot: the inputs, what the evaluator made of them, and when.
///
/// Persisted as one flat JSON object per shot. Records written by the
/// earlier page (`yieldVal`, `brewTime`, `nextGrind`, no recommendation
/// text) still decode through field aliases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShotLogEntry {
    /// 1-based, never reused
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub parameters: ShotParameters,
    #[serde(flatten)]
    pub result: EvaluationResult,
}
