//! Evaluation result models

use serde::{Deserialize, Serialize};

use super::PuckDescription;

/// Scoring dimension contributing to the composite score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Ratio,
    BrewTime,
    Pressure,
    Temperature,
    PuckWetness,
    Taste,
}

/// A single factor score in [0, 100]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FactorScore {
    pub factor: FactorKind,
    pub score: f64,
}

/// Direction of the recommended grind change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GrindDirection {
    Coarser,
    Finer,
    #[default]
    Same,
}

impl GrindDirection {
    /// Positive deltas go coarser, negative go finer
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            GrindDirection::Coarser
        } else if delta < 0.0 {
            GrindDirection::Finer
        } else {
            GrindDirection::Same
        }
    }
}

impl std::fmt::Display for GrindDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrindDirection::Coarser => write!(f, "coarser"),
            GrindDirection::Finer => write!(f, "finer"),
            GrindDirection::Same => write!(f, "same"),
        }
    }
}

/// Score and coaching produced for a shot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// yield / dose
    pub ratio: f64,
    /// Mean of the included factor scores
    pub score: f64,
    #[serde(default)]
    pub recommendation_text: String,
    /// Signed adjustment, positive = coarser
    pub grind_delta: f64,
    /// Current setting plus delta, clamped to the scale bounds
    #[serde(alias = "nextGrind")]
    pub next_grind_setting: f64,
    pub puck_description: PuckDescription,
    #[serde(default)]
    pub grind_direction: GrindDirection,
    #[serde(default)]
    pub factors: Vec<FactorScore>,
}

/// Outcome of an evaluation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
#[must_use]
pub enum EvaluationOutcome {
    /// Dose or yield missing, non-positive or non-finite
    NeedsMoreInput,
    Evaluated(EvaluationResult),
}

impl EvaluationOutcome {
    pub fn result(&self) -> Option<&EvaluationResult> {
        match self {
            EvaluationOutcome::Evaluated(result) => Some(result),
            EvaluationOutcome::NeedsMoreInput => None,
        }
    }

    pub fn into_result(self) -> Option<EvaluationResult> {
        match self {
            EvaluationOutcome::Evaluated(result) => Some(result),
            EvaluationOutcome::NeedsMoreInput => None,
        }
    }

    pub fn needs_more_input(&self) -> bool {
        matches!(self, EvaluationOutcome::NeedsMoreInput)
    }
}
