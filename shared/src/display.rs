//! Presentation helpers shared by the hosts
//!
//! Dial math and the text a history card shows. No rendering happens here.

use serde::Serialize;

use crate::models::ShotLogEntry;

/// Needle sweep, in degrees either side of twelve o'clock
pub const GAUGE_SWEEP_DEGREES: f64 = 120.0;

/// Placeholder for a value that was not recorded
pub const MISSING: &str = "—";

/// Format a value to fixed digits, or the missing placeholder
pub fn format_number(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{:.*}", digits, v),
        _ => MISSING.to_string(),
    }
}

/// Needle angle for `value` on a dial spanning `min..=max`
pub fn gauge_angle(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return -GAUGE_SWEEP_DEGREES;
    }
    let safe = value.max(min).min(max);
    -GAUGE_SWEEP_DEGREES + (safe - min) / span * (2.0 * GAUGE_SWEEP_DEGREES)
}

/// Score dial reading
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ScoreGauge {
    pub percent: u8,
    pub angle: f64,
}

/// Round the score to a whole percentage and place the needle
pub fn score_gauge(score: f64) -> ScoreGauge {
    let percent = if score.is_nan() {
        0
    } else {
        score.round().clamp(0.0, 100.0) as u8
    };
    ScoreGauge {
        percent,
        angle: gauge_angle(f64::from(percent), 0.0, 100.0),
    }
}

/// Text lines of a history card
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShotSummary {
    pub title: String,
    pub time: String,
    pub ratio: String,
    pub grind: String,
    pub brew: String,
    pub puck: String,
    pub screen: String,
    pub taste: String,
    pub notes: Option<String>,
}

impl From<&ShotLogEntry> for ShotSummary {
    fn from(entry: &ShotLogEntry) -> Self {
        let params = &entry.parameters;
        let result = &entry.result;

        Self {
            title: format!("Shot #{}", entry.id),
            time: entry.timestamp.format("%H:%M").to_string(),
            ratio: format!("{}:1", format_number(Some(result.ratio), 1)),
            grind: format!(
                "{} → {}",
                format_number(Some(params.current_grind_setting), 1),
                format_number(Some(result.next_grind_setting), 1)
            ),
            brew: params
                .brew_time_seconds
                .map(|t| format!("{}s", format_number(Some(t), 0)))
                .unwrap_or_else(|| "n/a".to_string()),
            puck: format!("{} ({}/10)", result.puck_description, params.puck_wetness),
            screen: if params.coffee_screen_used { "On" } else { "Off" }.to_string(),
            taste: params.taste.to_string(),
            notes: params.notes.clone(),
        }
    }
}
