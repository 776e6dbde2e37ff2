//! Input normalization and validation for shot parameters
//!
//! Every default the dialer applies to a missing form field lives here, so the
//! evaluator only ever sees fully-typed parameters.

use crate::error::ShotError;
use crate::models::{Channeling, ScaleBounds, ShotParameters, Taste};
use crate::types::{field, RawShotInput, RawValue};

pub const DEFAULT_TARGET_RATIO: f64 = 2.0;
pub const DEFAULT_GRIND_SETTING: f64 = 0.0;
pub const DEFAULT_PUCK_WETNESS: u8 = 5;
pub const PUCK_WETNESS_MIN: u8 = 1;
pub const PUCK_WETNESS_MAX: u8 = 10;

// ============================================================================
// Raw Value Parsing
// ============================================================================

/// Parse a raw value into a finite number.
///
/// Text is read up to its leading numeric prefix, so `"18g"` reads as 18.
/// Anything non-finite or without digits is treated as absent.
pub fn parse_number(raw: Option<&RawValue>) -> Option<f64> {
    let value = match raw? {
        RawValue::Number(n) => Some(*n),
        RawValue::Text(text) => parse_numeric_prefix(text),
        RawValue::Flag(_) | RawValue::Null => None,
    }?;

    value.is_finite().then_some(value)
}

/// Parse a number, substituting `fallback` when absent
pub fn parse_number_or(raw: Option<&RawValue>, fallback: f64) -> f64 {
    parse_number(raw).unwrap_or(fallback)
}

/// Parse a checkbox-style flag
pub fn parse_flag(raw: Option<&RawValue>) -> bool {
    match raw {
        Some(RawValue::Flag(flag)) => *flag,
        Some(RawValue::Number(n)) => *n != 0.0,
        Some(RawValue::Text(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "1"
        ),
        Some(RawValue::Null) | None => false,
    }
}

/// Parse free text, trimming it and dropping it when empty
pub fn parse_text(raw: Option<&RawValue>) -> Option<String> {
    match raw {
        Some(RawValue::Text(text)) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

fn parse_choice(raw: Option<&RawValue>) -> Option<&str> {
    match raw {
        Some(RawValue::Text(text)) => Some(text.as_str()),
        _ => None,
    }
}

fn parse_numeric_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

// ============================================================================
// Shot Validations
// ============================================================================

/// Validate that dose and yield are both present and positive
pub fn validate_dose_and_yield(
    dose: Option<f64>,
    yield_amount: Option<f64>,
) -> Result<(f64, f64), ShotError> {
    match (dose, yield_amount) {
        (Some(dose), Some(yield_amount))
            if dose.is_finite() && yield_amount.is_finite() && dose > 0.0 && yield_amount > 0.0 =>
        {
            Ok((dose, yield_amount))
        }
        _ => Err(ShotError::InsufficientInput),
    }
}

/// Round and clamp a wetness reading onto the 1-10 scale
pub fn normalize_puck_wetness(value: Option<f64>) -> u8 {
    match value {
        Some(v) => v
            .round()
            .clamp(f64::from(PUCK_WETNESS_MIN), f64::from(PUCK_WETNESS_MAX)) as u8,
        None => DEFAULT_PUCK_WETNESS,
    }
}

/// A zero reading on an optional gauge means it was not measured
fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

// ============================================================================
// Normalizer
// ============================================================================

/// Turn raw form fields into typed shot parameters
pub fn normalize_shot(input: &RawShotInput) -> Result<ShotParameters, ShotError> {
    let (dose, yield_amount) = validate_dose_and_yield(
        parse_number(input.get(field::DOSE)),
        parse_number(input.get(field::YIELD)),
    )?;

    let target_ratio = parse_number(input.get(field::TARGET_RATIO))
        .filter(|ratio| *ratio > 0.0)
        .unwrap_or(DEFAULT_TARGET_RATIO);

    let channeling = parse_choice(input.get(field::CHANNELING))
        .and_then(Channeling::parse)
        .unwrap_or_default();
    let taste = parse_choice(input.get(field::TASTE))
        .and_then(Taste::parse)
        .unwrap_or_default();

    Ok(ShotParameters {
        dose,
        yield_amount,
        target_ratio,
        brew_time_seconds: measured(parse_number(input.get(field::BREW_TIME))),
        water_temp_celsius: measured(parse_number(input.get(field::WATER_TEMP))),
        pressure_bar: measured(parse_number(input.get(field::PRESSURE))),
        current_grind_setting: parse_number_or(
            input.get(field::CURRENT_GRIND),
            DEFAULT_GRIND_SETTING,
        ),
        grind_time_seconds: parse_number(input.get(field::GRIND_TIME)),
        puck_wetness: normalize_puck_wetness(parse_number(input.get(field::PUCK_WETNESS))),
        channeling,
        taste,
        coffee_screen_used: parse_flag(input.get(field::COFFEE_SCREEN)),
        notes: parse_text(input.get(field::NOTES)),
    })
}

/// Read the grinder scale bounds, falling back per field to `fallback`
pub fn normalize_scale_bounds(input: &RawShotInput, fallback: ScaleBounds) -> ScaleBounds {
    let min = parse_number_or(input.get(field::SCALE_MIN), fallback.min);
    let max = parse_number_or(input.get(field::SCALE_MAX), fallback.max);
    ScaleBounds::new(min, max)
}
