//! Shot scoring and grind recommendation engine
//!
//! Score factors and grind advice are computed independently: temperature
//! only moves the score, channeling only adds advice. Keep them apart.

use crate::models::{
    Channeling, EvaluationOutcome, EvaluationResult, FactorKind, FactorScore, GrindDirection,
    PuckDescription, ScaleBounds, ShotParameters, Taste,
};

/// Half-width of the band around the target ratio that counts as on target
pub const RATIO_TOLERANCE: f64 = 0.1;

pub const IDEAL_BREW_TIME_SECONDS: f64 = 30.0;
pub const IDEAL_PRESSURE_BAR: f64 = 9.0;
pub const IDEAL_WATER_TEMP_CELSIUS: f64 = 93.0;
pub const IDEAL_PUCK_WETNESS: f64 = 6.0;

const PUCK_WETNESS_SCALE: f64 = 4.0;
const FULL_WEIGHT: f64 = 100.0;
const GAUGE_WEIGHT: f64 = 80.0;

const BALANCED_TASTE_SCORE: f64 = 90.0;
const OFF_TASTE_SCORE: f64 = 60.0;
const FALLBACK_SCORE: f64 = 50.0;

const BREW_TIME_FAST_SECONDS: f64 = 25.0;
const BREW_TIME_SLOW_SECONDS: f64 = 35.0;

const RATIO_STEP: f64 = 1.0;
const ADJUSTMENT_STEP: f64 = 0.5;

mod advice {
    pub const RATIO_SHORT: &str =
        "Shot is short and intense. Increase the grind number or reduce dose.";
    pub const RATIO_LONG: &str =
        "Shot is long or watery. Decrease the grind number or increase dose.";
    pub const RATIO_ON_TARGET: &str = "Ratio is near target. Leave the dose and yield steady.";

    pub const BREW_FAST: &str =
        "Brew time is quick. Aim for a finer grind or a slightly higher dose.";
    pub const BREW_SLOW: &str =
        "Brew time is slow. Make the grind a touch coarser or lower the dose.";
    pub const BREW_HEALTHY: &str = "Brew time is in a healthy 25–35s window.";

    pub const PUCK_SOUPY: &str = "Puck landed on the soupy side. Dial in prep or extend the shot a touch for better structure.";
    pub const PUCK_DESERT_DRY: &str = "Puck slammed out desert-dry. Ease up the shot (coarser or shorter) to keep sweetness in play.";
    pub const PUCK_LEANED_DRY: &str =
        "Puck leaned dry. Consider shaving a second or two off brew time.";
    pub const PUCK_BALANCED: &str = "Puck moisture looked balanced, prep routine is on track.";

    pub const CHANNELING_HEAVY: &str =
        "Heavy channeling spotted. Focus on puck prep and consider WDT/tapping.";
    pub const CHANNELING_MINOR: &str =
        "Minor channeling. Evaluate tamp pressure and distribution.";

    pub const TASTE_SOUR: &str = "Taste skewed sour. Go a little finer and extend contact time.";
    pub const TASTE_BITTER: &str = "Taste leaned bitter/dry. Go coarser or shorten the shot.";
}

/// Score one dimension: `100 - min(100, |actual - ideal| / scale * weight)`
pub fn factor_score(actual: f64, ideal: f64, scale: f64, weight: f64) -> f64 {
    100.0 - ((actual - ideal).abs() / scale * weight).min(100.0)
}

/// Evaluate a shot against the grinder's scale bounds.
///
/// Returns [`EvaluationOutcome::NeedsMoreInput`] when dose or yield is not a
/// positive finite number; nothing should be logged in that case.
pub fn evaluate(params: &ShotParameters, bounds: &ScaleBounds) -> EvaluationOutcome {
    let inputs_valid = params.dose.is_finite()
        && params.yield_amount.is_finite()
        && params.dose > 0.0
        && params.yield_amount > 0.0;
    if !inputs_valid {
        return EvaluationOutcome::NeedsMoreInput;
    }

    let ratio = params.yield_amount / params.dose;

    let factors = score_factors(params, ratio);
    let score = if factors.is_empty() {
        FALLBACK_SCORE
    } else {
        factors.iter().map(|f| f.score).sum::<f64>() / factors.len() as f64
    };

    let advice = advise(params, ratio);
    let next_grind_setting = bounds.clamp(params.current_grind_setting + advice.grind_delta);

    EvaluationOutcome::Evaluated(EvaluationResult {
        ratio,
        score,
        recommendation_text: advice.messages.join(" "),
        grind_delta: advice.grind_delta,
        next_grind_setting,
        puck_description: PuckDescription::from_wetness(params.puck_wetness),
        grind_direction: GrindDirection::from_delta(advice.grind_delta),
        factors,
    })
}

/// Factor scores in inclusion order
fn score_factors(params: &ShotParameters, ratio: f64) -> Vec<FactorScore> {
    let mut factors = Vec::with_capacity(6);
    let mut push = |factor, score| factors.push(FactorScore { factor, score });

    push(
        FactorKind::Ratio,
        factor_score(ratio, params.target_ratio, params.target_ratio, FULL_WEIGHT),
    );

    if let Some(brew_time) = params.brew_time_seconds {
        push(
            FactorKind::BrewTime,
            factor_score(
                brew_time,
                IDEAL_BREW_TIME_SECONDS,
                IDEAL_BREW_TIME_SECONDS,
                FULL_WEIGHT,
            ),
        );
    }

    if let Some(pressure) = params.pressure_bar {
        push(
            FactorKind::Pressure,
            factor_score(pressure, IDEAL_PRESSURE_BAR, IDEAL_PRESSURE_BAR, GAUGE_WEIGHT),
        );
    }

    if let Some(temp) = params.water_temp_celsius {
        push(
            FactorKind::Temperature,
            factor_score(
                temp,
                IDEAL_WATER_TEMP_CELSIUS,
                IDEAL_WATER_TEMP_CELSIUS,
                GAUGE_WEIGHT,
            ),
        );
    }

    push(
        FactorKind::PuckWetness,
        factor_score(
            f64::from(params.puck_wetness),
            IDEAL_PUCK_WETNESS,
            PUCK_WETNESS_SCALE,
            FULL_WEIGHT,
        ),
    );

    let taste_score = match params.taste {
        Taste::Balanced => BALANCED_TASTE_SCORE,
        Taste::Sour | Taste::Bitter => OFF_TASTE_SCORE,
    };
    push(FactorKind::Taste, taste_score);

    factors
}

struct Advice {
    messages: Vec<&'static str>,
    grind_delta: f64,
}

/// Walk the directional rules in their fixed order
fn advise(params: &ShotParameters, ratio: f64) -> Advice {
    let mut messages = Vec::with_capacity(5);
    let mut grind_delta = 0.0;

    if ratio < params.target_ratio - RATIO_TOLERANCE {
        messages.push(advice::RATIO_SHORT);
        grind_delta += RATIO_STEP;
    } else if ratio > params.target_ratio + RATIO_TOLERANCE {
        messages.push(advice::RATIO_LONG);
        grind_delta -= RATIO_STEP;
    } else {
        messages.push(advice::RATIO_ON_TARGET);
    }

    if let Some(brew_time) = params.brew_time_seconds {
        if brew_time < BREW_TIME_FAST_SECONDS {
            messages.push(advice::BREW_FAST);
            grind_delta -= ADJUSTMENT_STEP;
        } else if brew_time > BREW_TIME_SLOW_SECONDS {
            messages.push(advice::BREW_SLOW);
            grind_delta += ADJUSTMENT_STEP;
        } else {
            messages.push(advice::BREW_HEALTHY);
        }
    }

    messages.push(match params.puck_wetness {
        0..=3 => advice::PUCK_SOUPY,
        9..=u8::MAX => advice::PUCK_DESERT_DRY,
        7..=8 => advice::PUCK_LEANED_DRY,
        _ => advice::PUCK_BALANCED,
    });

    match params.channeling {
        Channeling::Heavy => messages.push(advice::CHANNELING_HEAVY),
        Channeling::Minor => messages.push(advice::CHANNELING_MINOR),
        Channeling::Clean => {}
    }

    match params.taste {
        Taste::Sour => {
            messages.push(advice::TASTE_SOUR);
            grind_delta -= ADJUSTMENT_STEP;
        }
        Taste::Bitter => {
            messages.push(advice::TASTE_BITTER);
            grind_delta += ADJUSTMENT_STEP;
        }
        Taste::Balanced => {}
    }

    Advice {
        messages,
        grind_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn dialed_in_shot() -> ShotParameters {
        ShotParameters {
            brew_time_seconds: Some(28.0),
            pressure_bar: Some(9.0),
            water_temp_celsius: Some(93.0),
            ..ShotParameters::new(18.0, 36.0)
        }
    }

    fn evaluated(params: &ShotParameters) -> EvaluationResult {
        evaluate(params, &ScaleBounds::default())
            .into_result()
            .expect("shot should evaluate")
    }

    fn factor(result: &EvaluationResult, kind: FactorKind) -> Option<f64> {
        result
            .factors
            .iter()
            .find(|f| f.factor == kind)
            .map(|f| f.score)
    }

    #[test]
    fn test_factor_score_formula() {
        assert_eq!(factor_score(30.0, 30.0, 30.0, 100.0), 100.0);
        assert!(
            (factor_score(28.0, 30.0, 30.0, 100.0) - (100.0 - 2.0 / 30.0 * 100.0)).abs() < EPSILON
        );
        assert_eq!(factor_score(90.0, 30.0, 30.0, 100.0), 0.0);
        assert!((factor_score(10.0, 9.0, 9.0, 80.0) - (100.0 - 80.0 / 9.0)).abs() < EPSILON);
    }

    #[test]
    fn test_dialed_in_shot_scores_each_factor() {
        let result = evaluated(&dialed_in_shot());

        assert_eq!(result.ratio, 2.0);
        assert_eq!(factor(&result, FactorKind::Ratio), Some(100.0));
        assert!((factor(&result, FactorKind::BrewTime).unwrap() - 93.333_333_333).abs() < 1e-6);
        assert_eq!(factor(&result, FactorKind::Pressure), Some(100.0));
        assert_eq!(factor(&result, FactorKind::Temperature), Some(100.0));
        assert_eq!(factor(&result, FactorKind::PuckWetness), Some(75.0));
        assert_eq!(factor(&result, FactorKind::Taste), Some(90.0));

        let expected = (100.0 + (100.0 - 2.0 / 30.0 * 100.0) + 100.0 + 100.0 + 75.0 + 90.0) / 6.0;
        assert!((result.score - expected).abs() < EPSILON);
    }

    #[test]
    fn test_dialed_in_shot_advice() {
        let result = evaluated(&dialed_in_shot());

        assert_eq!(result.grind_delta, 0.0);
        assert_eq!(result.grind_direction, GrindDirection::Same);
        assert_eq!(result.next_grind_setting, 0.0);
        assert_eq!(result.puck_description, PuckDescription::Balanced);
        assert!(result.recommendation_text.contains("near target"));
        assert!(result.recommendation_text.contains("healthy 25–35s"));
        assert!(result.recommendation_text.contains("balanced"));
    }

    #[test]
    fn test_messages_follow_fixed_order() {
        let params = ShotParameters {
            brew_time_seconds: Some(40.0),
            puck_wetness: 2,
            channeling: Channeling::Heavy,
            taste: Taste::Sour,
            ..ShotParameters::new(18.0, 27.0)
        };
        let result = evaluated(&params);

        let expected = [
            advice::RATIO_SHORT,
            advice::BREW_SLOW,
            advice::PUCK_SOUPY,
            advice::CHANNELING_HEAVY,
            advice::TASTE_SOUR,
        ]
        .join(" ");
        assert_eq!(result.recommendation_text, expected);
        // +1 ratio, +0.5 brew, -0.5 taste
        assert_eq!(result.grind_delta, 1.0);
    }

    #[test]
    fn test_long_ratio_goes_finer() {
        let params = ShotParameters {
            current_grind_setting: 15.0,
            ..ShotParameters::new(18.0, 45.0)
        };
        let result = evaluated(&params);

        assert_eq!(result.grind_delta, -1.0);
        assert_eq!(result.next_grind_setting, 14.0);
        assert_eq!(result.grind_direction, GrindDirection::Finer);
        assert!(result.recommendation_text.starts_with(advice::RATIO_LONG));
    }

    #[test]
    fn test_ratio_inside_band_is_on_target() {
        let params = ShotParameters::new(20.0, 41.0);
        let result = evaluated(&params);
        assert_eq!(result.grind_delta, 0.0);
        assert!(result.recommendation_text.starts_with(advice::RATIO_ON_TARGET));
    }

    #[test]
    fn test_ratio_band_edges() {
        let delta_for = |dose: f64, yield_amount: f64| {
            let result = evaluated(&ShotParameters::new(dose, yield_amount));
            (result.grind_delta, result.recommendation_text)
        };

        // Both band edges are still on target
        let (delta, text) = delta_for(20.0, 38.0);
        assert_eq!(delta, 0.0);
        assert!(text.starts_with(advice::RATIO_ON_TARGET));
        let (delta, text) = delta_for(20.0, 42.0);
        assert_eq!(delta, 0.0);
        assert!(text.starts_with(advice::RATIO_ON_TARGET));

        let (delta, text) = delta_for(1000.0, 2101.0);
        assert_eq!(delta, -1.0);
        assert!(text.starts_with(advice::RATIO_LONG));
        let (delta, text) = delta_for(1000.0, 1899.0);
        assert_eq!(delta, 1.0);
        assert!(text.starts_with(advice::RATIO_SHORT));
    }

    #[test]
    fn test_brew_time_band_edges() {
        let advice_for = |brew_time: f64| {
            let result = evaluated(&ShotParameters {
                brew_time_seconds: Some(brew_time),
                ..ShotParameters::new(18.0, 36.0)
            });
            (result.grind_delta, result.recommendation_text)
        };

        let (delta, text) = advice_for(24.99);
        assert_eq!(delta, -0.5);
        assert!(text.contains(advice::BREW_FAST));

        for healthy in [25.0, 35.0] {
            let (delta, text) = advice_for(healthy);
            assert_eq!(delta, 0.0);
            assert!(text.contains(advice::BREW_HEALTHY));
        }

        let (delta, text) = advice_for(35.01);
        assert_eq!(delta, 0.5);
        assert!(text.contains(advice::BREW_SLOW));
    }

    #[test]
    fn test_fast_shot_and_bitter_cancel() {
        let params = ShotParameters {
            brew_time_seconds: Some(20.0),
            taste: Taste::Bitter,
            ..ShotParameters::new(18.0, 36.0)
        };
        let result = evaluated(&params);

        assert_eq!(result.grind_delta, 0.0);
        assert!(result.recommendation_text.contains(advice::BREW_FAST));
        assert!(result.recommendation_text.contains(advice::TASTE_BITTER));
        assert_eq!(factor(&result, FactorKind::Taste), Some(60.0));
    }

    #[test]
    fn test_puck_bands() {
        let message_for = |wetness: u8| {
            let params = ShotParameters {
                puck_wetness: wetness,
                ..ShotParameters::new(18.0, 36.0)
            };
            evaluated(&params).recommendation_text
        };

        assert!(message_for(3).contains(advice::PUCK_SOUPY));
        assert!(message_for(4).contains(advice::PUCK_BALANCED));
        assert!(message_for(6).contains(advice::PUCK_BALANCED));
        assert!(message_for(7).contains(advice::PUCK_LEANED_DRY));
        assert!(message_for(8).contains(advice::PUCK_LEANED_DRY));
        assert!(message_for(9).contains(advice::PUCK_DESERT_DRY));
    }

    #[test]
    fn test_channeling_is_advice_only() {
        let clean = evaluated(&ShotParameters::new(18.0, 36.0));
        let minor = evaluated(&ShotParameters {
            channeling: Channeling::Minor,
            ..ShotParameters::new(18.0, 36.0)
        });

        assert_eq!(clean.score, minor.score);
        assert_eq!(clean.grind_delta, minor.grind_delta);
        assert!(minor.recommendation_text.contains(advice::CHANNELING_MINOR));
        assert!(!clean.recommendation_text.contains("channeling"));
    }

    #[test]
    fn test_temperature_is_score_only() {
        let base = evaluated(&ShotParameters::new(18.0, 36.0));
        let hot = evaluated(&ShotParameters {
            water_temp_celsius: Some(100.0),
            ..ShotParameters::new(18.0, 36.0)
        });

        assert_ne!(base.score, hot.score);
        assert_eq!(base.grind_delta, hot.grind_delta);
        assert_eq!(base.recommendation_text, hot.recommendation_text);
    }

    #[test]
    fn test_missing_optional_factors_are_skipped() {
        let result = evaluated(&ShotParameters::new(18.0, 36.0));

        let kinds: Vec<FactorKind> = result.factors.iter().map(|f| f.factor).collect();
        assert_eq!(
            kinds,
            vec![FactorKind::Ratio, FactorKind::PuckWetness, FactorKind::Taste]
        );
        assert!((result.score - (100.0 + 75.0 + 90.0) / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_next_grind_is_clamped() {
        let bounds = ScaleBounds::new(0.0, 10.0);
        let params = ShotParameters {
            current_grind_setting: 10.0,
            taste: Taste::Bitter,
            ..ShotParameters::new(18.0, 20.0)
        };
        let result = evaluate(&params, &bounds).into_result().unwrap();

        assert_eq!(result.grind_delta, 1.5);
        assert_eq!(result.next_grind_setting, 10.0);
    }

    #[test]
    fn test_insufficient_input_sentinel() {
        let bounds = ScaleBounds::default();

        assert!(evaluate(&ShotParameters::new(0.0, 36.0), &bounds).needs_more_input());
        assert!(evaluate(&ShotParameters::new(18.0, 0.0), &bounds).needs_more_input());
        assert!(evaluate(&ShotParameters::new(-18.0, 36.0), &bounds).needs_more_input());
        assert!(evaluate(&ShotParameters::new(f64::NAN, 36.0), &bounds).needs_more_input());
        assert!(evaluate(&ShotParameters::new(18.0, f64::INFINITY), &bounds).needs_more_input());
    }
}
