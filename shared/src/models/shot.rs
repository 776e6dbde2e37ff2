//! Shot parameter models

use serde::{Deserialize, Serialize};

/// Brew parameters for a single espresso shot.
///
/// Built by the input normalizer; never mutated once evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShotParameters {
    /// Dry coffee in grams
    pub dose: f64,
    /// Liquid espresso out in grams
    #[serde(alias = "yieldVal")]
    pub yield_amount: f64,
    pub target_ratio: f64,
    #[serde(alias = "brewTime")]
    pub brew_time_seconds: Option<f64>,
    #[serde(alias = "waterTemp")]
    pub water_temp_celsius: Option<f64>,
    /// Nominal range 0-12 bar
    #[serde(alias = "pressure")]
    pub pressure_bar: Option<f64>,
    #[serde(alias = "currentGrind")]
    pub current_grind_setting: f64,
    #[serde(alias = "grindTime")]
    pub grind_time_seconds: Option<f64>,
    /// Subjective 1-10 rating, 1 = soupy, 10 = bone dry
    pub puck_wetness: u8,
    pub channeling: Channeling,
    pub taste: Taste,
    #[serde(alias = "coffeeScreen")]
    pub coffee_screen_used: bool,
    pub notes: Option<String>,
}

impl ShotParameters {
    /// Create parameters with every optional field at its default
    pub fn new(dose: f64, yield_amount: f64) -> Self {
        Self {
            dose,
            yield_amount,
            target_ratio: 2.0,
            brew_time_seconds: None,
            water_temp_celsius: None,
            pressure_bar: None,
            current_grind_setting: 0.0,
            grind_time_seconds: None,
            puck_wetness: 5,
            channeling: Channeling::default(),
            taste: Taste::default(),
            coffee_screen_used: false,
            notes: None,
        }
    }
}

/// Observed channeling through the puck
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Channeling {
    #[default]
    #[serde(rename = "none")]
    Clean,
    #[serde(rename = "some")]
    Minor,
    #[serde(rename = "lots")]
    Heavy,
}

impl Channeling {
    /// Parse a form value, `None` for anything unrecognised
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Channeling::Clean),
            "some" => Some(Channeling::Minor),
            "lots" => Some(Channeling::Heavy),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Channeling::Clean => "none",
            Channeling::Minor => "some",
            Channeling::Heavy => "lots",
        }
    }
}

/// Taste impression of the shot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Taste {
    Sour,
    #[default]
    Balanced,
    Bitter,
}

impl Taste {
    /// Parse a form value, `None` for anything unrecognised
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sour" => Some(Taste::Sour),
            "balanced" => Some(Taste::Balanced),
            "bitter" => Some(Taste::Bitter),
            _ => None,
        }
    }
}

impl std::fmt::Display for Taste {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Taste::Sour => write!(f, "sour"),
            Taste::Balanced => write!(f, "balanced"),
            Taste::Bitter => write!(f, "bitter"),
        }
    }
}

/// Usable setting range of the grinder
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    /// Build bounds, coercing `max` to `min + 1` when it does not exceed `min`
    pub fn new(min: f64, max: f64) -> Self {
        let max = if max > min { max } else { min + 1.0 };
        Self { min, max }
    }

    /// Clamp a grind setting into the range, inclusive on both ends
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: 0.0, max: 40.0 }
    }
}

/// Puck moisture classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PuckDescription {
    Soaked,
    Balanced,
    Dry,
    #[serde(rename = "Desert dry")]
    DesertDry,
}

impl PuckDescription {
    /// Classify a 1-10 wetness rating
    pub fn from_wetness(wetness: u8) -> Self {
        match wetness {
            0..=3 => PuckDescription::Soaked,
            4..=6 => PuckDescription::Balanced,
            7..=8 => PuckDescription::Dry,
            _ => PuckDescription::DesertDry,
        }
    }

    /// Short coaching note shown next to the wetness slider
    pub fn note(&self) -> &'static str {
        match self {
            PuckDescription::Soaked => {
                "Soupy puck, consider longer dry time or finer distribution."
            }
            PuckDescription::Balanced => "Moisture looked good, keep prep steady.",
            PuckDescription::Dry => "Leaning dry. Check shot length or lower dose slightly.",
            PuckDescription::DesertDry => {
                "Very dry puck. Consider coarser grind or shorter shot."
            }
        }
    }
}

impl std::fmt::Display for PuckDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PuckDescription::Soaked => write!(f, "Soaked"),
            PuckDescription::Balanced => write!(f, "Balanced"),
            PuckDescription::Dry => write!(f, "Dry"),
            PuckDescription::DesertDry => write!(f, "Desert dry"),
        }
    }
}
