//! Common types used across the dialer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A raw form value as the page hands it over
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Flag(bool),
    Number(f64),
    Text(String),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Flag(value)
    }
}

/// Raw shot input keyed by form field name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RawShotInput {
    fields: BTreeMap<String, RawValue>,
}

impl RawShotInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: &str, value: impl Into<RawValue>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<RawValue>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields.get(field)
    }
}

impl FromIterator<(String, RawValue)> for RawShotInput {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Form field names read by the normalizer
pub mod field {
    pub const DOSE: &str = "dose";
    pub const YIELD: &str = "yield";
    pub const TARGET_RATIO: &str = "targetRatio";
    pub const BREW_TIME: &str = "brewTime";
    pub const WATER_TEMP: &str = "waterTemp";
    pub const PRESSURE: &str = "pressure";
    pub const CURRENT_GRIND: &str = "currentGrind";
    pub const GRIND_TIME: &str = "grindTime";
    pub const PUCK_WETNESS: &str = "puckWetness";
    pub const CHANNELING: &str = "channeling";
    pub const TASTE: &str = "taste";
    pub const COFFEE_SCREEN: &str = "coffeeScreen";
    pub const NOTES: &str = "notes";
    pub const SCALE_MIN: &str = "scaleMin";
    pub const SCALE_MAX: &str = "scaleMax";
}
