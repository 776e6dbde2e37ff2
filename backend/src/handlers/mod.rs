//! HTTP handlers for the Espresso Dialer API

pub mod health;
pub mod shots;

pub use health::health_check;
pub use shots::{clear_shots, evaluate_shot, latest_shot, list_shots};
