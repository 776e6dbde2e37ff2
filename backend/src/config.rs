//! Configuration management for the Espresso Dialer server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with DIALER_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::ScaleBounds;
use validator::{Validate, ValidationError};

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    #[validate]
    pub server: ServerConfig,

    /// Shot history storage
    #[validate]
    pub history: HistoryConfig,

    /// Default grinder scale when the page does not send one
    #[validate]
    pub scale: ScaleConfig,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ServerConfig {
    /// Server port
    #[validate(range(min = 1))]
    pub port: u16,

    /// Server host
    #[validate(length(min = 1))]
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct HistoryConfig {
    /// JSON file holding the persisted shot history
    #[validate(length(min = 1))]
    pub storage_path: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
#[validate(schema(function = "validate_scale_range"))]
pub struct ScaleConfig {
    pub min: f64,
    pub max: f64,
}

impl ScaleConfig {
    pub fn bounds(&self) -> ScaleBounds {
        ScaleBounds::new(self.min, self.max)
    }
}

fn validate_scale_range(scale: &ScaleConfig) -> Result<(), ValidationError> {
    if scale.min.is_finite() && scale.max.is_finite() && scale.max > scale.min {
        Ok(())
    } else {
        Err(ValidationError::new("scale_max_must_exceed_min"))
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("DIALER_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("history.storage_path", "data/shots.json")?
            .set_default("scale.min", 0.0)?
            .set_default("scale.max", 40.0)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (DIALER_ prefix)
            .add_source(
                Environment::with_prefix("DIALER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
