//! Configuration for nagex-tracker.
//!
//! Handles loading configuration from a TOML file with CLI overrides
//! layered on top.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use nagex_sdk::objects::{LocationReport, OrderId};

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    /// Root URL of the order service.
    pub base_url: Url,

    /// Orders to start tracking at launch.
    #[serde(default)]
    pub orders: Vec<OrderId>,

    /// File to re-read the anti-forgery token from on every mutating
    /// request. Without it, status updates are unavailable.
    #[serde(default)]
    pub csrf_token_file: Option<PathBuf>,

    /// One-off delivery location to report at startup.
    #[serde(default)]
    pub location: Option<LocationReport>,
}

/// Configuration loader that layers CLI overrides over the file.
pub struct ConfigLoader {
    config_path: PathBuf,
    base_url_override: Option<Url>,
    extra_orders: Vec<OrderId>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(
        config_path: impl AsRef<Path>,
        base_url_override: Option<Url>,
        extra_orders: Vec<OrderId>,
    ) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            base_url_override,
            extra_orders,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    pub fn load(&self) -> Result<FileConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut config: FileConfig = toml::from_str(&config_content)?;

        self.apply_overrides(&mut config);
        validate(&config)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut FileConfig) {
        if let Some(base_url) = &self.base_url_override {
            config.base_url = base_url.clone();
        }
        for order_id in &self.extra_orders {
            if !config.orders.contains(order_id) {
                config.orders.push(order_id.clone());
            }
        }
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.base_url.cannot_be_a_base() {
        return Err(ConfigError::ValidationError(format!(
            "base_url {} cannot be used as a base URL",
            config.base_url
        )));
    }
    if let Some(location) = &config.location {
        if !(-90.0..=90.0).contains(&location.latitude) {
            return Err(ConfigError::ValidationError(format!(
                "latitude {} out of range",
                location.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&location.longitude) {
            return Err(ConfigError::ValidationError(format!(
                "longitude {} out of range",
                location.longitude
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
base_url = "https://nagex.example.com"
orders = ["42", "97"]
csrf_token_file = "/var/run/nagex/csrftoken"

[location]
latitude = 23.8103
longitude = 90.4125
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url.as_str(), "https://nagex.example.com/");
        assert_eq!(config.orders, vec![OrderId::new("42"), OrderId::new("97")]);
        assert!(config.csrf_token_file.is_some());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config: FileConfig =
            toml::from_str(r#"base_url = "http://localhost:8000""#).unwrap();
        assert!(config.orders.is_empty());
        assert!(config.csrf_token_file.is_none());
        assert!(config.location.is_none());
    }

    #[test]
    fn test_out_of_range_location_is_rejected() {
        let config: FileConfig = toml::from_str(
            r#"
base_url = "http://localhost:8000"

[location]
latitude = 123.0
longitude = 0.0
"#,
        )
        .unwrap();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_cli_overrides_replace_url_and_merge_orders() {
        let loader = ConfigLoader::new(
            "/nonexistent",
            Some(Url::parse("http://staging.local:8000").unwrap()),
            vec![OrderId::new("42"), OrderId::new("7")],
        );
        let mut config: FileConfig = toml::from_str(
            r#"
base_url = "http://localhost:8000"
orders = ["42"]
"#,
        )
        .unwrap();

        loader.apply_overrides(&mut config);
        assert_eq!(config.base_url.as_str(), "http://staging.local:8000/");
        assert_eq!(config.orders, vec![OrderId::new("42"), OrderId::new("7")]);
    }
}
