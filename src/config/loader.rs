//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{Result, ServiceError};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    // Add default config file if it exists
    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    // Add environment variables with APP_ prefix
    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ServiceError::Configuration(e.to_string()))?;

    // Every field carries a serde default, so an empty source set yields
    // the reference configuration
    let cfg = config
        .try_deserialize::<AppConfig>()
        .map_err(|e| ServiceError::Configuration(e.to_string()))?;
    validate(cfg)
}

fn validate(cfg: AppConfig) -> Result<AppConfig> {
    if cfg.books.is_empty() {
        return Err(ServiceError::Configuration(
            "books must name at least one trading book".to_string(),
        ));
    }
    if !cfg.books.contains(&cfg.default_book) {
        return Err(ServiceError::Configuration(format!(
            "default_book {} is not one of the configured books",
            cfg.default_book
        )));
    }
    if cfg.gui_throttle_ms < 0 {
        return Err(ServiceError::Configuration(
            "gui_throttle_ms must not be negative".to_string(),
        ));
    }
    if cfg.hidden_ratio.is_sign_negative() {
        return Err(ServiceError::Configuration(
            "hidden_ratio must not be negative".to_string(),
        ));
    }
    Ok(cfg)
}
