//! Engine configuration.
//!
//! Pricing rules come from a TOML file so deployments can adjust the tax
//! rate and shipping policy without a rebuild:
//!
//! ```toml
//! [pricing]
//! tax_rate_bp = 2000
//! free_shipping_threshold = 5000
//! flat_shipping_fee = 599
//! ```

use bazaar_commerce::cart::PricingRules;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Pricing rules applied by the cart and order engines.
    #[serde(default)]
    pub pricing: PricingRules,
}

impl EngineConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
