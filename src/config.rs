//! File configuration.
//!
//! A TOML file can set the self-test parameters and the resolution
//! thresholds. Every section and field is optional; missing values
//! fall back to their defaults.
//!
//! ```toml
//! [selftest]
//! samples = 10000
//! bit_depths = [8, 16]
//! noise_std_dev = 0.01
//! seed = 1234
//!
//! [thresholds]
//! noise_tolerance_bits = 0.25
//! degradation_tolerance_bits = 1.0
//! ```

use crate::analysis::ResolutionThresholds;
use crate::selftest::SelfTestConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("sample count must be at least 1")]
    NoSamples,
    #[error("no bit depths configured")]
    NoBitDepths,
    #[error("invalid bit depth {0} (must be 1-64)")]
    InvalidBitDepth(u32),
    #[error("invalid noise standard deviation {0} (must be finite and non-negative)")]
    InvalidNoise(f64),
    #[error("invalid quantization: cannot drop {0} bits (must be 1-63)")]
    InvalidQuantization(u32),
    #[error("invalid threshold {name} = {value} (must be finite and non-negative)")]
    InvalidTolerance { name: &'static str, value: f64 },
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub selftest: SelfTestConfig,
    #[serde(default)]
    pub thresholds: ResolutionThresholds,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selftest.validate()?;
        self.thresholds.validate()
    }
}
