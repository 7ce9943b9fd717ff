//! Self-test scenarios and their configuration.

use crate::analysis::{is_valid_bit_depth, Diagnosis};
use crate::config::ConfigError;
use crate::estimator::EntropyEstimate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters of the self-test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfTestConfig {
    /// Samples per scenario.
    pub samples: usize,
    /// Nominal bit depths to exercise, in order.
    pub bit_depths: Vec<u32>,
    /// Standard deviation of the additive noise.
    pub noise_std_dev: f64,
    /// Fixed generator seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Low bits to drop for the coarse scenario; `None` skips it.
    pub quantize_drop_bits: Option<u32>,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            samples: 10_000,
            bit_depths: vec![8, 16],
            noise_std_dev: 0.01,
            seed: None,
            quantize_drop_bits: None,
        }
    }
}

impl SelfTestConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples == 0 {
            return Err(ConfigError::NoSamples);
        }
        if self.bit_depths.is_empty() {
            return Err(ConfigError::NoBitDepths);
        }
        if let Some(&bad) = self.bit_depths.iter().find(|&&b| !is_valid_bit_depth(b)) {
            return Err(ConfigError::InvalidBitDepth(bad));
        }
        if !self.noise_std_dev.is_finite() || self.noise_std_dev < 0.0 {
            return Err(ConfigError::InvalidNoise(self.noise_std_dev));
        }
        if let Some(drop_bits) = self.quantize_drop_bits {
            if drop_bits == 0 || drop_bits >= 64 {
                return Err(ConfigError::InvalidQuantization(drop_bits));
            }
        }
        Ok(())
    }

    /// Lists the scenarios this configuration runs, in order.
    pub fn scenarios(&self) -> Vec<Scenario> {
        let mut scenarios = Vec::with_capacity(self.bit_depths.len() * 3);

        for &bit_depth in &self.bit_depths {
            scenarios.push(Scenario::new(bit_depth, ScenarioKind::Clean));
            scenarios.push(Scenario::new(bit_depth, ScenarioKind::Noisy));

            if let Some(drop_bits) = self.quantize_drop_bits {
                if drop_bits < bit_depth {
                    scenarios.push(Scenario::new(bit_depth, ScenarioKind::Coarse { drop_bits }));
                }
            }
        }

        scenarios
    }
}

/// How a scenario's data is derived from clean uniform integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    /// Uniform integers as drawn.
    Clean,
    /// Clean data plus Gaussian noise.
    Noisy,
    /// Clean data with the low bits cleared.
    Coarse {
        /// Low bits cleared.
        drop_bits: u32,
    },
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKind::Clean => write!(f, "clean"),
            ScenarioKind::Noisy => write!(f, "noisy"),
            ScenarioKind::Coarse { .. } => write!(f, "coarse"),
        }
    }
}

/// One synthetic dataset of the self-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    /// Nominal bits per sample.
    pub bit_depth: u32,
    /// How the data is derived.
    pub kind: ScenarioKind,
}

impl Scenario {
    /// Creates a scenario.
    pub fn new(bit_depth: u32, kind: ScenarioKind) -> Self {
        Self { bit_depth, kind }
    }

    /// Human-readable label, e.g. `8 bit data clean`.
    pub fn label(&self) -> String {
        format!("{} bit data {}", self.bit_depth, self.kind)
    }
}

/// Estimate and diagnosis of one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub estimate: EntropyEstimate,
    /// Comparison with the scenario's nominal bit depth.
    pub diagnosis: Diagnosis,
}
