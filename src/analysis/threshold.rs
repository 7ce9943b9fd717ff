//! Tolerances for flagging resolution anomalies.
//!
//! Observed unique entropy is compared against the resolution expected
//! from clean data at the nominal bit depth. Too much resolution means
//! noise was added; too little means values collapsed onto fewer levels.

use super::expected::{expected_unique_entropy, is_valid_bit_depth};
use crate::config::ConfigError;
use crate::estimator::EntropyEstimate;
use serde::{Deserialize, Serialize};

/// Tolerances, in bits, around the expected unique entropy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionThresholds {
    /// Maximum excess over the expected unique entropy.
    pub noise_tolerance_bits: f64,
    /// Maximum shortfall below the expected unique entropy.
    pub degradation_tolerance_bits: f64,
}

impl Default for ResolutionThresholds {
    fn default() -> Self {
        Self {
            noise_tolerance_bits: 0.25,
            degradation_tolerance_bits: 1.0,
        }
    }
}

impl ResolutionThresholds {
    /// Creates tighter thresholds.
    pub fn conservative() -> Self {
        Self {
            noise_tolerance_bits: 0.1,
            degradation_tolerance_bits: 0.5,
        }
    }

    /// Creates looser thresholds (for small or non-uniform datasets).
    pub fn permissive() -> Self {
        Self {
            noise_tolerance_bits: 0.5,
            degradation_tolerance_bits: 2.0,
        }
    }

    /// Validates that both tolerances are finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("noise_tolerance_bits", self.noise_tolerance_bits),
            ("degradation_tolerance_bits", self.degradation_tolerance_bits),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }

    /// Checks an estimate against data of nominal `bit_depth`.
    pub fn check(&self, estimate: &EntropyEstimate, bit_depth: u32) -> Result<(), ResolutionAnomaly> {
        if !is_valid_bit_depth(bit_depth) {
            return Err(ResolutionAnomaly::InvalidBitDepth(bit_depth));
        }

        let expected = expected_unique_entropy(bit_depth, estimate.total_count());
        self.compare(estimate.unique_entropy(), expected)
    }

    /// Compares observed against expected unique entropy, in bits.
    pub(crate) fn compare(&self, observed: f64, expected: f64) -> Result<(), ResolutionAnomaly> {
        if observed - expected > self.noise_tolerance_bits {
            return Err(ResolutionAnomaly::NoiseInflated {
                observed,
                expected,
                excess_bits: observed - expected,
            });
        }

        if expected - observed > self.degradation_tolerance_bits {
            return Err(ResolutionAnomaly::Degraded {
                observed,
                expected,
                missing_bits: expected - observed,
            });
        }

        Ok(())
    }
}

/// Resolution anomaly types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolutionAnomaly {
    #[error("unique entropy {observed:.2} exceeds expected {expected:.2} by {excess_bits:.2} bits (added noise)")]
    NoiseInflated {
        observed: f64,
        expected: f64,
        excess_bits: f64,
    },

    #[error("unique entropy {observed:.2} is {missing_bits:.2} bits below expected {expected:.2} (filtered, quantized, or lossy)")]
    Degraded {
        observed: f64,
        expected: f64,
        missing_bits: f64,
    },

    #[error("bit depth {0} outside 1..=64")]
    InvalidBitDepth(u32),
}

impl ResolutionAnomaly {
    /// Short machine-readable name, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolutionAnomaly::NoiseInflated { .. } => "noise_inflated",
            ResolutionAnomaly::Degraded { .. } => "degraded",
            ResolutionAnomaly::InvalidBitDepth(_) => "invalid_bit_depth",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::estimate;

    fn byte_ramp(repeats: usize) -> Vec<u8> {
        (0..256 * repeats).map(|i| (i % 256) as u8).collect()
    }

    #[test]
    fn test_clean_data_passes() {
        let thresholds = ResolutionThresholds::default();
        let est = estimate(&byte_ramp(40)).unwrap();

        assert!(thresholds.check(&est, 8).is_ok());
    }

    #[test]
    fn test_noisy_data_flagged() {
        let thresholds = ResolutionThresholds::default();

        // Every sample distinct: far more than 8 bits
        let data: Vec<f64> = (0..4096).map(|i| (i % 256) as f64 + i as f64 * 1e-6).collect();
        let est = estimate(&data).unwrap();

        assert!(matches!(
            thresholds.check(&est, 8),
            Err(ResolutionAnomaly::NoiseInflated { .. })
        ));
    }

    #[test]
    fn test_quantized_data_flagged() {
        let thresholds = ResolutionThresholds::default();

        // 8-bit nominal, only 16 levels used
        let data: Vec<u8> = byte_ramp(40).into_iter().map(|b| b & 0xF0).collect();
        let est = estimate(&data).unwrap();

        let err = thresholds.check(&est, 8).unwrap_err();
        match err {
            ResolutionAnomaly::Degraded { missing_bits, .. } => {
                assert!((missing_bits - 4.0).abs() < 0.01)
            }
            other => panic!("unexpected anomaly: {}", other),
        }
    }

    #[test]
    fn test_invalid_bit_depth() {
        let thresholds = ResolutionThresholds::default();
        let est = estimate(&[1u8, 2, 3]).unwrap();

        assert_eq!(
            thresholds.check(&est, 0),
            Err(ResolutionAnomaly::InvalidBitDepth(0))
        );
        assert_eq!(
            thresholds.check(&est, 65),
            Err(ResolutionAnomaly::InvalidBitDepth(65))
        );
    }

    #[test]
    fn test_negative_tolerance_invalid() {
        let thresholds = ResolutionThresholds {
            noise_tolerance_bits: -1.0,
            ..Default::default()
        };
        assert_eq!(
            thresholds.validate(),
            Err(ConfigError::InvalidTolerance {
                name: "noise_tolerance_bits",
                value: -1.0,
            })
        );
        assert!(ResolutionThresholds::conservative().validate().is_ok());
    }

    #[test]
    fn test_non_finite_tolerance_invalid() {
        let thresholds = ResolutionThresholds {
            degradation_tolerance_bits: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            thresholds.validate(),
            Err(ConfigError::InvalidTolerance {
                name: "degradation_tolerance_bits",
                ..
            })
        ));
    }
}
