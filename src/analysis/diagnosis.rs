//! Resolution diagnosis of a single estimate.

use super::{
    expected::{expected_unique_entropy, is_valid_bit_depth},
    threshold::{ResolutionAnomaly, ResolutionThresholds},
};
use crate::estimator::EntropyEstimate;
use std::fmt;

/// Outcome of comparing an estimate with its nominal bit depth.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    /// Nominal bits per sample.
    pub nominal_bits: u32,
    /// Unique entropy expected from clean uniform data.
    pub expected_unique_entropy: f64,
    /// Unique entropy actually observed.
    pub observed_unique_entropy: f64,
    /// Detected anomaly, if any.
    pub anomaly: Option<ResolutionAnomaly>,
}

impl Diagnosis {
    /// Evaluates `estimate` as data of nominal `bit_depth`.
    ///
    /// Only an out-of-range bit depth is an error; resolution anomalies
    /// are recorded in the returned diagnosis.
    pub fn evaluate(
        estimate: &EntropyEstimate,
        bit_depth: u32,
        thresholds: &ResolutionThresholds,
    ) -> Result<Self, ResolutionAnomaly> {
        if !is_valid_bit_depth(bit_depth) {
            return Err(ResolutionAnomaly::InvalidBitDepth(bit_depth));
        }

        let expected = expected_unique_entropy(bit_depth, estimate.total_count());
        let observed = estimate.unique_entropy();
        let anomaly = thresholds.compare(observed, expected).err();

        match &anomaly {
            Some(anomaly) => tracing::warn!(
                bit_depth,
                kind = anomaly.kind(),
                anomaly = %anomaly,
                "Resolution anomaly detected"
            ),
            None => tracing::trace!(bit_depth, "Resolution consistent with bit depth"),
        }

        Ok(Self {
            nominal_bits: bit_depth,
            expected_unique_entropy: expected,
            observed_unique_entropy: observed,
            anomaly,
        })
    }

    /// Returns true if no anomaly was found.
    pub fn is_consistent(&self) -> bool {
        self.anomaly.is_none()
    }

    /// Observed minus expected unique entropy.
    pub fn deviation_bits(&self) -> f64 {
        self.observed_unique_entropy - self.expected_unique_entropy
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anomaly {
            None => write!(
                f,
                "consistent with {}-bit data (expected {:.2}, observed {:.2})",
                self.nominal_bits, self.expected_unique_entropy, self.observed_unique_entropy
            ),
            Some(anomaly) => write!(f, "{}", anomaly),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::estimate;

    #[test]
    fn test_consistent_data() {
        let data: Vec<u16> = (0..4096).collect();
        let est = estimate(&data).unwrap();

        // 4096 distinct 16-bit values is plausible clean data
        let diagnosis = Diagnosis::evaluate(&est, 16, &ResolutionThresholds::default()).unwrap();
        assert!(diagnosis.is_consistent());
        assert!(diagnosis.to_string().starts_with("consistent with 16-bit data"));
    }

    #[test]
    fn test_records_anomaly() {
        let data = vec![7u8; 1000];
        let est = estimate(&data).unwrap();

        let diagnosis = Diagnosis::evaluate(&est, 8, &ResolutionThresholds::default()).unwrap();
        assert!(!diagnosis.is_consistent());
        assert!(diagnosis.deviation_bits() < -7.9);
        assert_eq!(diagnosis.anomaly.as_ref().map(|a| a.kind()), Some("degraded"));
    }

    #[test]
    fn test_agrees_with_threshold_check() {
        let thresholds = ResolutionThresholds::default();
        let data: Vec<u64> = (0..3000).map(|i| (i * 7) % 300).collect();
        let est = estimate(&data).unwrap();

        for bit_depth in [4, 8, 9, 16] {
            let diagnosis = Diagnosis::evaluate(&est, bit_depth, &thresholds).unwrap();
            assert_eq!(
                diagnosis.expected_unique_entropy,
                expected_unique_entropy(bit_depth, est.total_count())
            );
            assert_eq!(diagnosis.anomaly, thresholds.check(&est, bit_depth).err());
        }
    }

    #[test]
    fn test_invalid_bit_depth_is_error() {
        let est = estimate(&[1u8]).unwrap();
        assert!(Diagnosis::evaluate(&est, 0, &ResolutionThresholds::default()).is_err());
    }
}
