//! Unique-value and total entropy of a sample collection.

use super::sample::{Numeric, Sample, SampleError};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors returned by [`estimate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("cannot estimate entropy of an empty sample collection")]
    Empty,
    #[error("invalid sample at index {index}: {reason}")]
    InvalidInput { index: usize, reason: SampleError },
}

/// Resolution of a sample collection, in bits.
///
/// `unique_entropy` is the base-2 logarithm of the number of distinct
/// values and `total_entropy` the base-2 logarithm of the number of
/// samples. The first never exceeds the second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntropyEstimate {
    unique_entropy: f64,
    total_entropy: f64,
    distinct_count: usize,
    total_count: usize,
}

impl EntropyEstimate {
    /// Builds an estimate from raw counts.
    ///
    /// Both counts must be non-zero and `distinct_count <= total_count`.
    pub(crate) fn from_counts(distinct_count: usize, total_count: usize) -> Self {
        debug_assert!(distinct_count >= 1 && distinct_count <= total_count);
        Self {
            unique_entropy: (distinct_count as f64).log2(),
            total_entropy: (total_count as f64).log2(),
            distinct_count,
            total_count,
        }
    }

    /// Bits of resolution actually present in the data.
    #[inline]
    pub fn unique_entropy(&self) -> f64 {
        self.unique_entropy
    }

    /// Bits of resolution the sample count could carry at most.
    #[inline]
    pub fn total_entropy(&self) -> f64 {
        self.total_entropy
    }

    /// Number of distinct values observed.
    #[inline]
    pub fn distinct_count(&self) -> usize {
        self.distinct_count
    }

    /// Number of samples.
    #[inline]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Bits lost to repeated values (`total - unique`).
    pub fn redundancy_bits(&self) -> f64 {
        (self.total_entropy - self.unique_entropy).max(0.0)
    }
}

impl fmt::Display for EntropyEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} / {:.1}", self.unique_entropy, self.total_entropy)
    }
}

/// Estimates the unique and total entropy of `data`.
///
/// Distinct values are counted with exact equality. Fails on empty input
/// and on the first non-finite sample.
pub fn estimate<T: Sample>(data: &[T]) -> Result<EntropyEstimate, EstimateError> {
    if data.is_empty() {
        return Err(EstimateError::Empty);
    }

    let mut distinct = HashSet::with_capacity(data.len());
    for (index, &sample) in data.iter().enumerate() {
        let key = sample
            .key()
            .map_err(|reason| EstimateError::InvalidInput { index, reason })?;
        distinct.insert(key);
    }

    let estimate = EntropyEstimate::from_counts(distinct.len(), data.len());

    tracing::debug!(
        distinct = estimate.distinct_count,
        total = estimate.total_count,
        unique_entropy = estimate.unique_entropy,
        total_entropy = estimate.total_entropy,
        "Estimated data entropy"
    );

    Ok(estimate)
}

/// Parses textual samples, reporting the index of the first bad token.
pub fn parse_samples<I, S>(tokens: I) -> Result<Vec<Numeric>, EstimateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .enumerate()
        .map(|(index, token)| {
            Numeric::parse(token.as_ref())
                .map_err(|reason| EstimateError::InvalidInput { index, reason })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_rejected() {
        let data: [u8; 0] = [];
        assert_eq!(estimate(&data), Err(EstimateError::Empty));
    }

    #[test]
    fn test_single_element_is_zero() {
        let est = estimate(&[42u16]).unwrap();
        assert_eq!(est.unique_entropy(), 0.0);
        assert_eq!(est.total_entropy(), 0.0);
    }

    #[test]
    fn test_all_distinct() {
        let data: Vec<u32> = (0..1024).collect();
        let est = estimate(&data).unwrap();
        assert!((est.unique_entropy() - 10.0).abs() < EPS);
        assert!((est.total_entropy() - 10.0).abs() < EPS);
        assert_eq!(est.redundancy_bits(), 0.0);
    }

    #[test]
    fn test_duplicates_reduce_unique_entropy() {
        // 4 distinct values, 16 samples
        let data: Vec<i32> = (0..16).map(|i| i % 4).collect();
        let est = estimate(&data).unwrap();
        assert_eq!(est.distinct_count(), 4);
        assert!((est.unique_entropy() - 2.0).abs() < EPS);
        assert!((est.total_entropy() - 4.0).abs() < EPS);
        assert!((est.redundancy_bits() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_non_power_of_two_counts() {
        let data = [1.5f64, 2.5, 1.5];
        let est = estimate(&data).unwrap();
        assert!((est.unique_entropy() - 1.0).abs() < EPS);
        assert!((est.total_entropy() - 3f64.ln() / 2f64.ln()).abs() < EPS);
    }

    #[test]
    fn test_nan_reports_index() {
        let data = [1.0f64, 2.0, f64::NAN, 4.0];
        assert_eq!(
            estimate(&data),
            Err(EstimateError::InvalidInput {
                index: 2,
                reason: SampleError::NonFinite,
            })
        );
    }

    #[test]
    fn test_parse_then_estimate() {
        let samples = parse_samples(["1", "2", "2.0", "2.5"]).unwrap();
        let est = estimate(&samples).unwrap();
        // "2" and "2.0" are the same value
        assert_eq!(est.distinct_count(), 3);
        assert_eq!(est.total_count(), 4);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = parse_samples(["1", "two", "3"]).unwrap_err();
        assert_eq!(
            err,
            EstimateError::InvalidInput {
                index: 1,
                reason: SampleError::NotNumeric("two".to_string()),
            }
        );
    }

    #[test]
    fn test_display_one_decimal() {
        let data: Vec<u8> = (0..=255).collect();
        let est = estimate(&data).unwrap();
        assert_eq!(est.to_string(), "8.0 / 8.0");
    }
}
