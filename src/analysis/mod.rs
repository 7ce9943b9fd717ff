//! Resolution analysis.
//!
//! Interprets an [`EntropyEstimate`](crate::estimator::EntropyEstimate)
//! against a nominal bit depth. These are diagnostics, not proofs: the
//! reference model assumes uniformly distributed clean data.

mod diagnosis;
mod expected;
mod threshold;

pub use diagnosis::Diagnosis;
pub use expected::{expected_distinct_count, expected_unique_entropy, is_valid_bit_depth, MAX_BIT_DEPTH};
pub use threshold::{ResolutionAnomaly, ResolutionThresholds};
