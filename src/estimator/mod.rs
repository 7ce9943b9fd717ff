//! Entropy estimation over numeric samples.
//!
//! The estimate is two numbers: the base-2 logarithm of the count of
//! distinct values and the base-2 logarithm of the sample count. Their
//! relation to the nominal bit depth reveals whether data has been
//! quantized, filtered, compressed, or perturbed by noise.

mod estimate;
mod sample;

pub use estimate::{estimate, parse_samples, EntropyEstimate, EstimateError};
pub use sample::{Numeric, Sample, SampleError, SampleKey};
