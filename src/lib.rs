//! Data Entropy Analysis Library
//!
//! Estimates how many bits of distinguishable information a sampled
//! dataset actually carries, compared with the most its sample count
//! could carry. Used as a diagnostic for datasets that may have been
//! degraded by noise, filtering, or lossy compression relative to their
//! nominal bit depth.
//!
//! # Estimate
//!
//! ```text
//! unique_entropy = log2(number of distinct values)
//! total_entropy  = log2(number of samples)
//! ```
//!
//! Values are compared exactly. Continuous noise added to integer data
//! makes almost every value distinct, which is precisely what reveals it.
//!
//! # Reading the result
//!
//! - Clean `b`-bit data saturates near `b` once there are more than `2^b` samples.
//! - Unique entropy above the nominal bit depth means spurious resolution (added noise).
//! - Unique entropy well below the expected value means values collapsed onto
//!   fewer levels (filtering, quantization, lossy compression).
//!
//! # Example
//!
//! ```
//! use data_entropy::{estimate, Diagnosis, ResolutionThresholds};
//!
//! let data: Vec<u8> = (0..=255).cycle().take(4096).collect();
//! let est = estimate(&data).unwrap();
//! assert_eq!(est.unique_entropy(), 8.0);
//! assert_eq!(est.total_entropy(), 12.0);
//!
//! let diagnosis = Diagnosis::evaluate(&est, 8, &ResolutionThresholds::default()).unwrap();
//! assert!(diagnosis.is_consistent());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod estimator;
pub mod metrics;
pub mod selftest;
pub mod synthesis;

// Re-export commonly used types at crate root
pub use analysis::{Diagnosis, ResolutionAnomaly, ResolutionThresholds};
pub use config::{ConfigError, FileConfig};
pub use estimator::{estimate, parse_samples, EntropyEstimate, EstimateError, Numeric, Sample};
pub use selftest::{SelfTest, SelfTestConfig, SelfTestReport};
pub use synthesis::SampleGenerator;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
