//! Prometheus metrics for entropy estimates.
//!
//! # Metrics Exposed
//!
//! - `data_entropy_unique_entropy_bits{scenario}` - log2 of the distinct value count
//! - `data_entropy_total_entropy_bits{scenario}` - log2 of the sample count
//! - `data_entropy_distinct_values{scenario}` - distinct value count
//! - `data_entropy_estimates_total` - estimates recorded
//! - `data_entropy_anomalies_total{kind}` - resolution anomalies, by kind
//!
//! # Example
//!
//! ```
//! use data_entropy::{estimate, metrics::MetricsRegistry};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! let est = estimate(&[0u8, 1, 2, 3]).unwrap();
//! registry.record("example", &est, None);
//!
//! let text = registry.encode().unwrap();
//! assert!(text.contains("data_entropy_estimates_total 1"));
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry};
