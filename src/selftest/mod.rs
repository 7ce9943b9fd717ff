//! Demonstration and self-check harness.
//!
//! Draws uniform integers at each configured bit depth, derives noisy
//! (and optionally coarse) variants, and estimates all of them. Clean
//! data saturates at its bit depth; noise pushes unique entropy towards
//! the sample-count ceiling; coarse quantization pulls it below.

mod report;
mod runner;
mod scenario;

pub use report::SelfTestReport;
pub use runner::{analyze, SelfTest, SelfTestError};
pub use scenario::{Scenario, ScenarioKind, ScenarioResult, SelfTestConfig};
