//! Synthetic sample generation for the self-test harness.

mod generator;

pub use generator::{quantize, SampleGenerator, SynthesisError};
