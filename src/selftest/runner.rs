//! Runs the self-test scenarios.

use super::{
    report::SelfTestReport,
    scenario::{Scenario, ScenarioKind, ScenarioResult, SelfTestConfig},
};
use crate::analysis::{Diagnosis, ResolutionAnomaly, ResolutionThresholds};
use crate::config::ConfigError;
use crate::estimator::{estimate, EntropyEstimate, EstimateError, Sample};
use crate::synthesis::{quantize, SampleGenerator, SynthesisError};
use thiserror::Error;

/// Errors that abort a self-test run.
#[derive(Debug, Error)]
pub enum SelfTestError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("data generation failed: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("estimation failed: {0}")]
    Estimate(#[from] EstimateError),
    #[error("analysis failed: {0}")]
    Analysis(#[from] ResolutionAnomaly),
}

/// Generates synthetic datasets and estimates their entropy.
pub struct SelfTest {
    config: SelfTestConfig,
    thresholds: ResolutionThresholds,
    generator: SampleGenerator,
}

impl SelfTest {
    /// Creates a self-test, seeding from the config or the OS.
    pub fn new(config: SelfTestConfig, thresholds: ResolutionThresholds) -> Result<Self, SelfTestError> {
        config.validate()?;
        thresholds.validate()?;

        let generator = match config.seed {
            Some(seed) => SampleGenerator::from_seed(seed),
            None => SampleGenerator::from_os_entropy(),
        };

        Ok(Self {
            config,
            thresholds,
            generator,
        })
    }

    /// Runs every scenario and collects the results.
    ///
    /// Noisy and coarse scenarios are derived from the clean data of the
    /// same bit depth.
    pub fn run(&mut self) -> Result<SelfTestReport, SelfTestError> {
        let samples = self.config.samples;
        let mut results = Vec::new();
        let mut clean: Option<(u32, Vec<u64>)> = None;

        tracing::info!(
            samples,
            bit_depths = ?self.config.bit_depths,
            noise_std_dev = self.config.noise_std_dev,
            "Running self-test"
        );

        for scenario in self.config.scenarios() {
            let bit_depth = scenario.bit_depth;
            let base = match clean.take() {
                Some((depth, data)) if depth == bit_depth && scenario.kind != ScenarioKind::Clean => {
                    data
                }
                _ => self.generator.uniform_integers(bit_depth, samples)?,
            };

            let estimate = match scenario.kind {
                ScenarioKind::Clean => estimate(&base)?,
                ScenarioKind::Noisy => {
                    let noisy = self
                        .generator
                        .add_gaussian_noise(&base, self.config.noise_std_dev)?;
                    estimate(&noisy)?
                }
                ScenarioKind::Coarse { drop_bits } => estimate(&quantize(&base, drop_bits))?,
            };

            clean = Some((bit_depth, base));
            results.push(self.diagnose(scenario, estimate)?);
        }

        Ok(SelfTestReport::new(samples, results))
    }

    fn diagnose(&self, scenario: Scenario, estimate: EntropyEstimate) -> Result<ScenarioResult, SelfTestError> {
        let diagnosis = Diagnosis::evaluate(&estimate, scenario.bit_depth, &self.thresholds)?;

        tracing::info!(
            scenario = %scenario.label(),
            unique_entropy = estimate.unique_entropy(),
            total_entropy = estimate.total_entropy(),
            consistent = diagnosis.is_consistent(),
            "Scenario estimated"
        );

        Ok(ScenarioResult {
            scenario,
            estimate,
            diagnosis,
        })
    }
}

/// Estimates `data` and diagnoses it against `bit_depth` in one step.
pub fn analyze<T: Sample>(
    data: &[T],
    bit_depth: u32,
    thresholds: &ResolutionThresholds,
) -> Result<(EntropyEstimate, Diagnosis), SelfTestError> {
    let estimate = estimate(data)?;
    let diagnosis = Diagnosis::evaluate(&estimate, bit_depth, thresholds)?;
    Ok((estimate, diagnosis))
}
