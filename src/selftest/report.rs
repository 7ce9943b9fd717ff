//! Console report of a self-test run.

use super::scenario::ScenarioResult;
use std::fmt;

/// Width labels are dot-padded to.
const LABEL_WIDTH: usize = 20;

/// Results of a self-test run.
#[derive(Debug, Clone)]
pub struct SelfTestReport {
    samples: usize,
    results: Vec<ScenarioResult>,
}

impl SelfTestReport {
    pub(crate) fn new(samples: usize, results: Vec<ScenarioResult>) -> Self {
        Self { samples, results }
    }

    /// Samples per scenario.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Per-scenario results, in run order.
    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    /// Results whose diagnosis found an anomaly.
    pub fn anomalies(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| !r.diagnosis.is_consistent())
    }

    /// Renders the report, one line per scenario:
    ///
    /// ```text
    /// N samples........... 10000
    /// 8 bit data clean.... 8.0 / 13.3
    /// 8 bit data noisy.... 13.3 / 13.3
    /// ```
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.results.len() + 1);
        lines.push(format!("{:.<width$} {}", "N samples", self.samples, width = LABEL_WIDTH));

        for result in &self.results {
            lines.push(format!(
                "{:.<width$} {}",
                result.scenario.label(),
                result.estimate,
                width = LABEL_WIDTH
            ));
        }

        lines.join("\n")
    }

    /// Renders one diagnosis line per scenario.
    pub fn render_diagnoses(&self) -> String {
        self.results
            .iter()
            .map(|r| format!("{}: {}", r.scenario.label(), r.diagnosis))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
