//! Metrics collection and registry.

use crate::analysis::Diagnosis;
use crate::estimator::EntropyEstimate;
use crate::selftest::SelfTestReport;
use prometheus::{Encoder, GaugeVec, IntCounter, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus metrics registry for entropy estimates.
pub struct MetricsRegistry {
    registry: Registry,

    // Per-dataset estimate metrics
    unique_entropy: GaugeVec,
    total_entropy: GaugeVec,
    distinct_values: IntGaugeVec,

    // Totals
    estimates_total: IntCounter,
    anomalies_total: IntCounterVec,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all estimate metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let unique_entropy = GaugeVec::new(
            Opts::new(
                "data_entropy_unique_entropy_bits",
                "log2 of the number of distinct values in the dataset",
            ),
            &["scenario"],
        )?;
        let total_entropy = GaugeVec::new(
            Opts::new(
                "data_entropy_total_entropy_bits",
                "log2 of the number of samples in the dataset",
            ),
            &["scenario"],
        )?;
        let distinct_values = IntGaugeVec::new(
            Opts::new(
                "data_entropy_distinct_values",
                "Number of distinct values in the dataset",
            ),
            &["scenario"],
        )?;
        let estimates_total = IntCounter::new(
            "data_entropy_estimates_total",
            "Total number of entropy estimates recorded",
        )?;
        let anomalies_total = IntCounterVec::new(
            Opts::new(
                "data_entropy_anomalies_total",
                "Total resolution anomalies detected, by kind",
            ),
            &["kind"],
        )?;

        registry.register(Box::new(unique_entropy.clone()))?;
        registry.register(Box::new(total_entropy.clone()))?;
        registry.register(Box::new(distinct_values.clone()))?;
        registry.register(Box::new(estimates_total.clone()))?;
        registry.register(Box::new(anomalies_total.clone()))?;

        Ok(Self {
            registry,
            unique_entropy,
            total_entropy,
            distinct_values,
            estimates_total,
            anomalies_total,
        })
    }

    /// Records one estimate (and its diagnosis, if any) under `label`.
    pub fn record(&self, label: &str, estimate: &EntropyEstimate, diagnosis: Option<&Diagnosis>) {
        self.unique_entropy
            .with_label_values(&[label])
            .set(estimate.unique_entropy());
        self.total_entropy
            .with_label_values(&[label])
            .set(estimate.total_entropy());
        self.distinct_values
            .with_label_values(&[label])
            .set(i64::try_from(estimate.distinct_count()).unwrap_or(i64::MAX));
        self.estimates_total.inc();

        if let Some(anomaly) = diagnosis.and_then(|d| d.anomaly.as_ref()) {
            self.anomalies_total
                .with_label_values(&[anomaly.kind()])
                .inc();
        }
    }

    /// Records every scenario of a self-test report.
    pub fn record_report(&self, report: &SelfTestReport) {
        for result in report.results() {
            self.record(
                &result.scenario.label(),
                &result.estimate,
                Some(&result.diagnosis),
            );
        }
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
