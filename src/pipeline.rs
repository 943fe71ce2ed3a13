//! End-to-end evaluation pipeline
//!
//! Strictly linear: load both blobs, verify the estimator set, measure,
//! aggregate, assemble. Single-threaded and synchronous; each invocation is
//! independent and stateless, with all configuration passed explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::estimator::{self, DEFAULT_ESTIMATORS};
use crate::metrics;
use crate::report::MetricRecord;
use crate::{Error, Result};

/// Configuration for one evaluation.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Path of the artifact blob being evaluated
    pub artifact: PathBuf,
    /// Path of the baseline blob the artifact is compared against
    pub baseline: PathBuf,
    /// Declared producer label
    pub producer: String,
    /// Declared intent; absent when not supplied
    pub intent: Option<String>,
}

impl EvalConfig {
    /// Create a config with the default producer label and no intent.
    #[must_use]
    pub fn new(artifact: impl Into<PathBuf>, baseline: impl Into<PathBuf>) -> Self {
        Self {
            artifact: artifact.into(),
            baseline: baseline.into(),
            producer: "unknown".to_string(),
            intent: None,
        }
    }

    /// Set the declared producer label.
    #[must_use]
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    /// Set the declared intent.
    #[must_use]
    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }
}

/// Read one input blob fully into memory.
///
/// # Errors
/// Returns [`Error::Io`] carrying the offending path if the blob cannot be
/// read.
pub fn read_blob(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Run the whole pipeline for one (artifact, baseline) pair of files.
///
/// # Errors
/// Returns [`Error::Io`] if either input is unreadable (before any
/// computation), or [`Error::Estimator`] if a configured codec fails.
pub fn evaluate(config: &EvalConfig) -> Result<MetricRecord> {
    let artifact = read_blob(&config.artifact)?;
    let baseline = read_blob(&config.baseline)?;
    debug!(
        artifact = %config.artifact.display(),
        artifact_len = artifact.len(),
        baseline = %config.baseline.display(),
        baseline_len = baseline.len(),
        "loaded input blobs"
    );

    evaluate_bytes(
        &baseline,
        &artifact,
        &config.producer,
        config.intent.as_deref(),
    )
}

/// Run the pipeline over already-resident blobs.
///
/// The estimator set is capability-checked up front so a broken codec fails
/// fast as a configuration error instead of shrinking the set silently.
///
/// # Errors
/// Returns [`Error::Estimator`] if a configured codec fails.
#[allow(clippy::cast_possible_truncation)]
pub fn evaluate_bytes(
    baseline: &[u8],
    artifact: &[u8],
    producer: &str,
    intent: Option<&str>,
) -> Result<MetricRecord> {
    estimator::verify_estimators(&DEFAULT_ESTIMATORS)?;

    let triples = estimator::measure(&DEFAULT_ESTIMATORS, baseline, artifact)?;
    let summary = metrics::aggregate(&triples, artifact.len() as u64);
    debug!(
        novelty = summary.novelty(),
        redundancy = summary.redundancy(),
        "aggregated metrics"
    );

    let mut builder = MetricRecord::builder(baseline, artifact, summary).producer(producer);
    if let Some(intent) = intent {
        builder = builder.intent(intent);
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_blob_missing_path_is_io_error() {
        let err = read_blob(Path::new("/nonexistent/blob.bin")).unwrap_err();
        match err {
            Error::Io { path, .. } => assert!(path.contains("nonexistent")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_eval_config_defaults() {
        let config = EvalConfig::new("a.bin", "b.bin");
        assert_eq!(config.producer, "unknown");
        assert!(config.intent.is_none());
    }

    #[test]
    fn test_eval_config_builders() {
        let config = EvalConfig::new("a.bin", "b.bin")
            .with_producer("pipeline-7")
            .with_intent("regression audit");
        assert_eq!(config.producer, "pipeline-7");
        assert_eq!(config.intent.as_deref(), Some("regression audit"));
    }

    #[test]
    fn test_evaluate_bytes_smoke() {
        let baseline = b"reference corpus snapshot".repeat(20);
        let artifact = b"candidate artifact bytes".repeat(20);

        let record = evaluate_bytes(&baseline, &artifact, "test", None).unwrap();
        assert_eq!(
            record.metrics().estimator_set().detail().len(),
            DEFAULT_ESTIMATORS.len()
        );
        assert!(record.metrics().redundancy() > 0.0);
    }
}
