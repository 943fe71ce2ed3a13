//! Report Assembler — deterministic, content-addressed metric records
//!
//! Wraps the aggregated metrics together with content hashes of both inputs
//! and the declared producer/intent into one immutable record. Every field
//! except `timestamp` is a pure function of the inputs, so repeated runs on
//! identical blobs serialize byte-identically apart from the timestamp.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::hash;
use crate::metrics::{EstimatorSet, MetricSummary};
use crate::Result;

/// Metric record schema version.
pub const SCHEMA_VERSION: u32 = 0;

/// Stable pipeline name carried in every record; downstream tooling keys on
/// this value.
pub const MODULE_NAME: &str = "compression-commons";

/// ISO-8601 UTC with second precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Descriptor of the evaluated artifact.
///
/// `artifact_id` and `content_hash` carry the same digest under two field
/// names for downstream-schema compatibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactDescriptor {
    artifact_id: String,
    content_hash: String,
    producer: String,
    volume: f64,
    declared_intent: Option<String>,
}

impl ArtifactDescriptor {
    /// Get the artifact identifier (content digest).
    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// Get the content hash (same digest as `artifact_id`).
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Get the declared producer label.
    #[must_use]
    pub fn producer(&self) -> &str {
        &self.producer
    }

    /// Get the artifact length in bytes, as a real number.
    #[must_use]
    pub const fn volume(&self) -> f64 {
        self.volume
    }

    /// Get the declared intent, if one was supplied.
    #[must_use]
    pub fn declared_intent(&self) -> Option<&str> {
        self.declared_intent.as_deref()
    }
}

/// Descriptor of the baseline the artifact was compared against.
///
/// `snapshot_id` and `corpus_root_hash` carry the same digest under two
/// field names for downstream-schema compatibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaselineDescriptor {
    snapshot_id: String,
    corpus_root_hash: String,
}

impl BaselineDescriptor {
    /// Get the baseline snapshot identifier (content digest).
    #[must_use]
    pub fn snapshot_id(&self) -> &str {
        &self.snapshot_id
    }

    /// Get the corpus root hash (same digest as `snapshot_id`).
    #[must_use]
    pub fn corpus_root_hash(&self) -> &str {
        &self.corpus_root_hash
    }
}

/// Metrics block: the deterministic identifier, both aggregates, and the
/// full estimator-set detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsBlock {
    metric_id: String,
    novelty: f64,
    redundancy: f64,
    estimator_set: EstimatorSet,
}

impl MetricsBlock {
    /// Get the metric identifier, a pure function of the two content hashes.
    #[must_use]
    pub fn metric_id(&self) -> &str {
        &self.metric_id
    }

    /// Get the aggregate novelty.
    #[must_use]
    pub const fn novelty(&self) -> f64 {
        self.novelty
    }

    /// Get the aggregate redundancy.
    #[must_use]
    pub const fn redundancy(&self) -> f64 {
        self.redundancy
    }

    /// Get the estimator-set block.
    #[must_use]
    pub const fn estimator_set(&self) -> &EstimatorSet {
        &self.estimator_set
    }
}

/// One complete metric record, the final pipeline output.
///
/// Immutable after construction. Serialize with [`MetricRecord::to_json_pretty`]
/// for the stable key-sorted wire form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRecord {
    version: u32,
    module: String,
    timestamp: String,
    artifact: ArtifactDescriptor,
    baseline: BaselineDescriptor,
    metrics: MetricsBlock,
}

impl MetricRecord {
    /// Create a builder from the two input blobs and the aggregated metrics.
    ///
    /// Producer defaults to `"unknown"`; intent is absent unless set.
    #[must_use]
    pub fn builder(baseline: &[u8], artifact: &[u8], summary: MetricSummary) -> MetricRecordBuilder {
        MetricRecordBuilder::new(baseline, artifact, summary)
    }

    /// Get the schema version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Get the pipeline module name.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Get the record timestamp (informational only).
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Get the artifact descriptor.
    #[must_use]
    pub const fn artifact(&self) -> &ArtifactDescriptor {
        &self.artifact
    }

    /// Get the baseline descriptor.
    #[must_use]
    pub const fn baseline(&self) -> &BaselineDescriptor {
        &self.baseline
    }

    /// Get the metrics block.
    #[must_use]
    pub const fn metrics(&self) -> &MetricsBlock {
        &self.metrics
    }

    /// Serialize as indented, key-sorted JSON.
    ///
    /// Sorting comes from routing through `serde_json::Value`, whose object
    /// representation orders keys, so unchanged inputs diff cleanly across
    /// runs.
    ///
    /// # Errors
    /// Returns [`crate::Error::Serialize`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

/// Builder for `MetricRecord`.
#[derive(Debug)]
pub struct MetricRecordBuilder {
    baseline_hash: String,
    artifact_hash: String,
    volume: f64,
    summary: MetricSummary,
    producer: String,
    intent: Option<String>,
}

impl MetricRecordBuilder {
    /// Create a new builder; content hashes are computed here so the blobs
    /// need not outlive the builder.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(baseline: &[u8], artifact: &[u8], summary: MetricSummary) -> Self {
        Self {
            baseline_hash: hash::content_hash(baseline),
            artifact_hash: hash::content_hash(artifact),
            volume: artifact.len() as f64,
            summary,
            producer: "unknown".to_string(),
            intent: None,
        }
    }

    /// Set the declared producer label.
    #[must_use]
    pub fn producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    /// Set the declared intent.
    #[must_use]
    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    /// Build the `MetricRecord`, stamping the current UTC time.
    #[must_use]
    pub fn build(self) -> MetricRecord {
        let metric_id = hash::metric_id(&self.baseline_hash, &self.artifact_hash);
        let novelty = self.summary.novelty();
        let redundancy = self.summary.redundancy();

        MetricRecord {
            version: SCHEMA_VERSION,
            module: MODULE_NAME.to_string(),
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            artifact: ArtifactDescriptor {
                artifact_id: self.artifact_hash.clone(),
                content_hash: self.artifact_hash,
                producer: self.producer,
                volume: self.volume,
                declared_intent: self.intent,
            },
            baseline: BaselineDescriptor {
                snapshot_id: self.baseline_hash.clone(),
                corpus_root_hash: self.baseline_hash,
            },
            metrics: MetricsBlock {
                metric_id,
                novelty,
                redundancy,
                estimator_set: self.summary.into_estimator_set(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::SizeTriple;
    use crate::metrics::aggregate;

    fn summary() -> MetricSummary {
        let triples = vec![(
            "zstd",
            SizeTriple {
                baseline: 10,
                artifact: 12,
                joint: 15,
            },
        )];
        aggregate(&triples, 24)
    }

    #[test]
    fn test_builder_defaults() {
        let record = MetricRecord::builder(b"baseline", b"artifact", summary()).build();

        assert_eq!(record.version(), SCHEMA_VERSION);
        assert_eq!(record.module(), MODULE_NAME);
        assert_eq!(record.artifact().producer(), "unknown");
        assert!(record.artifact().declared_intent().is_none());
    }

    #[test]
    fn test_dual_field_names_carry_same_digest() {
        let record = MetricRecord::builder(b"baseline", b"artifact", summary()).build();

        assert_eq!(record.artifact().artifact_id(), record.artifact().content_hash());
        assert_eq!(
            record.baseline().snapshot_id(),
            record.baseline().corpus_root_hash()
        );
        assert_ne!(record.artifact().artifact_id(), record.baseline().snapshot_id());
    }

    #[test]
    fn test_volume_is_artifact_length() {
        let record = MetricRecord::builder(b"baseline", b"four", summary()).build();
        assert!((record.artifact().volume() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metric_id_ignores_producer_and_intent() {
        let a = MetricRecord::builder(b"b", b"x", summary())
            .producer("alpha")
            .build();
        let b = MetricRecord::builder(b"b", b"x", summary())
            .producer("beta")
            .intent("totally different intent")
            .build();

        assert_eq!(a.metrics().metric_id(), b.metrics().metric_id());
    }

    #[test]
    fn test_timestamp_is_iso8601_utc_seconds() {
        let record = MetricRecord::builder(b"b", b"x", summary()).build();
        let ts = record.timestamp();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
    }

    #[test]
    fn test_json_keys_sorted_and_nested() {
        let record = MetricRecord::builder(b"b", b"x", summary())
            .intent("audit")
            .build();
        let json = record.to_json_pretty().unwrap();

        // Top-level keys appear in sorted order in the pretty output
        let artifact_pos = json.find("\"artifact\"").unwrap();
        let baseline_pos = json.find("\"baseline\"").unwrap();
        let metrics_pos = json.find("\"metrics\"").unwrap();
        let version_pos = json.find("\"version\"").unwrap();
        assert!(artifact_pos < baseline_pos);
        assert!(baseline_pos < metrics_pos);
        assert!(metrics_pos < version_pos);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["artifact"]["declared_intent"], "audit");
        assert_eq!(value["version"], 0);
    }

    #[test]
    fn test_absent_intent_serializes_as_null() {
        let record = MetricRecord::builder(b"b", b"x", summary()).build();
        let value: serde_json::Value =
            serde_json::from_str(&record.to_json_pretty().unwrap()).unwrap();
        assert!(value["artifact"]["declared_intent"].is_null());
    }
}
