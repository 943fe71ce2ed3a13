//! Metric Aggregator — novelty and redundancy from compressed-size triples
//!
//! Per estimator, the novelty term is the compression-distance expression
//! `c(B) + c(X) - c(B||X)` and the redundancy term is the inverse realized
//! compression ratio of the artifact alone. Aggregates are arithmetic means
//! over all configured estimators, so they are order-independent.
//!
//! The `detail` map is keyed by estimator name in canonical sorted order and
//! always contains exactly one entry per configured estimator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::estimator::SizeTriple;

/// Numerical floor for the redundancy ratio.
///
/// Guards the division when the artifact compresses to (near) nothing.
/// Tunable constant, not a semantic parameter: together with the
/// `max(1, len)` denominator guard it only affects the degenerate
/// empty-artifact case, which must stay finite rather than error.
pub const REDUNDANCY_FLOOR: f64 = 1e-12;

/// Static textual definition of both metrics, carried in every record for
/// downstream auditors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricDefinitions {
    novelty: String,
    redundancy: String,
}

impl MetricDefinitions {
    fn new() -> Self {
        Self {
            novelty: "avg(|C(B)| + |C(X)| - |C(B+X)|) over compressors".to_string(),
            redundancy: "avg(1/(|C(X)|/|X|)) over compressors".to_string(),
        }
    }

    /// Get the novelty definition text.
    #[must_use]
    pub fn novelty(&self) -> &str {
        &self.novelty
    }

    /// Get the redundancy definition text.
    #[must_use]
    pub fn redundancy(&self) -> &str {
        &self.redundancy
    }
}

impl Default for MetricDefinitions {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-estimator breakdown: the three raw compressed sizes plus the two
/// computed terms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EstimatorDetail {
    compressed_baseline: u64,
    compressed_artifact: u64,
    compressed_concat: u64,
    novelty_term: i64,
    redundancy_term: f64,
}

impl EstimatorDetail {
    /// Get the compressed size of the baseline alone.
    #[must_use]
    pub const fn compressed_baseline(&self) -> u64 {
        self.compressed_baseline
    }

    /// Get the compressed size of the artifact alone.
    #[must_use]
    pub const fn compressed_artifact(&self) -> u64 {
        self.compressed_artifact
    }

    /// Get the compressed size of the joint concatenation.
    #[must_use]
    pub const fn compressed_concat(&self) -> u64 {
        self.compressed_concat
    }

    /// Get the novelty term (may be negative within codec overhead).
    #[must_use]
    pub const fn novelty_term(&self) -> i64 {
        self.novelty_term
    }

    /// Get the redundancy term.
    #[must_use]
    pub const fn redundancy_term(&self) -> f64 {
        self.redundancy_term
    }
}

/// Full estimator-set block of a metric record: the configured estimator
/// names, the per-estimator detail, and the metric definitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimatorSet {
    estimators: Vec<String>,
    detail: BTreeMap<String, EstimatorDetail>,
    definition: MetricDefinitions,
}

impl EstimatorSet {
    /// Get the configured estimator names, in canonical order.
    #[must_use]
    pub fn estimators(&self) -> &[String] {
        &self.estimators
    }

    /// Get the per-estimator detail, keyed by estimator name.
    #[must_use]
    pub const fn detail(&self) -> &BTreeMap<String, EstimatorDetail> {
        &self.detail
    }

    /// Get the metric definitions.
    #[must_use]
    pub const fn definition(&self) -> &MetricDefinitions {
        &self.definition
    }
}

/// Aggregated metric outputs for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    novelty: f64,
    redundancy: f64,
    estimator_set: EstimatorSet,
}

impl MetricSummary {
    /// Get the aggregate novelty (mean of per-estimator terms).
    #[must_use]
    pub const fn novelty(&self) -> f64 {
        self.novelty
    }

    /// Get the aggregate redundancy (mean of per-estimator terms).
    #[must_use]
    pub const fn redundancy(&self) -> f64 {
        self.redundancy
    }

    /// Get the estimator-set block.
    #[must_use]
    pub const fn estimator_set(&self) -> &EstimatorSet {
        &self.estimator_set
    }

    /// Consume the summary, yielding the estimator-set block.
    #[must_use]
    pub fn into_estimator_set(self) -> EstimatorSet {
        self.estimator_set
    }
}

/// Aggregate per-estimator size triples into novelty and redundancy.
///
/// `artifact_len` is the raw artifact byte length used in the redundancy
/// denominator. An empty artifact is not an error: the `max(1, len)` guard
/// plus [`REDUNDANCY_FLOOR`] keep the result finite and deterministic.
///
/// No rounding is applied; outputs are plain `f64` means.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn aggregate(triples: &[(&'static str, SizeTriple)], artifact_len: u64) -> MetricSummary {
    let mut detail = BTreeMap::new();
    let mut novelty_sum = 0.0;
    let mut redundancy_sum = 0.0;

    for (name, triple) in triples {
        let novelty_term = triple.baseline as i64 + triple.artifact as i64 - triple.joint as i64;
        let ratio = triple.artifact as f64 / artifact_len.max(1) as f64;
        let redundancy_term = 1.0 / ratio.max(REDUNDANCY_FLOOR);

        novelty_sum += novelty_term as f64;
        redundancy_sum += redundancy_term;

        detail.insert(
            (*name).to_string(),
            EstimatorDetail {
                compressed_baseline: triple.baseline,
                compressed_artifact: triple.artifact,
                compressed_concat: triple.joint,
                novelty_term,
                redundancy_term,
            },
        );
    }

    let count = triples.len().max(1) as f64;
    MetricSummary {
        novelty: novelty_sum / count,
        redundancy: redundancy_sum / count,
        estimator_set: EstimatorSet {
            estimators: triples.iter().map(|(name, _)| (*name).to_string()).collect(),
            detail,
            definition: MetricDefinitions::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn triple(baseline: u64, artifact: u64, joint: u64) -> SizeTriple {
        SizeTriple {
            baseline,
            artifact,
            joint,
        }
    }

    #[test]
    fn test_aggregate_means_over_estimators() {
        let triples = vec![
            ("a", triple(100, 100, 150)),
            ("b", triple(200, 200, 300)),
        ];
        let summary = aggregate(&triples, 1000);

        // Novelty terms: 50 and 100 -> mean 75
        assert!((summary.novelty() - 75.0).abs() < f64::EPSILON);
        // Redundancy terms: 1/(100/1000)=10 and 1/(200/1000)=5 -> mean 7.5
        assert!((summary.redundancy() - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_novelty_term_may_be_negative() {
        // Joint framing overhead can exceed the individual sums on tiny input
        let triples = vec![("a", triple(8, 8, 20))];
        let summary = aggregate(&triples, 4);
        assert_eq!(summary.estimator_set().detail()["a"].novelty_term(), -4);
        assert!((summary.novelty() - (-4.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_artifact_redundancy_is_finite() {
        // len(X) == 0 flows through the max(1, len) guard
        let triples = vec![("a", triple(8, 8, 9))];
        let summary = aggregate(&triples, 0);
        assert!(summary.redundancy().is_finite());
        assert!(!summary.redundancy().is_nan());
        assert!((summary.redundancy() - 0.125).abs() < f64::EPSILON);
    }

    #[test]
    fn test_redundancy_depends_only_on_artifact_sizes() {
        let a = aggregate(&[("a", triple(100, 50, 120))], 500);
        let b = aggregate(&[("a", triple(900, 50, 920))], 500);
        assert!((a.redundancy() - b.redundancy()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_detail_keys_match_estimator_set_sorted() {
        let triples = vec![
            ("deflate", triple(10, 10, 15)),
            ("lz4", triple(11, 11, 16)),
            ("zstd", triple(12, 12, 17)),
        ];
        let summary = aggregate(&triples, 100);
        let set = summary.estimator_set();

        let keys: Vec<&str> = set.detail().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["deflate", "lz4", "zstd"]);
        assert_eq!(set.estimators(), &["deflate", "lz4", "zstd"]);
    }

    #[test]
    fn test_definitions_text_is_stable() {
        let defs = MetricDefinitions::default();
        assert_eq!(
            defs.novelty(),
            "avg(|C(B)| + |C(X)| - |C(B+X)|) over compressors"
        );
        assert_eq!(defs.redundancy(), "avg(1/(|C(X)|/|X|)) over compressors");
    }

    #[test]
    fn test_estimator_set_serializes_detail_fields() {
        let summary = aggregate(&[("zstd", triple(10, 20, 25))], 100);
        let json = serde_json::to_value(summary.estimator_set()).unwrap();

        let entry = &json["detail"]["zstd"];
        assert_eq!(entry["compressed_baseline"], 10);
        assert_eq!(entry["compressed_artifact"], 20);
        assert_eq!(entry["compressed_concat"], 25);
        assert_eq!(entry["novelty_term"], 5);
        assert!(entry["redundancy_term"].is_number());
    }
}
