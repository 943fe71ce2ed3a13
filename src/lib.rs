//! # Novedad: Compression-Based Novelty/Redundancy Metrics
//!
//! Novedad computes two scalar metrics — *novelty* and *redundancy* — that
//! characterize how much new information an artifact (an arbitrary byte
//! blob) contributes relative to a baseline (a reference byte blob), using
//! general-purpose compression as a low-cost information-content estimator.
//!
//! ## Pipeline
//!
//! ```text
//! Byte Loader -> Estimator Set -> Metric Aggregator -> Report Assembler
//! ```
//!
//! Each configured estimator (DEFLATE, LZ4, ZSTD) compresses the baseline
//! alone, the artifact alone, and their joint concatenation. The aggregator
//! averages per-estimator novelty and redundancy terms, and the assembler
//! packages the result into a deterministic, content-addressed record.
//!
//! ## Example
//!
//! ```rust
//! use novedad::pipeline::evaluate_bytes;
//!
//! let baseline = b"reference corpus snapshot ".repeat(50);
//! let artifact = b"candidate evidence artifact ".repeat(50);
//!
//! let record = evaluate_bytes(&baseline, &artifact, "example", None)?;
//! println!("novelty = {}", record.metrics().novelty());
//! println!("redundancy = {}", record.metrics().redundancy());
//! # Ok::<(), novedad::Error>(())
//! ```
//!
//! Running the same pair twice yields an identical `metric_id`, metrics,
//! and detail; only the record timestamp differs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod estimator;
pub mod hash;
pub mod metrics;
pub mod pipeline;
pub mod report;

pub use error::{Error, Result};
pub use pipeline::{evaluate, evaluate_bytes, EvalConfig};
pub use report::MetricRecord;
