//! Estimator Set — general-purpose compressors as information-content probes
//!
//! Each estimator is a pure bytes-to-bytes function with a fixed compression
//! level, so compressed sizes are deterministic functions of the estimator
//! and the exact input bytes. The active set is fixed and held in
//! lexicographic order by name, which keeps aggregation and the serialized
//! detail stable across runs.
//!
//! Estimators hold no mutable state. A codec failure on valid input is a
//! fatal configuration error for the whole evaluation: the estimator set is
//! capability-checked up front and may not shrink silently at runtime.

use std::io::Write;

use flate2::write::ZlibEncoder;
use tracing::debug;

use crate::{Error, Result};

/// Separator inserted between baseline and artifact before joint
/// compression, so byte-adjacency artifacts in the codecs are consistent
/// and reproducible.
pub const SEPARATOR: &[u8] = b"\n";

/// The canonical estimator set, in lexicographic order by name.
pub const DEFAULT_ESTIMATORS: [Estimator; 3] =
    [Estimator::Deflate, Estimator::Lz4, Estimator::Zstd];

/// Fixed DEFLATE level (zlib default).
const DEFLATE_LEVEL: u32 = 6;

/// Fixed ZSTD level (ratio/speed balance).
const ZSTD_LEVEL: i32 = 3;

/// A general-purpose lossless compressor used as a practical stand-in for
/// an information-content measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimator {
    /// DEFLATE family (zlib container)
    Deflate,
    /// LZ4 block format with length prefix
    Lz4,
    /// ZSTD
    Zstd,
}

impl Estimator {
    /// Get estimator name as string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deflate => "deflate",
            Self::Lz4 => "lz4",
            Self::Zstd => "zstd",
        }
    }

    /// Compress data with this estimator at its fixed level.
    ///
    /// Empty input is valid and yields the codec's small non-zero framed
    /// size. Output is never required to be smaller than the input;
    /// store-only expansion on incompressible data is fine.
    ///
    /// # Errors
    /// Returns [`Error::Estimator`] if the codec fails on valid input.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Deflate => {
                let mut encoder =
                    ZlibEncoder::new(Vec::new(), flate2::Compression::new(DEFLATE_LEVEL));
                encoder.write_all(data).map_err(|e| Error::Estimator {
                    name: self.as_str(),
                    detail: format!("deflate write failed: {e}"),
                })?;
                encoder.finish().map_err(|e| Error::Estimator {
                    name: self.as_str(),
                    detail: format!("deflate finish failed: {e}"),
                })
            }
            Self::Lz4 => Ok(lz4_flex::compress_prepend_size(data)),
            Self::Zstd => zstd::encode_all(data, ZSTD_LEVEL).map_err(|e| Error::Estimator {
                name: self.as_str(),
                detail: format!("zstd encoding failed: {e}"),
            }),
        }
    }

    /// Compressed size of `data` under this estimator.
    ///
    /// # Errors
    /// Returns [`Error::Estimator`] if the codec fails on valid input.
    pub fn compressed_size(&self, data: &[u8]) -> Result<u64> {
        Ok(self.compress(data)?.len() as u64)
    }
}

/// Compressed sizes of baseline alone, artifact alone, and their joint
/// concatenation under one estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeTriple {
    /// Baseline compressed alone
    pub baseline: u64,
    /// Artifact compressed alone
    pub artifact: u64,
    /// Baseline, separator, artifact compressed together
    pub joint: u64,
}

/// Verify every configured estimator is operational before measurement.
///
/// Probes each codec with a tiny buffer and fails fast with a configuration
/// error, rather than letting the estimator set shrink silently at runtime.
///
/// # Errors
/// Returns [`Error::Estimator`] for the first estimator whose codec fails.
pub fn verify_estimators(estimators: &[Estimator]) -> Result<()> {
    for estimator in estimators {
        estimator.compress(b"probe")?;
    }
    Ok(())
}

/// Measure the compressed-size triple for every configured estimator.
///
/// Returns one entry per estimator, in the order given (the canonical set
/// is already lexicographic). Any codec failure aborts the whole
/// measurement: the output contract promises a complete per-estimator
/// detail.
///
/// # Errors
/// Returns [`Error::Estimator`] if any codec fails on any of the three
/// inputs.
pub fn measure(
    estimators: &[Estimator],
    baseline: &[u8],
    artifact: &[u8],
) -> Result<Vec<(&'static str, SizeTriple)>> {
    let mut joint = Vec::with_capacity(baseline.len() + SEPARATOR.len() + artifact.len());
    joint.extend_from_slice(baseline);
    joint.extend_from_slice(SEPARATOR);
    joint.extend_from_slice(artifact);

    let mut triples = Vec::with_capacity(estimators.len());
    for estimator in estimators {
        let triple = SizeTriple {
            baseline: estimator.compressed_size(baseline)?,
            artifact: estimator.compressed_size(artifact)?,
            joint: estimator.compressed_size(&joint)?,
        };
        debug!(
            estimator = estimator.as_str(),
            baseline = triple.baseline,
            artifact = triple.artifact,
            joint = triple.joint,
            "measured compressed sizes"
        );
        triples.push((estimator.as_str(), triple));
    }
    Ok(triples)
}
