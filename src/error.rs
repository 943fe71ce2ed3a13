//! Error types for Novedad
//!
//! Every fatal condition aborts the whole evaluation. The output contract
//! promises a complete per-estimator detail, so no partial or degraded
//! record is ever emitted.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Novedad error types
#[derive(Error, Debug)]
pub enum Error {
    /// An input blob could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the unreadable input
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A configured estimator failed on valid byte input
    #[error("estimator '{name}' failed: {detail}\nEstimators may not drop out silently; fix the estimator configuration and re-run.")]
    Estimator {
        /// Name of the failing estimator
        name: &'static str,
        /// Codec error detail
        detail: String,
    },

    /// Metric record serialization failed
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
