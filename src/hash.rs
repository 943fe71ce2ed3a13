//! Content addressing for byte blobs
//!
//! Blobs are identified by their hex-encoded SHA-256 digest. The metric
//! identifier is itself a digest over the two blob digests, making it a
//! pure function of (baseline, artifact) content — independent of producer
//! metadata and wall-clock time.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of a byte blob.
#[must_use]
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Deterministic metric identifier for a (baseline, artifact) pair.
///
/// Digest of the UTF-8 concatenation of the baseline digest hex string and
/// the artifact digest hex string, in that order.
#[must_use]
pub fn metric_id(baseline_hash: &str, artifact_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(baseline_hash.as_bytes());
    hasher.update(artifact_hash.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_empty_blob() {
        // SHA-256 of the empty input
        assert_eq!(
            content_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_content_hash_deterministic() {
        assert_eq!(content_hash(b"abc"), content_hash(b"abc"));
        assert_ne!(content_hash(b"abc"), content_hash(b"abd"));
    }

    #[test]
    fn test_metric_id_pure_function_of_hashes() {
        let b = content_hash(b"baseline");
        let x = content_hash(b"artifact");
        assert_eq!(metric_id(&b, &x), metric_id(&b, &x));
    }

    #[test]
    fn test_metric_id_order_sensitive() {
        let b = content_hash(b"baseline");
        let x = content_hash(b"artifact");
        // Baseline digest comes first; swapping roles changes the identifier
        assert_ne!(metric_id(&b, &x), metric_id(&x, &b));
    }
}
