//! Hash function primitives for the popsign SDK.
//!
//! Provides the SHA-256 digest used to fingerprint request payloads before
//! signing. Payload text is hashed as its UTF-8 bytes; identical payloads
//! always yield identical digests.

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}
