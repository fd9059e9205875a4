//! NIST P-256 private key for request signing.
//!
//! Wraps a p256 signing key and adds hex serialization, public key
//! derivation, and deterministic ECDSA signing.

use p256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A P-256 private key for signing.
///
/// Wraps a p256 `SigningKey` and provides hex serialization, public key
/// derivation, and RFC 6979 deterministic ECDSA signing.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    /// The underlying p256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key from the OS random number generator.
    ///
    /// Fresh entropy is drawn on every call; candidate bytes that do not form
    /// a valid scalar (zero, or not below the curve order) are discarded and
    /// redrawn.
    ///
    /// # Returns
    /// A new `PrivateKey`, or `RandomnessUnavailable` if the OS random
    /// source cannot be read.
    pub fn generate() -> Result<Self, PrimitivesError> {
        let mut candidate = [0u8; PRIVATE_KEY_BYTES_LEN];
        loop {
            OsRng
                .try_fill_bytes(&mut candidate)
                .map_err(|e| PrimitivesError::RandomnessUnavailable(e.to_string()))?;
            let parsed = SigningKey::from_bytes(p256::FieldBytes::from_slice(&candidate));
            candidate.zeroize();
            if let Ok(signing_key) = parsed {
                return Ok(PrivateKey { inner: signing_key });
            }
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on P-256,
    /// or an error if the scalar is zero or out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_bytes(p256::FieldBytes::from_slice(bytes))
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a hexadecimal string.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string representing the 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the hex is invalid or the
    /// scalar is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes =
            hex::decode(hex_str).map_err(|e| PrimitivesError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a 64-character hex string, zero-padded.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key for this private key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key())
    }

    /// Sign a message hash using deterministic RFC 6979 nonces.
    ///
    /// The input should be a pre-computed hash (typically 32 bytes).
    /// Produces a low-S normalized signature.
    ///
    /// # Arguments
    /// * `hash` - The message hash to sign.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if signing fails.
    pub fn sign(&self, hash: &[u8]) -> Result<Signature, PrimitivesError> {
        Signature::sign(hash, self)
    }

    /// Access the underlying p256 `SigningKey`.
    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        // Overwrite the scalar's byte representation with zeros.
        let mut bytes = self.inner.to_bytes();
        bytes.zeroize();
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 6979 A.2.5 test key and its compressed public point.
    const RFC6979_KEY_HEX: &str =
        "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721";
    const RFC6979_PUB_HEX: &str =
        "0360fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6";

    #[test]
    fn test_public_key_derivation_known_answer() {
        let priv_key = PrivateKey::from_hex(RFC6979_KEY_HEX).unwrap();
        assert_eq!(priv_key.pub_key().to_hex(), RFC6979_PUB_HEX);
    }

    #[test]
    fn test_scalar_one_derives_generator() {
        // The public key of scalar 1 is the generator point itself.
        let priv_key = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert_eq!(
            priv_key.pub_key().to_hex(),
            "036b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
        );
    }

    #[test]
    fn test_private_key_serialization_and_deserialization() {
        let pk = PrivateKey::generate().unwrap();

        // bytes round-trip
        let serialized = pk.to_bytes();
        let deserialized = PrivateKey::from_bytes(&serialized).unwrap();
        assert_eq!(pk, deserialized);

        // hex round-trip, fixed width
        let hex_str = pk.to_hex();
        assert_eq!(hex_str.len(), 64);
        let deserialized = PrivateKey::from_hex(&hex_str).unwrap();
        assert_eq!(pk, deserialized);
    }

    #[test]
    fn test_generate_is_independent() {
        let a = PrivateKey::generate().unwrap();
        let b = PrivateKey::generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_private_key_from_invalid_hex() {
        assert!(PrivateKey::from_hex("").is_err());
        assert!(PrivateKey::from_hex("zz").is_err());
        // wrong length
        assert!(PrivateKey::from_hex("abcd").is_err());
    }

    #[test]
    fn test_private_key_rejects_invalid_scalars() {
        // zero scalar
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
        // >= curve order
        assert!(PrivateKey::from_bytes(&[0xff; 32]).is_err());
    }

    #[test]
    fn test_sign_and_verify() {
        let priv_key = PrivateKey::from_hex(RFC6979_KEY_HEX).unwrap();
        let hash = crate::hash::sha256(b"request payload");
        let sig = priv_key.sign(&hash).unwrap();
        assert!(priv_key.pub_key().verify(&hash, &sig));
    }
}
