//! Request signing, verification, and key-pair minting.
//!
//! A signed request proves possession of a private key: the payload is
//! hashed, the hash is signed with a deterministic low-S ECDSA signature,
//! and the result is wrapped in a transport-encoded envelope together with
//! the signer's public key and scheme identifier.

use popsign_primitives::ec::{PrivateKey, PublicKey, Signature};
use popsign_primitives::hash::sha256;

use crate::envelope::{SignatureEnvelope, SIGNATURE_SCHEME};
use crate::RequestError;

/// A freshly minted P-256 key pair, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// Compressed public key, 66 hex characters.
    pub public_key: String,
    /// Private scalar, 64 hex characters, zero-padded.
    pub private_key: String,
}

/// Untransformed intermediates of a signing call, for diagnostics and
/// test harnesses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SignatureDetails {
    /// Compressed public key embedded in the envelope.
    #[serde(rename = "publicKey")]
    pub public_key: String,
    /// Scheme identifier embedded in the envelope.
    pub scheme: String,
    /// DER-encoded ECDSA signature, hex.
    pub signature: String,
    /// SHA-256 digest of the payload, 64 hex characters.
    #[serde(rename = "payloadHash")]
    pub payload_hash: String,
}

/// The result of signing a request payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SignatureResult {
    /// The transport-encoded signature envelope, handed to the backend as
    /// an opaque credential.
    pub signature: String,
    /// Intermediate values behind the transport encoding.
    pub details: SignatureDetails,
}

/// Mint a new P-256 key pair from OS entropy.
///
/// Each call draws fresh entropy; no state is shared between calls.
///
/// # Returns
/// A [`KeyPair`], or `RandomnessUnavailable` if the OS random source
/// cannot be read.
pub fn generate_key_pair() -> Result<KeyPair, RequestError> {
    let private_key = PrivateKey::generate()?;
    Ok(KeyPair {
        public_key: private_key.pub_key().to_hex(),
        private_key: private_key.to_hex(),
    })
}

/// Sign a request payload, proving possession of the private key.
///
/// The supplied public key must be the one derived from the private key;
/// pairing unrelated keys is a caller bug surfaced as [`RequestError::KeyMismatch`]
/// before anything is signed. The payload is hashed as its UTF-8 bytes and
/// signed with a deterministic (RFC 6979) low-S ECDSA signature.
///
/// # Arguments
/// * `payload` - The request body to sign, typically serialized JSON.
/// * `private_key_hex` - The signer's private key, 64 hex characters.
/// * `public_key_hex` - The paired compressed public key, 66 hex characters.
///
/// # Returns
/// A [`SignatureResult`] carrying the transport-encoded envelope and its
/// untransformed intermediates, or an error. No partial results: the call
/// either returns a complete envelope or fails.
pub fn sign(
    payload: &str,
    private_key_hex: &str,
    public_key_hex: &str,
) -> Result<SignatureResult, RequestError> {
    if private_key_hex.is_empty() || public_key_hex.is_empty() {
        return Err(RequestError::InvalidKeyMaterial(
            "private and public key are required".to_string(),
        ));
    }

    let private_key = PrivateKey::from_hex(private_key_hex)
        .map_err(|e| RequestError::InvalidKeyMaterial(e.to_string()))?;
    let supplied = PublicKey::from_hex(public_key_hex)
        .map_err(|e| RequestError::InvalidKeyMaterial(e.to_string()))?;

    // The key pair must actually pair: a mismatch is never signed over.
    let derived = private_key.pub_key();
    if derived.to_compressed() != supplied.to_compressed() {
        return Err(RequestError::KeyMismatch {
            expected: derived.to_hex(),
            received: public_key_hex.to_string(),
        });
    }

    let digest = sha256(payload.as_bytes());
    let signature = Signature::sign(&digest, &private_key)
        .map_err(|e| RequestError::SigningFailure(e.to_string()))?;

    let envelope = SignatureEnvelope::new(derived.to_hex(), hex::encode(signature.to_der()));
    let transport = envelope.to_transport()?;

    Ok(SignatureResult {
        signature: transport,
        details: SignatureDetails {
            public_key: envelope.public_key,
            scheme: envelope.scheme,
            signature: envelope.signature,
            payload_hash: hex::encode(digest),
        },
    })
}

/// Verify a transport-encoded signature envelope against a payload.
///
/// Decodes the envelope, rejects foreign scheme strings, and runs standard
/// ECDSA verification of the embedded DER signature against the embedded
/// public key and the payload digest.
///
/// # Arguments
/// * `payload` - The request body the signature claims to cover.
/// * `transport_signature` - The value returned in [`SignatureResult::signature`].
///
/// # Returns
/// `Ok(true)` if the signature is valid for the payload, `Ok(false)` if it
/// is well-formed but does not verify, or an error if the envelope cannot
/// be decoded.
pub fn verify(payload: &str, transport_signature: &str) -> Result<bool, RequestError> {
    let envelope = SignatureEnvelope::from_transport(transport_signature)?;

    if envelope.scheme != SIGNATURE_SCHEME {
        return Err(RequestError::SchemeMismatch {
            expected: SIGNATURE_SCHEME.to_string(),
            received: envelope.scheme,
        });
    }

    let public_key = PublicKey::from_hex(&envelope.public_key)?;
    let der = hex::decode(&envelope.signature)
        .map_err(|e| RequestError::MalformedEnvelope(e.to_string()))?;
    let signature = Signature::from_der(&der)?;

    let digest = sha256(payload.as_bytes());
    Ok(signature.verify(&digest, &public_key))
}
