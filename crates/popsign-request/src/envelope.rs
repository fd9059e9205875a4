//! Signature envelope and transport encoding.
//!
//! A signed request is carried as `{publicKey, scheme, signature}` where
//! `signature` is the hex of the DER-encoded `(r, s)` pair. The transport
//! form is the envelope's canonical JSON (fixed field order) encoded as
//! padding-free URL-safe base64.

use serde::{Deserialize, Serialize};

use popsign_primitives::base64url;

use crate::RequestError;

/// Scheme identifier for ECDSA over NIST P-256 (secp256r1).
///
/// Consumers must reject envelopes carrying any other scheme string.
pub const SIGNATURE_SCHEME: &str = "SIGNATURE_SCHEME_SECP256R1";

/// A signature artifact binding a public key, scheme, and DER signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEnvelope {
    /// Compressed public key of the signer, 66 hex characters.
    #[serde(rename = "publicKey")]
    pub public_key: String,
    /// Signature scheme identifier; always [`SIGNATURE_SCHEME`] for
    /// envelopes produced by this SDK.
    pub scheme: String,
    /// DER-encoded ECDSA signature, hex.
    pub signature: String,
}

impl SignatureEnvelope {
    /// Build an envelope for a public key and DER signature hex under the
    /// fixed scheme.
    pub fn new(public_key: String, signature: String) -> Self {
        SignatureEnvelope {
            public_key,
            scheme: SIGNATURE_SCHEME.to_string(),
            signature,
        }
    }

    /// Serialize the envelope to canonical JSON text.
    ///
    /// Key order is fixed (`publicKey`, `scheme`, `signature`), so equal
    /// envelopes always serialize to the same text.
    pub fn to_json(&self) -> Result<String, RequestError> {
        serde_json::to_string(self).map_err(|e| RequestError::MalformedEnvelope(e.to_string()))
    }

    /// Encode the envelope into its transport form: padding-free URL-safe
    /// base64 of the canonical JSON.
    pub fn to_transport(&self) -> Result<String, RequestError> {
        Ok(base64url::encode_string(&self.to_json()?))
    }

    /// Decode an envelope from its transport form.
    ///
    /// Does not validate the scheme; see [`crate::verify`].
    pub fn from_transport(transport: &str) -> Result<Self, RequestError> {
        let json_bytes = base64url::decode(transport)
            .map_err(|e| RequestError::MalformedEnvelope(e.to_string()))?;
        serde_json::from_slice(&json_bytes)
            .map_err(|e| RequestError::MalformedEnvelope(e.to_string()))
    }
}
