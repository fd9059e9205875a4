/// Error types for request signing operations.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// A key string was empty or did not decode to valid key material.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),
    /// The supplied public key is not the one derived from the private key.
    #[error("the private key derives public key {expected}, but the provided public key is {received}")]
    KeyMismatch {
        /// Compressed hex of the public key derived from the private key.
        expected: String,
        /// The public key the caller supplied.
        received: String,
    },
    /// The curve operation rejected its input while producing a signature.
    #[error("signing failed: {0}")]
    SigningFailure(String),
    /// The envelope carries a signature scheme this SDK does not produce.
    #[error("signature scheme mismatch: expected {expected}, received {received}")]
    SchemeMismatch {
        /// The scheme string this SDK accepts.
        expected: String,
        /// The scheme string found in the envelope.
        received: String,
    },
    /// The transport string did not decode to a signature envelope.
    #[error("malformed signature envelope: {0}")]
    MalformedEnvelope(String),
    /// An underlying primitives failure.
    #[error("{0}")]
    Primitives(#[from] popsign_primitives::PrimitivesError),
}
