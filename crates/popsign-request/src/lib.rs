#![deny(missing_docs)]

//! popsign SDK - proof-of-possession request signing.
//!
//! Mints P-256 key pairs and signs request payloads into a transportable
//! signature envelope that a backend can validate as proof of possession
//! of a private key.

mod error;
pub mod envelope;
pub mod signed;

pub use envelope::{SignatureEnvelope, SIGNATURE_SCHEME};
pub use error::RequestError;
pub use signed::{
    generate_key_pair, sign, verify, KeyPair, SignatureDetails, SignatureResult,
};
