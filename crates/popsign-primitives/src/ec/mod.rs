//! Elliptic curve cryptography on NIST P-256.
//!
//! Provides private keys, public keys, and ECDSA signatures with
//! deterministic (RFC 6979) nonces and canonical low-S DER encoding.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
