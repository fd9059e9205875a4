//! popsign SDK - Cryptographic primitives.
//!
//! This crate provides the foundational building blocks for the popsign SDK:
//! - SHA-256 payload hashing
//! - URL-safe, padding-free base64 encoding
//! - Elliptic curve cryptography (P-256 keys and ECDSA signatures)

pub mod base64url;
pub mod ec;
pub mod hash;

mod error;
pub use error::PrimitivesError;
