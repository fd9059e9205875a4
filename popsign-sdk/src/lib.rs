#![deny(missing_docs)]

//! popsign SDK - Complete SDK.
//!
//! Re-exports all popsign components for convenient single-crate usage.

pub use popsign_primitives as primitives;
pub use popsign_request as request;
