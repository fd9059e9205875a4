//! URL-safe, padding-free base64 encoding.
//!
//! The transport form of a signature envelope is its canonical JSON encoded
//! with the URL-safe alphabet (`+` becomes `-`, `/` becomes `_`) and all
//! trailing `=` padding stripped. Decoding accepts exactly that padding-free
//! form.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::PrimitivesError;

/// Encode a byte buffer as URL-safe base64 without padding.
pub fn encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Encode a string's UTF-8 bytes as URL-safe base64 without padding.
///
/// Produces identical output to [`encode`] for equivalent byte content.
pub fn encode_string(text: &str) -> String {
    encode(text.as_bytes())
}

/// Decode a padding-free, URL-safe base64 string.
///
/// # Arguments
/// * `encoded` - The base64url string to decode.
///
/// # Returns
/// The decoded bytes, or `InvalidBase64` if the input is not valid
/// padding-free base64url.
pub fn decode(encoded: &str) -> Result<Vec<u8>, PrimitivesError> {
    URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| PrimitivesError::InvalidBase64(e.to_string()))
}
