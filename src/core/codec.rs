//! Base64url encoding and decoding.
//!
//! Tokens carry their segments as unpadded base64url. Decoding accepts
//! both the url-safe and the standard alphabet and restores the padding
//! from the input length before handing the text to the `base64` crate.

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::{Engine, alphabet};
use thiserror::Error;

/// Standard-alphabet decoder that ignores non-zero bits in the last symbol.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Why a piece of text could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A length of `4n + 1` can never come out of a base64 encoder.
    #[error("invalid base64url length {len}: remainder 1 modulo 4")]
    InvalidLength {
        /// Length of the rejected input.
        len: usize,
    },

    /// The text contains characters outside the alphabet or stray padding.
    #[error("invalid base64url data: {reason}")]
    InvalidData {
        /// Failure reported by the decoder.
        reason: String,
    },

    /// The bytes decoded fine but are not UTF-8 text.
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Encode arbitrary bytes as unpadded base64url.
pub fn encode_base64_url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode base64url text into bytes.
///
/// `-` and `_` are mapped back to `+` and `/`, then padding is restored
/// by the remainder of the length modulo 4: 0 needs none, 2 gets `==`,
/// 3 gets `=`, and 1 is rejected. Unused bits in the final symbol are
/// ignored, so `e31` decodes like `e30`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidLength`] for a remainder of 1 and
/// [`CodecError::InvalidData`] for anything the decoder refuses.
pub fn decode_base64_url(text: &str) -> Result<Vec<u8>, CodecError> {
    let mut standard: String = text
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    match standard.len() % 4 {
        0 => {}
        2 => standard.push_str("=="),
        3 => standard.push('='),
        _ => return Err(CodecError::InvalidLength { len: text.len() }),
    }

    LENIENT_STANDARD
        .decode(standard.as_bytes())
        .map_err(|e| CodecError::InvalidData {
            reason: e.to_string(),
        })
}

/// Decode base64url text and interpret the bytes as UTF-8.
///
/// # Errors
///
/// Everything [`decode_base64_url`] rejects, plus [`CodecError::InvalidUtf8`].
pub fn decode_base64_url_text(text: &str) -> Result<String, CodecError> {
    let bytes = decode_base64_url(text)?;
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
}
