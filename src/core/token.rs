//! Token structure: splitting, decoding and reassembly.
//!
//! A token is two or three dot-separated base64url segments. The header
//! and payload decode to JSON; the signature stays an opaque segment.
//! Reassembly is the exact inverse of [`split`].

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::core::codec::{self, CodecError};
use crate::error::JwtEditError;

/// Indentation used for displayed header and payload JSON.
const DISPLAY_INDENT: &[u8] = b"    ";

/// The raw segments of a token, borrowed from the token text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Encoded header segment.
    pub header: &'a str,
    /// Encoded payload segment.
    pub payload: &'a str,
    /// Encoded signature segment. `Some("")` for a token ending in a dot.
    pub signature: Option<&'a str>,
}

impl Segments<'_> {
    /// The `header.payload` text a signature is computed over.
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }
}

/// Header and payload parsed as JSON, plus the untouched signature.
///
/// Implements a custom `Debug` that redacts `payload` and `signature`
/// to prevent accidental leakage of sensitive claim data.
#[derive(Clone, PartialEq)]
pub struct DecodedParts {
    /// The parsed header (typically contains `alg` and `typ`).
    pub header: Value,
    /// The parsed payload (claims).
    pub payload: Value,
    /// The raw base64url signature segment, if the token has one.
    pub signature: Option<String>,
}

impl fmt::Debug for DecodedParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedParts")
            .field("header", &self.header)
            .field("payload", &"[REDACTED]")
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// The last segments that decoded successfully.
///
/// A header or payload edit whose JSON cannot be encoded falls back to
/// the matching segment stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginalSegments {
    pub header: String,
    pub payload: String,
    pub signature: Option<String>,
}

impl From<Segments<'_>> for OriginalSegments {
    fn from(segments: Segments<'_>) -> Self {
        Self {
            header: segments.header.to_string(),
            payload: segments.payload.to_string(),
            signature: segments.signature.map(str::to_string),
        }
    }
}

/// Split a token into its segments.
///
/// # Errors
///
/// Returns [`JwtEditError::MalformedToken`] unless the token has exactly
/// one or two `.` separators.
pub fn split(token: &str) -> Result<Segments<'_>, JwtEditError> {
    let parts: Vec<&str> = token.split('.').collect();
    match parts[..] {
        [header, payload] => Ok(Segments {
            header,
            payload,
            signature: None,
        }),
        [header, payload, signature] => Ok(Segments {
            header,
            payload,
            signature: Some(signature),
        }),
        _ => Err(JwtEditError::MalformedToken {
            segments: parts.len(),
        }),
    }
}

/// Decode the header and payload segments as JSON.
///
/// # Errors
///
/// Returns [`JwtEditError::MalformedEncoding`] or
/// [`JwtEditError::InvalidJson`] naming the failing segment.
pub fn decode_parts(segments: &Segments<'_>) -> Result<DecodedParts, JwtEditError> {
    Ok(DecodedParts {
        header: decode_json_segment(segments.header, "header")?,
        payload: decode_json_segment(segments.payload, "payload")?,
        signature: segments.signature.map(str::to_string),
    })
}

/// Join segments back into a token.
///
/// Without a signature the result has two segments and no trailing dot.
pub fn reassemble(header: &str, payload: &str, signature: Option<&str>) -> String {
    match signature {
        Some(signature) => format!("{header}.{payload}.{signature}"),
        None => format!("{header}.{payload}"),
    }
}

/// Base64url-decode a segment and parse it as JSON.
pub fn decode_json_segment(encoded: &str, segment_name: &str) -> Result<Value, JwtEditError> {
    let text = codec::decode_base64_url_text(encoded).map_err(|e: CodecError| {
        tracing::debug!(segment = segment_name, error = %e, "segment is not base64url");
        JwtEditError::encoding(segment_name)
    })?;

    serde_json::from_str(&text).map_err(|e| JwtEditError::json(segment_name, &e))
}

/// Parse edited JSON text and encode it as a compact base64url segment.
///
/// Whitespace from the edit is dropped; key order is kept.
///
/// # Errors
///
/// Returns [`JwtEditError::InvalidJson`] if the text does not parse.
pub fn encode_json_segment(text: &str, segment_name: &str) -> Result<String, JwtEditError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| JwtEditError::json(segment_name, &e))?;
    let compact = serde_json::to_vec(&value).map_err(|e| JwtEditError::json(segment_name, &e))?;
    Ok(codec::encode_base64_url(&compact))
}

/// Render a JSON value with 4-space indentation.
pub fn pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(DISPLAY_INDENT));
    if let Err(e) = value.serialize(&mut serializer) {
        tracing::warn!(error = %e, "failed to format JSON value");
        return value.to_string();
    }
    String::from_utf8_lossy(&buf).into_owned()
}
