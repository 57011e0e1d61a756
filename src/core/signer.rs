//! Token signing and signature verification.
//!
//! The algorithm is read from the header's `alg` claim. Only HS256 can be
//! computed; every other value is reported as unsupported. The digest runs
//! on tokio's blocking pool so that signing is a real suspension point for
//! the editor.

use std::fmt;

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::core::codec;
use crate::core::token;
use crate::error::JwtEditError;

type HmacSha256 = Hmac<Sha256>;

/// The signing algorithm declared by a token header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Algorithm {
    /// HMAC with SHA-256.
    HS256,
    /// Anything else, including a missing or non-string `alg`.
    Unsupported(String),
}

impl Algorithm {
    /// Read the algorithm from a decoded header.
    ///
    /// Never fails: a missing `alg` yields `Unsupported("")` and a
    /// non-string value yields `Unsupported` holding its JSON text.
    pub fn from_header(header: &Value) -> Self {
        match header.get("alg") {
            Some(Value::String(alg)) if alg == "HS256" => Self::HS256,
            Some(Value::String(alg)) => Self::Unsupported(alg.clone()),
            Some(other) => Self::Unsupported(other.to_string()),
            None => Self::Unsupported(String::new()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::HS256 => "HS256",
            Self::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(name) if name.is_empty() => f.write_str("(missing)"),
            other => f.write_str(other.name()),
        }
    }
}

/// Sign `header_segment.payload_segment` with the algorithm its header declares.
///
/// The MAC covers the UTF-8 bytes of the encoded segments, never the
/// decoded JSON. The raw digest is returned as a base64url segment.
///
/// # Errors
///
/// Returns [`JwtEditError::UnsupportedAlgorithm`] for anything but HS256,
/// the decoding error if the header segment cannot be read, and
/// [`JwtEditError::SigningFailed`] if the digest task does not complete.
pub async fn sign(
    header_segment: &str,
    payload_segment: &str,
    secret: &str,
) -> Result<String, JwtEditError> {
    let header = token::decode_json_segment(header_segment, "header")?;

    match Algorithm::from_header(&header) {
        Algorithm::HS256 => {
            let signing_input = token::Segments {
                header: header_segment,
                payload: payload_segment,
                signature: None,
            }
            .signing_input();
            let digest = compute_hs256(secret, signing_input).await?;
            Ok(codec::encode_base64_url(&digest))
        }
        unsupported => Err(JwtEditError::UnsupportedAlgorithm {
            algorithm: unsupported.to_string(),
        }),
    }
}

/// Check a token's signature against `secret`.
///
/// Re-derives the signature from the token's own header and payload
/// segments and compares the full base64url strings. Every condition that
/// prevents a positive answer resolves to `false`: an empty secret, a
/// malformed or unsigned token, an unreadable header, an unsupported
/// algorithm, a failed digest, or a mismatch.
pub async fn verify(token: &str, secret: &str) -> bool {
    if secret.is_empty() {
        tracing::debug!("verification skipped: no secret");
        return false;
    }

    let segments = match token::split(token) {
        Ok(segments) => segments,
        Err(e) => {
            tracing::debug!(error = %e, "verification failed");
            return false;
        }
    };

    let Some(provided) = segments.signature else {
        tracing::debug!("verification failed: token has no signature");
        return false;
    };

    match sign(segments.header, segments.payload, secret).await {
        Ok(expected) => signatures_match(&expected, provided),
        Err(e) => {
            tracing::debug!(error = %e, "verification failed");
            false
        }
    }
}

/// Full-value, constant-time comparison of two signature segments.
///
/// Strings of different lengths never match.
pub fn signatures_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Compute HMAC-SHA256 on the blocking pool.
async fn compute_hs256(secret: &str, signing_input: String) -> Result<Vec<u8>, JwtEditError> {
    let key = Zeroizing::new(secret.as_bytes().to_vec());

    tokio::task::spawn_blocking(move || hmac_sha256(&key, signing_input.as_bytes()))
        .await
        .map_err(|e| JwtEditError::SigningFailed {
            reason: e.to_string(),
        })?
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, JwtEditError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| JwtEditError::SigningFailed {
        reason: e.to_string(),
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
