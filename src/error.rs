//! Domain error types for jwt-edit.
//!
//! All business-logic errors are defined here using `thiserror`.
//! These errors are converted to user-friendly messages at the CLI boundary.

use thiserror::Error;

/// Errors that can occur while decoding, editing or signing a token.
#[derive(Debug, Error)]
pub enum JwtEditError {
    /// The token does not split into a header, a payload and an optional signature.
    #[error("invalid token format: expected 'header.payload[.signature]' but found {segments} segment(s)")]
    MalformedToken {
        /// Number of dot-separated segments actually found.
        segments: usize,
    },

    /// A segment is not valid base64url (bad length, alphabet or UTF-8).
    #[error("failed to decode {segment}: invalid base64url encoding")]
    MalformedEncoding {
        /// Which segment failed to decode (e.g., "header", "payload").
        segment: String,
    },

    /// Decoded or edited text is not valid JSON.
    #[error("failed to parse {segment} as JSON: {reason}")]
    InvalidJson {
        /// Which segment failed to parse (e.g., "header", "payload").
        segment: String,
        /// Description of the parsing failure.
        reason: String,
    },

    /// The header declares an algorithm that cannot be signed or verified.
    #[error("unsupported algorithm: {algorithm}")]
    UnsupportedAlgorithm {
        /// The algorithm that was encountered.
        algorithm: String,
    },

    /// The digest computation did not complete.
    #[error("signing failed: {reason}")]
    SigningFailed {
        /// Description of the failure.
        reason: String,
    },

    /// No token was provided via any input method.
    #[error("no token provided: pass a token as an argument, via --token-env, or through stdin")]
    NoTokenProvided,

    /// No secret was provided for a command that needs one.
    #[error("no secret provided: pass --secret or --secret-env")]
    NoSecretProvided,

    /// The specified environment variable is not set.
    #[error("environment variable '{name}' is not set")]
    EnvVarNotFound {
        /// Name of the missing environment variable.
        name: String,
    },

    /// The environment variable name cannot be looked up safely.
    #[error("invalid environment variable name '{name}'")]
    InvalidEnvVarName {
        /// The rejected name.
        name: String,
    },
}

impl JwtEditError {
    pub(crate) fn encoding(segment: &str) -> Self {
        Self::MalformedEncoding {
            segment: segment.to_string(),
        }
    }

    pub(crate) fn json(segment: &str, err: &serde_json::Error) -> Self {
        Self::InvalidJson {
            segment: segment.to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_token_display_includes_segment_count() {
        let err = JwtEditError::MalformedToken { segments: 4 };
        assert_eq!(
            err.to_string(),
            "invalid token format: expected 'header.payload[.signature]' but found 4 segment(s)"
        );
    }

    #[test]
    fn test_malformed_encoding_display_includes_segment() {
        let err = JwtEditError::encoding("header");
        assert_eq!(
            err.to_string(),
            "failed to decode header: invalid base64url encoding"
        );
    }

    #[test]
    fn test_invalid_json_display_includes_segment_and_reason() {
        let err = JwtEditError::InvalidJson {
            segment: "payload".to_string(),
            reason: "unexpected EOF".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse payload as JSON: unexpected EOF"
        );
    }

    #[test]
    fn test_invalid_json_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = JwtEditError::json("header", &serde_err);
        assert!(matches!(
            &err,
            JwtEditError::InvalidJson { segment, .. } if segment == "header"
        ));
        assert!(err.to_string().starts_with("failed to parse header as JSON"));
    }

    #[test]
    fn test_unsupported_algorithm_display() {
        let err = JwtEditError::UnsupportedAlgorithm {
            algorithm: "RS256".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported algorithm: RS256");
    }

    #[test]
    fn test_no_token_provided_display() {
        let err = JwtEditError::NoTokenProvided;
        assert!(err.to_string().contains("no token provided"));
        assert!(err.to_string().contains("--token-env"));
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn test_env_var_not_found_display() {
        let err = JwtEditError::EnvVarNotFound {
            name: "JWT_TOKEN".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "environment variable 'JWT_TOKEN' is not set"
        );
    }

    #[test]
    fn test_invalid_env_var_name_display() {
        let err = JwtEditError::InvalidEnvVarName {
            name: "BAD=NAME".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid environment variable name 'BAD=NAME'"
        );
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JwtEditError>();
    }
}
