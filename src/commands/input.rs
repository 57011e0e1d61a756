//! Token and secret input resolution shared by the subcommands.
//!
//! A token is taken from the positional argument, then from the
//! environment variable named by `--token-env`, then from stdin when
//! stdin is not a terminal. Secrets come from `--secret` or from the
//! variable named by `--secret-env` and are kept in `Zeroizing` buffers.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::{SecretSource, TokenSource};
use crate::error::JwtEditError;

/// Resolve the token, failing when none was provided.
pub fn require_token(source: &TokenSource) -> Result<String, JwtEditError> {
    resolve_token(source)?.ok_or(JwtEditError::NoTokenProvided)
}

/// Resolve the token, if any. Surrounding whitespace is trimmed and an
/// empty value counts as absent.
pub fn resolve_token(source: &TokenSource) -> Result<Option<String>, JwtEditError> {
    let raw = if let Some(token) = &source.token {
        token.clone()
    } else if let Some(name) = &source.token_env {
        read_env_var(name)?.to_string()
    } else {
        read_stdin()
    };

    let trimmed = raw.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Resolve the secret, if any.
pub fn resolve_secret(source: &SecretSource) -> Result<Option<Zeroizing<String>>, JwtEditError> {
    if let Some(secret) = &source.secret {
        return Ok(Some(secret.clone()));
    }
    match &source.secret_env {
        Some(name) => read_env_var(name).map(Some),
        None => Ok(None),
    }
}

/// Reject names that cannot be looked up: empty, or containing `=` or NUL.
pub fn validate_env_var_name(name: &str) -> Result<(), JwtEditError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(JwtEditError::InvalidEnvVarName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn read_env_var(name: &str) -> Result<Zeroizing<String>, JwtEditError> {
    validate_env_var_name(name)?;
    std::env::var(name)
        .map(Zeroizing::new)
        .map_err(|_| JwtEditError::EnvVarNotFound {
            name: name.to_string(),
        })
}

fn read_stdin() -> String {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return String::new();
    }
    let mut buffer = String::new();
    if let Err(e) = stdin.lock().read_to_string(&mut buffer) {
        tracing::debug!(error = %e, "could not read token from stdin");
        return String::new();
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_arg(token: &str) -> TokenSource {
        TokenSource {
            token: Some(token.to_string()),
            token_env: None,
        }
    }

    #[test]
    fn test_resolve_token_trims_argument() {
        let token = resolve_token(&token_arg("  a.b.c\n")).unwrap();
        assert_eq!(token.as_deref(), Some("a.b.c"));
    }

    #[test]
    fn test_empty_token_argument_is_absent() {
        assert_eq!(resolve_token(&token_arg("")).unwrap(), None);
        assert!(matches!(
            require_token(&token_arg("   ")),
            Err(JwtEditError::NoTokenProvided)
        ));
    }

    #[test]
    fn test_validate_env_var_name() {
        assert!(validate_env_var_name("JWT_TOKEN").is_ok());
        assert!(matches!(
            validate_env_var_name(""),
            Err(JwtEditError::InvalidEnvVarName { .. })
        ));
        assert!(matches!(
            validate_env_var_name("BAD=NAME"),
            Err(JwtEditError::InvalidEnvVarName { name }) if name == "BAD=NAME"
        ));
        assert!(validate_env_var_name("NUL\0").is_err());
    }

    #[test]
    fn test_missing_env_var() {
        let source = TokenSource {
            token: None,
            token_env: Some("JWT_EDIT_TEST_SURELY_UNSET_VAR".to_string()),
        };
        assert!(matches!(
            resolve_token(&source),
            Err(JwtEditError::EnvVarNotFound { name }) if name == "JWT_EDIT_TEST_SURELY_UNSET_VAR"
        ));
    }

    #[test]
    fn test_resolve_secret_prefers_argument() {
        let source = SecretSource {
            secret: Some(Zeroizing::new("s3cret".to_string())),
            secret_env: None,
        };
        let secret = resolve_secret(&source).unwrap().unwrap();
        assert_eq!(secret.as_str(), "s3cret");
    }

    #[test]
    fn test_resolve_secret_absent() {
        let source = SecretSource {
            secret: None,
            secret_env: None,
        };
        assert!(resolve_secret(&source).unwrap().is_none());
    }
}
