//! CLI argument definitions for jwt-edit.
//!
//! Uses `clap` derive macros to define the command-line interface.
//! Each subcommand has its own argument struct for type-safe parsing.
//!
//! # Security
//!
//! `DecodeArgs`, `VerifyArgs` and `EditArgs` implement custom `Debug` to
//! redact sensitive fields (tokens, claims and secrets) and prevent
//! accidental leakage through debug formatting, error chains, or logging.

use std::fmt;

use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

/// An offline JWT editor: decode, edit, re-sign and verify HS256 tokens
/// from the terminal.
#[derive(Debug, Parser)]
#[command(name = "jwt-edit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode and inspect a JWT without verifying its signature.
    Decode(DecodeArgs),

    /// Verify a JWT's HS256 signature with a shared secret.
    Verify(VerifyArgs),

    /// Edit a JWT's header or payload and re-sign it.
    Edit(EditArgs),
}

/// Where a token comes from.
#[derive(clap::Args)]
pub struct TokenSource {
    /// The JWT token. If omitted, reads from stdin.
    pub token: Option<String>,

    /// Read the token from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub token_env: Option<String>,
}

impl fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSource")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_env", &self.token_env)
            .finish()
    }
}

/// Where the HMAC secret comes from.
#[derive(clap::Args)]
pub struct SecretSource {
    /// HMAC shared secret used to sign and verify the token.
    ///
    /// WARNING: Passing secrets via CLI arguments may expose them in shell
    /// history. Prefer using --secret-env instead.
    #[arg(long, value_name = "SECRET", value_parser = parse_zeroizing_string, conflicts_with = "secret_env")]
    pub secret: Option<Zeroizing<String>>,

    /// Read the HMAC secret from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub secret_env: Option<String>,
}

impl fmt::Debug for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretSource")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("secret_env", &self.secret_env)
            .finish()
    }
}

/// Arguments for the `decode` subcommand.
#[derive(Debug, clap::Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub source: TokenSource,

    /// Output raw JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `verify` subcommand.
#[derive(Debug, clap::Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub source: TokenSource,

    #[command(flatten)]
    pub secret: SecretSource,

    /// Output raw JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` subcommand.
#[derive(clap::Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub source: TokenSource,

    #[command(flatten)]
    pub secret: SecretSource,

    /// Replacement header as JSON text.
    #[arg(long, value_name = "JSON")]
    pub header: Option<String>,

    /// Replacement payload as JSON text.
    #[arg(long, value_name = "JSON")]
    pub payload: Option<String>,

    /// Output raw JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Custom `Debug` that redacts the replacement payload, which carries claims.
impl fmt::Debug for EditArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditArgs")
            .field("source", &self.source)
            .field("secret", &self.secret)
            .field("header", &self.header)
            .field("payload", &self.payload.as_ref().map(|_| "[REDACTED]"))
            .field("json", &self.json)
            .finish()
    }
}

/// Parse a string into a `Zeroizing<String>` for secure CLI arguments.
fn parse_zeroizing_string(s: &str) -> Result<Zeroizing<String>, std::convert::Infallible> {
    Ok(Zeroizing::new(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_edit_args_parse() {
        let cli = Cli::try_parse_from([
            "jwt-edit",
            "edit",
            "a.b",
            "--secret",
            "s3cret",
            "--payload",
            "{\"sub\":\"x\"}",
        ])
        .unwrap();
        let Commands::Edit(args) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(args.source.token.as_deref(), Some("a.b"));
        assert_eq!(args.secret.secret.as_deref().map(String::as_str), Some("s3cret"));
        assert!(args.header.is_none());
    }

    #[test]
    fn test_secret_and_secret_env_conflict() {
        let result = Cli::try_parse_from([
            "jwt-edit",
            "verify",
            "a.b.c",
            "--secret",
            "x",
            "--secret-env",
            "Y",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_token_secret_and_payload() {
        let cli = Cli::try_parse_from([
            "jwt-edit",
            "edit",
            "tok.en.sig",
            "--secret",
            "s3cret",
            "--payload",
            "{\"email\":\"a@b.c\"}",
        ])
        .unwrap();
        let debug_output = format!("{:?}", cli);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tok.en.sig"));
        assert!(!debug_output.contains("s3cret"));
        assert!(!debug_output.contains("a@b.c"));
    }
}
