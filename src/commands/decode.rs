//! Handler for the `decode` subcommand.
//!
//! Decodes and pretty-prints a JWT's header and payload without
//! verifying its signature. Supports reading the token from a CLI
//! argument, environment variable, or stdin.

use std::io::{self, Write};

use anyhow::Result;
use serde_json::json;

use crate::cli::DecodeArgs;
use crate::commands::input;
use crate::core::token;
use crate::display::json_printer;

/// Execute the `decode` subcommand with the given arguments.
pub fn execute(args: &DecodeArgs) -> Result<()> {
    let raw = input::require_token(&args.source)?;
    let segments = token::split(&raw)?;
    let parts = token::decode_parts(&segments)?;

    let mut out = io::stdout().lock();
    if args.json {
        let document = json!({
            "header": parts.header,
            "payload": parts.payload,
            "signature": parts.signature,
        });
        json_printer::print_json_document(&mut out, &document)?;
    } else {
        json_printer::print_section(&mut out, "Header", &token::pretty_json(&parts.header))?;
        json_printer::print_section(&mut out, "Payload", &token::pretty_json(&parts.payload))?;
        let signature = parts.signature.as_deref().unwrap_or("(none)");
        json_printer::print_section(&mut out, "Signature", signature)?;
    }
    out.flush()?;
    Ok(())
}
