//! Handler for the `verify` subcommand.
//!
//! Loads the token into an editor session together with the secret and
//! reports the resulting verification status.

use std::io::{self, Write};

use anyhow::Result;
use serde_json::json;

use crate::cli::VerifyArgs;
use crate::commands::input;
use crate::core::editor::{Editor, VerificationStatus};
use crate::display::view::BufferedView;
use crate::display::{json_printer, token_status};
use crate::error::JwtEditError;

/// Execute the `verify` subcommand.
///
/// Returns `true` only when the signature is valid for the secret.
pub async fn execute(args: &VerifyArgs) -> Result<bool> {
    let raw = input::require_token(&args.source)?;
    let secret = input::resolve_secret(&args.secret)?.ok_or(JwtEditError::NoSecretProvided)?;

    let editor = Editor::attach(BufferedView::default());
    editor.edit_secret(&secret).await;
    editor.edit_token(&raw).await;
    let view = editor.teardown();

    let mut out = io::stdout().lock();
    if args.json {
        let document = json!({
            "status": view.status.label(),
            "description": view.status.description(),
        });
        json_printer::print_json_document(&mut out, &document)?;
    } else {
        token_status::display_token_status(&mut out, view.status)?;
    }
    out.flush()?;

    Ok(view.status == VerificationStatus::Valid)
}
