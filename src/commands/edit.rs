//! Handler for the `edit` subcommand.
//!
//! Drives one editor session: the secret is applied first, then the
//! token is loaded, then the header and payload replacements are applied
//! in that order. With no token, the replacements build a new one.

use std::io::{self, Write};

use anyhow::Result;

use crate::cli::EditArgs;
use crate::commands::input;
use crate::core::editor::{EditOutcome, Editor, Field};
use crate::display::json_printer;
use crate::display::view::BufferedView;

/// Execute the `edit` subcommand with the given arguments.
pub async fn execute(args: &EditArgs) -> Result<()> {
    let raw = input::resolve_token(&args.source)?;
    let secret = input::resolve_secret(&args.secret)?;

    let editor = Editor::attach(BufferedView::default());
    if let Some(secret) = &secret {
        applied(editor.edit_secret(secret).await, "secret");
    }
    if let Some(raw) = &raw {
        applied(editor.edit_token(raw).await, "token");
    }
    if let Some(header) = &args.header {
        applied(editor.edit_field(Field::Header, header).await, "header");
    }
    if let Some(payload) = &args.payload {
        applied(editor.edit_field(Field::Payload, payload).await, "payload");
    }

    for field in editor.reverted_fields() {
        eprintln!(
            "Warning: {} is not valid JSON; the token keeps its previous {} segment",
            field.name(),
            field.name()
        );
    }
    let view = editor.teardown();

    let mut out = io::stdout().lock();
    if args.json {
        json_printer::print_json_document(&mut out, &view.to_json())?;
    } else {
        view.write_sections(&mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn applied(outcome: EditOutcome, input: &str) {
    if outcome == EditOutcome::Dropped {
        tracing::warn!(input, "edit was dropped by the session");
    }
}
