//! A view that buffers what an editor session renders.
//!
//! Commands drive an [`Editor`](crate::core::editor::Editor) with a
//! [`BufferedView`], then print the final state once the session is torn
//! down. The secret itself is never stored; only whether one is set.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::core::editor::{EditorView, VerificationStatus};
use crate::display::{json_printer, token_status};

/// The last rendered value of every output field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedView {
    pub header: String,
    pub payload: String,
    pub token: String,
    pub secret_set: bool,
    pub status: VerificationStatus,
}

impl Default for BufferedView {
    fn default() -> Self {
        Self {
            header: String::new(),
            payload: String::new(),
            token: String::new(),
            secret_set: false,
            status: VerificationStatus::Absent,
        }
    }
}

impl EditorView for BufferedView {
    fn render_header(&mut self, text: &str) {
        self.header = text.to_string();
    }

    fn render_payload(&mut self, text: &str) {
        self.payload = text.to_string();
    }

    fn render_secret(&mut self, secret: &str) {
        self.secret_set = !secret.is_empty();
    }

    fn render_token(&mut self, token: &str) {
        self.token = token.to_string();
    }

    fn render_status(&mut self, status: VerificationStatus) {
        self.status = status;
    }
}

impl BufferedView {
    /// Write the header, payload, token and status sections.
    pub fn write_sections(&self, out: &mut impl Write) -> io::Result<()> {
        json_printer::print_section(out, "Header", &self.header)?;
        json_printer::print_section(out, "Payload", &self.payload)?;
        json_printer::print_section(out, "Token", &self.token)?;
        token_status::display_token_status(out, self.status)
    }

    /// Machine-readable form of the rendered fields.
    ///
    /// Header and payload are embedded as JSON when they parse, and as
    /// raw text otherwise (an edit that was not valid JSON).
    pub fn to_json(&self) -> Value {
        json!({
            "header": embed(&self.header),
            "payload": embed(&self.payload),
            "token": self.token,
            "status": self.status.label(),
            "description": self.status.description(),
        })
    }
}

fn embed(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
