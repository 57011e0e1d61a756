//! Section output for decoded token fields.
//!
//! Human-readable mode prints each field under a `--- Title ---` banner.
//! Machine-readable mode prints a single JSON document.

use std::io::{self, Write};

use serde_json::Value;

/// Write one titled section followed by a blank line.
///
/// Empty bodies are shown as `(empty)` so the section stays visible.
pub fn print_section(out: &mut impl Write, title: &str, body: &str) -> io::Result<()> {
    writeln!(out, "--- {title} ---")?;
    if body.is_empty() {
        writeln!(out, "(empty)")?;
    } else {
        writeln!(out, "{body}")?;
    }
    writeln!(out)
}

/// Write a JSON document on one line, for piping into other tools.
pub fn print_json_document(out: &mut impl Write, document: &Value) -> io::Result<()> {
    writeln!(out, "{document}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_print_section_format() {
        let mut out = Vec::new();
        print_section(&mut out, "Header", "{\n    \"alg\": \"HS256\"\n}").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "--- Header ---\n{\n    \"alg\": \"HS256\"\n}\n\n"
        );
    }

    #[test]
    fn test_print_section_marks_empty_body() {
        let mut out = Vec::new();
        print_section(&mut out, "Signature", "").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "--- Signature ---\n(empty)\n\n");
    }

    #[test]
    fn test_print_json_document_is_single_line() {
        let mut out = Vec::new();
        print_json_document(&mut out, &json!({"status": "valid"})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"status\":\"valid\"}\n");
    }
}
