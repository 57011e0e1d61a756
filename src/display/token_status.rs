//! Verification status rendering.

use std::io::{self, Write};

use crate::core::editor::VerificationStatus;

/// One-line summary of a verification status.
pub fn status_line(status: VerificationStatus) -> String {
    format!(
        "{} ({})",
        status.label().to_ascii_uppercase(),
        status.description()
    )
}

/// Write the `Token Status` block.
pub fn display_token_status(out: &mut impl Write, status: VerificationStatus) -> io::Result<()> {
    writeln!(out, "--- Token Status ---")?;
    writeln!(out, "Signature: {}", status_line(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_valid() {
        assert_eq!(
            status_line(VerificationStatus::Valid),
            "VALID (Valid signature: cryptographic verification successful)"
        );
    }

    #[test]
    fn test_status_line_distinguishes_invalid_from_absent() {
        assert!(status_line(VerificationStatus::Invalid).starts_with("INVALID"));
        assert_eq!(
            status_line(VerificationStatus::Absent),
            "ABSENT (No token loaded)"
        );
    }

    #[test]
    fn test_display_token_status_block() {
        let mut out = Vec::new();
        display_token_status(&mut out, VerificationStatus::Invalid).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("--- Token Status ---\n"));
        assert!(text.contains("Signature: INVALID"));
    }
}
