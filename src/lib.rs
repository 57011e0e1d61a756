//! jwt-edit: decode, edit, re-sign and verify HS256 JSON Web Tokens.
//!
//! The [`core`] module holds the token engine and the editing session.
//! [`display`] renders a session for the terminal, and [`cli`] plus
//! [`commands`] make up the `jwt-edit` binary's front end.

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod core;
pub mod display;
pub mod error;

pub use crate::core::editor::{EditOutcome, Editor, EditorView, Field, Phase, VerificationStatus};
pub use crate::core::signer::Algorithm;
pub use crate::error::JwtEditError;
