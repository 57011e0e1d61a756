//! Core business logic for token editing.
//!
//! This module contains the domain logic separated from CLI concerns.
//! All types and functions here are testable without the CLI layer.

pub mod codec;
pub mod editor;
pub mod signer;
pub mod token;
