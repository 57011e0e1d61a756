//! Terminal display and formatting utilities.
//!
//! Handles section output for decoded fields, the verification status
//! line, and the view that collects what an editor session renders.

pub mod json_printer;
pub mod token_status;
pub mod view;
