//! Argument processing and validation for the cmdpanel CLI.
//!
//! This module handles the different ways argument values can be provided:
//! - **Named arguments**: Using `-p key=value` format
//! - **Positional arguments**: Provided as trailing arguments, in schema order
//! - **Interactive prompts**: When no arguments are provided via CLI
//!
//! The module ensures argument styles cannot be mixed and checks values
//! against each argument's type before anything is sent.

pub mod processing;
pub mod validation;

pub use processing::{process_command_line, Provider, Style};
