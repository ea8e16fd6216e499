//! Interactive command selection and user input handling.
//!
//! This module provides the terminal-based user interface for cmdpanel,
//! including command selection, argument input, and confirmation dialogs.
//!
//! # User Interface
//!
//! The interface supports:
//! - Arrow keys or vim-style (j/k) navigation
//! - Enter or a mouse click to select a command
//! - '/' to filter commands (fuzzy search)
//! - 'q' or Ctrl-C to quit

pub mod input;
pub mod types;
pub mod ui;

pub use input::{confirm_command_should_run, fill_form, prompt_value};
pub use types::{CommandChoice, RunChoice};
pub use ui::{catalog_listing, prompt_for_command_choice};
