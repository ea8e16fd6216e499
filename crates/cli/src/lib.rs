//! cmdpanel CLI Library
//!
//! This crate provides the terminal front end for cmdpanel, a remote command
//! panel. It fetches the command catalog from a server, lets the user pick a
//! command and fill in its arguments, then streams the command's output from
//! the server's execution channel.
//!
//! # Key Features
//!
//! - **Interactive Command Selection**: Terminal-based UI for browsing and selecting commands
//! - **Argument Processing**: Support for named arguments and positional argument input
//! - **Typed Prompts**: Integer arguments are re-prompted until they parse
//! - **Command Confirmation**: Interactive confirmation before command execution
//! - **Streaming Output**: Output frames are printed as the server sends them
//!
//! # Architecture
//!
//! The CLI is organized into several key modules:
//!
//! - [`cli_args`]: Command-line argument parsing and validation
//! - [`command_selection`]: Interactive UI for command selection and confirmation
//! - [`arguments`]: Argument processing for both named and positional styles
//! - [`execution`]: Relaying an execution channel through the panel to stdout
//!
//! # Examples
//!
//! The CLI binary (`cmdp`) can be used in several ways:
//!
//! ```bash
//! # Interactive mode - shows command selection UI
//! cmdp
//!
//! # List the commands offered by a server
//! cmdp --server https://panel.example.com --list
//!
//! # With named arguments
//! cmdp ping --param host=localhost --param count=3
//!
//! # With positional arguments
//! cmdp ping localhost 3
//!
//! # Dry run (print the request, don't connect)
//! cmdp --dry-run ping localhost 3
//! ```

pub mod arguments;
pub mod cli_args;
pub mod command_selection;
pub mod execution;
