//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure and provides
//! validation for CLI arguments using the `clap` crate.

use crate::arguments::{Provider, Style};
use clap::Parser;
use cmdpanel_core::error::Result;

/// Command-line arguments for the `cmdp` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use cmdpanel_cli::cli_args::Args;
///
/// let args = Args::parse_from(["cmdp", "--server", "http://localhost:8080", "echo"]);
/// assert_eq!(args.command.as_deref(), Some("echo"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Base URL of the command server, e.g. `https://host:8443`.
    ///
    /// Overrides the `server` key of the config file. Defaults to
    /// `http://localhost:8080`.
    #[arg(long, short = 's')]
    pub server: Option<String>,

    /// Path to the panel config file YAML.
    ///
    /// If not provided, defaults to `~/.cmdpanel/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Print the request that would be sent, without connecting.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Run the command without first confirming if the command should be run.
    #[arg(long, short = 'f', action)]
    pub force: bool,

    /// Print the commands offered by the server and exit.
    #[arg(long, short = 'l', action)]
    pub list: bool,

    /// The name of the command to execute directly.
    ///
    /// If not provided, a command is picked interactively.
    #[arg(num_args(1))]
    pub command: Option<String>,

    /// Named arguments for the command in the format key=value.
    ///
    /// Multiple arguments can be provided with repeated `-p` flags.
    /// Cannot be mixed with positional arguments.
    ///
    /// # Examples
    /// ```bash
    /// cmdp ping -p host=example.com -p count=3
    /// ```
    #[arg(long = "param", short = 'p', action = clap::ArgAction::Append)]
    pub parameters: Vec<String>,

    /// Positional argument values, matched to the command's arguments in order.
    ///
    /// Cannot be mixed with named arguments.
    #[arg(trailing_var_arg = true)]
    pub positional_arguments: Vec<String>,
}

impl Provider for Args {
    fn get_style(&self) -> Result<Style> {
        Style::from_command_line(&self.parameters, &self.positional_arguments)
    }
}
