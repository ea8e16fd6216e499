//! Desktop front end for cmdpanel.
//!
//! Lists the commands a server offers, opens a form for the chosen command
//! and streams its output into a scrolling pane.

use std::process::ExitCode;

use clap::Parser;
use log::info;

use cmdpanel_core::config;
use cmdpanel_core::endpoints::Endpoints;
use cmdpanel_core::error::Result;

mod app;
mod ui;

use app::CommandPanel;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the command server. Defaults to `http://localhost:8080`.
    #[arg(long, short = 's')]
    server: Option<String>,

    /// Path to the panel config file YAML.
    #[arg(long, short = 'c')]
    config_path: Option<String>,
}

fn initialize(args: &Args) -> Result<CommandPanel> {
    let config_path = config::get_config_path(&args.config_path);
    let panel_config = config::load_config(&config_path)?;
    let base = config::resolve_server_url(args.server.as_deref(), &panel_config)?;
    info!("Using server `{base}`");

    CommandPanel::new(Endpoints::new(base)?)
}

pub fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let app = match initialize(&Args::parse()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = iced::application(CommandPanel::title, CommandPanel::update, CommandPanel::view)
        .centered()
        .run_with(move || app.boot());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
