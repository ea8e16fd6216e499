use std::io::{stdout, Write};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use tokio::runtime::Runtime;

use cmdpanel_cli::arguments::validation::should_prompt_for_arguments;
use cmdpanel_cli::arguments::{process_command_line, Provider};
use cmdpanel_cli::cli_args::Args;
use cmdpanel_cli::command_selection::{
    self, catalog_listing, confirm_command_should_run, fill_form, CommandChoice, RunChoice,
};
use cmdpanel_cli::execution::run_effects;
use cmdpanel_core::catalog::Catalog;
use cmdpanel_core::client::CatalogClient;
use cmdpanel_core::config;
use cmdpanel_core::endpoints::Endpoints;
use cmdpanel_core::error::Error::CommandNotFound;
use cmdpanel_core::error::{Error, Result};
use cmdpanel_core::form::FormState;
use cmdpanel_core::panel::{Event, Panel};

/// Resolve the server from the command line and config file
fn initialize_endpoints(args: &Args) -> Result<Endpoints> {
    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{config_path}`");

    let panel_config = config::load_config(&config_path)?;
    let base = config::resolve_server_url(args.server.as_deref(), &panel_config)?;
    info!("Using server `{base}`");

    Endpoints::new(base)
}

/// Fetch the catalog into the panel, reporting a failure the way the panel shows it
fn load_catalog(runtime: &Runtime, client: &CatalogClient, panel: &mut Panel) -> Result<()> {
    match runtime.block_on(client.fetch_catalog()) {
        Ok(catalog) => {
            panel.dispatch(Event::CatalogLoaded(catalog));
            Ok(())
        }
        Err(e) => {
            panel.dispatch(Event::CatalogFailed(e.to_string()));
            eprintln!("{}", panel.output().text());
            Err(e)
        }
    }
}

/// Determine which command to run, from the command line or the picker.
///
/// `None` means the user quit the picker.
fn determine_command(args: &Args, catalog: &Catalog) -> Result<Option<String>> {
    let Some(requested) = &args.command else {
        return match command_selection::prompt_for_command_choice(catalog)? {
            CommandChoice::Name(name) => Ok(Some(name)),
            CommandChoice::Quit => Ok(None),
        };
    };

    if catalog.get(requested).is_some() {
        return Ok(Some(requested.clone()));
    }

    // Fall back to the index shown by the picker and `--list`
    requested
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| catalog.names().nth(index))
        .map(|name| Some(name.to_string()))
        .ok_or_else(|| CommandNotFound(requested.clone()))
}

/// Fill the form from the command line and prompts, then confirm.
///
/// `None` means nothing should be sent: a dry run, or the user declined.
fn fill_and_confirm(args: &Args, mut form: FormState) -> Result<Option<FormState>> {
    let style = args.get_style()?;
    process_command_line(style.clone(), &mut form)?;

    let mut need_to_prompt = should_prompt_for_arguments(&form, &style);

    loop {
        if need_to_prompt {
            fill_form(&mut form)?;
        }

        let request = form.to_request()?;
        println!("Executing: {request}");

        if args.dry_run {
            println!("Dry run is specified, not connecting. Request:\n{}", request.to_message()?);
            return Ok(None);
        }

        if args.force {
            return Ok(Some(form));
        }

        match confirm_command_should_run(!form.fields().is_empty())? {
            RunChoice::Yes => return Ok(Some(form)),
            RunChoice::No => {
                println!("Command execution cancelled.");
                return Ok(None);
            }
            RunChoice::ChangeArguments => need_to_prompt = true,
        }
    }
}

fn execute() -> Result<()> {
    let args = Args::parse();

    let endpoints = initialize_endpoints(&args)?;
    let execute_url = endpoints.execute_url()?;
    let client = CatalogClient::new(endpoints);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut panel = Panel::default();
    load_catalog(&runtime, &client, &mut panel)?;

    if args.list {
        for line in catalog_listing(panel.catalog()) {
            println!("{line}");
        }
        return Ok(());
    }

    if panel.catalog().is_empty() {
        println!("The server offers no commands.");
        return Ok(());
    }

    let Some(command) = determine_command(&args, panel.catalog())? else {
        return Ok(());
    };

    panel.dispatch(Event::CommandSelected(command.clone()));
    let form = panel.form().cloned().ok_or(CommandNotFound(command))?;

    let Some(form) = fill_and_confirm(&args, form)? else {
        return Ok(());
    };

    for field in form.fields() {
        panel.dispatch(Event::FieldChanged {
            name: field.name.clone(),
            value: field.value.clone(),
        });
    }

    let effects = panel.dispatch(Event::FormSubmitted);
    if let Some(reason) = panel.form_error() {
        return Err(Error::Misc(reason.to_string()));
    }

    let mut stdout = stdout();
    let result = runtime.block_on(run_effects(&mut panel, effects, &execute_url, &mut stdout));

    if !panel.output().text().ends_with('\n') && !panel.output().is_empty() {
        writeln!(stdout)?;
    }

    result
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
