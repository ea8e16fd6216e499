use std::io::{stdin, stdout, BufRead, Write};

use cmdpanel_core::catalog::ArgumentType;
use cmdpanel_core::error::{Error, Result};
use cmdpanel_core::form::{FormField, FormState};

use super::types::RunChoice;

/// What to do with one line typed at an argument prompt.
#[derive(Debug, PartialEq, Eq)]
enum PromptOutcome {
    Accept(String),
    Retry(String),
}

/// Decides on one line of input for `field`.
///
/// An empty line keeps the field's current value, if it has one. Text values
/// are taken as typed, only the line terminator is removed. Integer arguments
/// must parse before they are accepted.
fn evaluate_input(field: &FormField, line: &str) -> PromptOutcome {
    let read_value = match field.argument_type {
        ArgumentType::Integer => line.trim(),
        ArgumentType::Text => line.trim_end_matches(['\r', '\n']),
    };

    let value = if read_value.is_empty() {
        if field.value.is_empty() {
            return PromptOutcome::Retry(format!("A value for `{}` is required.", field.name));
        }
        field.value.as_str()
    } else {
        read_value
    };

    match field.argument_type.coerce(&field.name, value) {
        Ok(()) => PromptOutcome::Accept(value.to_string()),
        Err(e) => PromptOutcome::Retry(e.to_string()),
    }
}

fn prompt_text(field: &FormField) -> String {
    let kind = match field.argument_type {
        ArgumentType::Integer => " (integer)",
        ArgumentType::Text => "",
    };

    if field.value.is_empty() {
        format!("Value for `{}`{kind}: ", field.name)
    } else {
        format!("Value for `{}`{kind} [{}]: ", field.name, field.value)
    }
}

/// Prompts the user for a field value until an acceptable one is entered
pub fn prompt_value(field: &FormField) -> Result<String> {
    prompt_value_from(field, &mut stdin().lock(), &mut stdout())
}

fn prompt_value_from<R: BufRead, W: Write>(
    field: &FormField,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    loop {
        write!(output, "{}", prompt_text(field))?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::MissingArgument(field.name.clone()));
        }

        match evaluate_input(field, &line) {
            PromptOutcome::Accept(value) => return Ok(value),
            PromptOutcome::Retry(message) => writeln!(output, "{message}")?,
        }
    }
}

/// Fills in every field of the form by prompting the user
pub fn fill_form(form: &mut FormState) -> Result<()> {
    let fields: Vec<FormField> = form.fields().to_vec();

    for field in &fields {
        let value = prompt_value(field)?;
        if !form.set_value(&field.name, value.as_str()) {
            return Err(Error::not_an_integer(&field.name, &value));
        }
    }

    Ok(())
}

/// Confirms with the user whether the command should be run
pub fn confirm_command_should_run(has_arguments: bool) -> Result<RunChoice> {
    loop {
        let prompt_change_arguments = if has_arguments {
            "/[c]hange arguments"
        } else {
            ""
        };

        print!("Are you sure you want to run? ([Y]es/[n]o{prompt_change_arguments}): ");
        stdout().flush()?;

        let mut input = String::new();
        stdin().read_line(&mut input)?;

        if let Some(choice) = parse_run_choice(&input, has_arguments) {
            return Ok(choice);
        }
    }
}

fn parse_run_choice(input: &str, has_arguments: bool) -> Option<RunChoice> {
    match input.trim().to_lowercase().as_str() {
        "" | "y" => Some(RunChoice::Yes),
        "n" => Some(RunChoice::No),
        "c" if has_arguments => Some(RunChoice::ChangeArguments),
        _ => None,
    }
}
