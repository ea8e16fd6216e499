use cmdpanel_core::error::Error::{
    MixedParameterMode, ParameterCountMismatch, ParameterFormat, UnknownArgument,
};
use cmdpanel_core::error::{Error, Result};
use cmdpanel_core::form::FormState;

/// How argument values arrived on the command line.
#[derive(PartialEq, Clone, Debug)]
pub enum Style {
    /// Nothing given; every value is prompted for
    None,
    /// `-p key=value` pairs
    Named(Vec<String>),
    /// Trailing values, matched to the schema in order
    Positional(Vec<String>),
}

impl Style {
    /// Picks the style from the raw `-p` values and trailing values.
    ///
    /// # Errors
    ///
    /// Returns [`MixedParameterMode`] when both kinds are present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cmdpanel_cli::arguments::Style;
    ///
    /// let style = Style::from_command_line(&["text=hi".to_string()], &[]).unwrap();
    /// assert_eq!(style, Style::Named(vec!["text=hi".to_string()]));
    /// assert_eq!(Style::from_command_line(&[], &[]).unwrap(), Style::None);
    /// ```
    pub fn from_command_line(named: &[String], positional: &[String]) -> Result<Self> {
        match (named, positional) {
            ([], []) => Ok(Style::None),
            (named, []) => Ok(Style::Named(named.to_vec())),
            ([], positional) => Ok(Style::Positional(positional.to_vec())),
            _ => Err(MixedParameterMode),
        }
    }
}

/// Anything that carries command-line argument values.
pub trait Provider {
    /// # Errors
    ///
    /// Returns an error if named and positional values are mixed.
    fn get_style(&self) -> Result<Style>;
}

/// Fill a form from command-line arguments.
///
/// # Errors
///
/// Returns an error if:
/// - A named parameter is not in `key=value` format
/// - A named parameter does not match any argument of the command
/// - The number of positional arguments differs from the number of arguments
/// - A value is not valid for an integer argument
pub fn process_command_line(argument_style: Style, form: &mut FormState) -> Result<()> {
    match argument_style {
        Style::None => Ok(()),
        Style::Named(named_params) => process_named_parameters(&named_params, form),
        Style::Positional(positional_params) => {
            process_positional_parameters(&positional_params, form)
        }
    }
}

/// Process named parameters in the format key=value
fn process_named_parameters(named_params: &[String], form: &mut FormState) -> Result<()> {
    for param_str in named_params {
        let Some((key, value)) = param_str.split_once('=') else {
            return Err(ParameterFormat(param_str.to_string()));
        };

        if form.field(key).is_none() {
            return Err(UnknownArgument(key.to_string()));
        }

        set_checked(form, key, value)?;
    }

    Ok(())
}

/// Process positional parameters based on argument order
fn process_positional_parameters(positional_params: &[String], form: &mut FormState) -> Result<()> {
    if positional_params.len() != form.fields().len() {
        return Err(ParameterCountMismatch(
            form.fields().len(),
            positional_params.len(),
        ));
    }

    let names: Vec<String> = form.fields().iter().map(|f| f.name.clone()).collect();
    for (name, value) in names.iter().zip(positional_params) {
        set_checked(form, name, value)?;
    }

    Ok(())
}

fn set_checked(form: &mut FormState, name: &str, value: &str) -> Result<()> {
    if form.set_value(name, value) {
        return Ok(());
    }

    Err(Error::not_an_integer(name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdpanel_core::catalog::{ArgumentSchema, ArgumentType};

    fn create_test_form() -> FormState {
        let schema: ArgumentSchema = [
            ("host", ArgumentType::Text),
            ("count", ArgumentType::Integer),
        ]
        .into_iter()
        .collect();
        FormState::open("ping", &schema)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_style_from_command_line() {
        let named = strings(&["host=a"]);
        let positional = strings(&["a", "3"]);

        assert_eq!(Style::from_command_line(&[], &[]).unwrap(), Style::None);
        assert_eq!(
            Style::from_command_line(&named, &[]).unwrap(),
            Style::Named(named.clone())
        );
        assert_eq!(
            Style::from_command_line(&[], &positional).unwrap(),
            Style::Positional(positional.clone())
        );
        assert!(matches!(
            Style::from_command_line(&named, &positional),
            Err(MixedParameterMode)
        ));
    }

    #[test]
    fn test_style_none_leaves_form_empty() {
        let mut form = create_test_form();
        process_command_line(Style::None, &mut form).unwrap();
        assert_eq!(form.missing().count(), 2);
    }

    #[test]
    fn test_named_parameters() {
        let mut form = create_test_form();
        let style = Style::Named(vec!["count=3".to_string(), "host=a=b".to_string()]);
        process_command_line(style, &mut form).unwrap();

        assert_eq!(form.field("host").unwrap().value, "a=b");
        assert_eq!(form.field("count").unwrap().value, "3");
    }

    #[test]
    fn test_named_parameter_format_error() {
        let mut form = create_test_form();
        let style = Style::Named(vec!["host".to_string()]);
        let result = process_command_line(style, &mut form);
        assert!(matches!(result, Err(ParameterFormat(_))));
    }

    #[test]
    fn test_named_parameter_unknown_argument() {
        let mut form = create_test_form();
        let style = Style::Named(vec!["port=80".to_string()]);
        let result = process_command_line(style, &mut form);
        assert!(matches!(result, Err(UnknownArgument(name)) if name == "port"));
    }

    #[test]
    fn test_named_parameter_not_an_integer() {
        let mut form = create_test_form();
        let style = Style::Named(vec!["count=three".to_string()]);
        let result = process_command_line(style, &mut form);
        assert!(matches!(result, Err(Error::NotAnInteger { .. })));
    }

    #[test]
    fn test_positional_parameters_follow_schema_order() {
        let mut form = create_test_form();
        let style = Style::Positional(vec!["example.com".to_string(), "5".to_string()]);
        process_command_line(style, &mut form).unwrap();

        assert_eq!(form.field("host").unwrap().value, "example.com");
        assert_eq!(form.field("count").unwrap().value, "5");
    }

    #[test]
    fn test_positional_parameter_count_mismatch() {
        let mut form = create_test_form();
        let style = Style::Positional(vec!["example.com".to_string()]);
        let result = process_command_line(style, &mut form);
        assert!(matches!(result, Err(ParameterCountMismatch(2, 1))));
    }
}
