use crate::arguments::Style;
use cmdpanel_core::form::FormState;

/// Determines whether to prompt the user for argument values.
///
/// The function avoids prompting when:
/// 1. The command takes no arguments
/// 2. Every argument was given on the command line
///
/// Otherwise the user is prompted, with any command-line values offered as
/// defaults.
#[must_use]
pub fn should_prompt_for_arguments(form: &FormState, argument_style: &Style) -> bool {
    if form.fields().is_empty() {
        return false;
    }

    if *argument_style != Style::None {
        return form.missing().next().is_some();
    }

    true
}
