//! Type definitions for command selection and UI state.

/// Represents the user's command selection choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandChoice {
    Name(String),
    Quit,
}

/// Represents the user's choice when confirming a command run.
///
/// After a command is selected and arguments are filled, the user
/// is prompted to confirm execution with these options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunChoice {
    Yes,
    No,
    ChangeArguments,
}

/// Direction to cycle through commands in the selection UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the command list when there are more
/// commands than can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for the command selection interface.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Position of the selection within the filtered list
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Whether the user is currently filtering/searching
    pub is_filtering: bool,
    /// Current filter/search text
    pub filter_text: String,
}

impl UiState {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            selected_index: 0,
            viewport: ViewportState {
                offset: 0,
                height: height.saturating_sub(2), // Header and filter line
                width,
            },
            is_filtering: false,
            filter_text: String::new(),
        }
    }
}
