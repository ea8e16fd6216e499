use std::fmt::{Display, Formatter};
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Color::{DarkBlue, DarkGreen, Reset, Yellow};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, event, execute, queue, terminal, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::types::CycleDirection::{Down, Up};
use super::types::{CommandChoice, CycleDirection, UiState, ViewportState};
use cmdpanel_core::catalog::Catalog;
use cmdpanel_core::error::Result;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// One selectable line of the picker, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CommandRow {
    index: usize,
    name: String,
    signature: String,
}

impl Display for CommandRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.signature.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.signature)
        }
    }
}

fn rows_for(catalog: &Catalog) -> Vec<CommandRow> {
    catalog
        .iter()
        .enumerate()
        .map(|(index, (name, schema))| CommandRow {
            index,
            name: name.to_string(),
            signature: schema.to_string(),
        })
        .collect()
}

/// What a key press asks of the picker loop.
#[derive(Debug, PartialEq)]
enum KeyOutcome {
    Choose(CommandChoice),
    Update(UiState),
    Move(CycleDirection),
    Bell,
    Ignore,
}

fn redraw_ui(ui_state: &UiState, rows: &[CommandRow], visible: &[usize]) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(ui_state, visible.len())?;

    if visible.is_empty() {
        queue!(
            stdout,
            MoveTo(0, 1),
            SetForegroundColor(Color::Red),
            Print("No matching commands!".to_string()),
            SetAttribute(Attribute::Reset),
            cursor::MoveToNextLine(1)
        )?;
    } else {
        print_commands_with_selection(ui_state, rows, visible)?;
    }

    if ui_state.is_filtering {
        queue!(
            stdout,
            MoveTo(0, ui_state.viewport.height + 1),
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

/// Prompts the user to choose a command from the catalog
pub fn prompt_for_command_choice(catalog: &Catalog) -> Result<CommandChoice> {
    let mut stdout = stdout();

    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;

    let _raw_mode_guard = RawModeGuard; // Restores the terminal when this goes out of scope
    stdout.execute(EnableMouseCapture)?;

    let rows = rows_for(catalog);
    let (width, height) = terminal::size()?;

    let mut ui_state = UiState::new(width, height);
    let mut visible = filter_rows(&rows, &ui_state.filter_text);
    let mut down_row: Option<u16> = None;

    redraw_ui(&ui_state, &rows, &visible)?;

    loop {
        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        let mut new_ui_state: Option<UiState> = None;
        let mut direction: Option<CycleDirection> = None;

        match event::read()? {
            Event::Mouse(MouseEvent {
                kind,
                row,
                modifiers,
                ..
            }) if modifiers.is_empty() => match kind {
                MouseEventKind::Down(MouseButton::Left) => down_row = Some(row),
                MouseEventKind::Up(MouseButton::Left) => {
                    let clicked = down_row
                        .take()
                        .filter(|r| *r == row)
                        .and_then(|r| clicked_position(&ui_state, r, visible.len()));
                    if let Some(position) = clicked {
                        return Ok(CommandChoice::Name(rows[visible[position]].name.clone()));
                    }
                }
                MouseEventKind::ScrollDown => direction = Some(Down),
                MouseEventKind::ScrollUp => direction = Some(Up),
                _ => {}
            },
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                match handle_key_event(key_event, &ui_state, &rows, &visible) {
                    KeyOutcome::Choose(choice) => return Ok(choice),
                    KeyOutcome::Update(state) => new_ui_state = Some(state),
                    KeyOutcome::Move(d) => direction = Some(d),
                    KeyOutcome::Bell => execute!(stdout, Print("\x07"))?,
                    KeyOutcome::Ignore => {}
                }
            }
            Event::Resize(width, height) => {
                new_ui_state = Some(handle_resize(width, height, &ui_state, visible.len()));
            }
            _ => {}
        }

        if let Some(mut state) = new_ui_state {
            if state.filter_text != ui_state.filter_text {
                visible = filter_rows(&rows, &state.filter_text);
                state.selected_index = 0;
                state.viewport.offset = 0;
            }
            ui_state = state;
            redraw_ui(&ui_state, &rows, &visible)?;
        }

        if let Some(direction) = direction {
            let moved = move_selected_index(&ui_state, visible.len(), direction);
            if moved != ui_state {
                ui_state = moved;
                redraw_ui(&ui_state, &rows, &visible)?;
            }
        }
    }
}

/// Maps a clicked terminal row to a position in the visible list
fn clicked_position(ui_state: &UiState, row: u16, visible_count: usize) -> Option<usize> {
    if row == 0 || row > ui_state.viewport.height {
        return None;
    }

    let position = (row - 1) as usize + ui_state.viewport.offset;
    (position < visible_count).then_some(position)
}

/// Handle keyboard events in the command selection UI
fn handle_key_event(
    key_event: KeyEvent,
    ui_state: &UiState,
    rows: &[CommandRow],
    visible: &[usize],
) -> KeyOutcome {
    match key_event.code {
        KeyCode::Up => KeyOutcome::Move(Up),
        KeyCode::Down => KeyOutcome::Move(Down),
        KeyCode::Enter => match visible.get(ui_state.selected_index) {
            Some(row) => KeyOutcome::Choose(CommandChoice::Name(rows[*row].name.clone())),
            None => KeyOutcome::Bell,
        },
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyOutcome::Choose(CommandChoice::Quit)
        }
        KeyCode::Backspace if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            if updated_state.filter_text.pop().is_none() {
                updated_state.is_filtering = false;
            }
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text.clear();
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Char('k') => KeyOutcome::Move(Up),
        KeyCode::Char('j') => KeyOutcome::Move(Down),
        KeyCode::Char('q') => KeyOutcome::Choose(CommandChoice::Quit),
        _ => KeyOutcome::Ignore,
    }
}

/// Handle window resize events
fn handle_resize(width: u16, height: u16, ui_state: &UiState, visible_count: usize) -> UiState {
    let new_height = height.saturating_sub(2);
    let mut ui_state = ui_state.clone();
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    match new_height.cmp(&ui_state.viewport.height) {
        // Growing taller: show more items above the current selection
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less
            if ui_state.selected_index >= new_viewport.offset + new_height as usize =>
        {
            new_viewport.offset = ui_state
                .selected_index
                .saturating_sub((new_height as usize).saturating_sub(1));

            if new_viewport.offset + new_height as usize > visible_count {
                new_viewport.offset = visible_count.saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

/// Print the header for the command selection UI
fn print_header(ui_state: &UiState, visible_count: usize) -> Result<()> {
    let mut stdout = stdout();

    let left_padding = "  ";

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        format!(
            "/: Filter   |   j/k: Move   |   {}/{}   |   q: Quit",
            pad_to_width_of(ui_state.selected_index + 1, visible_count),
            visible_count
        )
    };

    let right_padding = " ".repeat(
        (ui_state.viewport.width as usize).saturating_sub(left_padding.len() + instructions.len()),
    );

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = max_number.to_string().len();
    format!("{:>width$}", value.to_string())
}

/// Formats a row as `[i] name <arg:type> ...`, padded to the terminal width
fn format_row(row: &CommandRow, row_count: usize, terminal_width: u16) -> String {
    let index = pad_to_width_of(row.index + 1, row_count);
    let content = format!("[{index}] {row}");

    let padding = (terminal_width as usize).saturating_sub(content.chars().count());
    format!("{content}{}", " ".repeat(padding))
}

/// Lines listing every command as the picker shows them, without padding
#[must_use]
pub fn catalog_listing(catalog: &Catalog) -> Vec<String> {
    let rows = rows_for(catalog);
    rows.iter().map(|row| format_row(row, rows.len(), 0)).collect()
}

/// Print the visible commands with the selected one highlighted
fn print_commands_with_selection(
    ui_state: &UiState,
    rows: &[CommandRow],
    visible: &[usize],
) -> Result<()> {
    let mut stdout = stdout();
    let viewport = &ui_state.viewport;

    let visible_rows = visible
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (line, (position, row)) in visible_rows.enumerate() {
        queue!(stdout, MoveTo(0, line as u16 + 1), Clear(ClearType::CurrentLine))?;

        if position == ui_state.selected_index {
            queue!(
                stdout,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            )?;
        }

        queue!(
            stdout,
            Print(format_row(&rows[*row], rows.len(), viewport.width)),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(Reset),
            SetForegroundColor(Reset),
        )?;
    }

    Ok(())
}

/// Move the selected index in the given direction, wrapping at either end
fn move_selected_index(
    ui_state: &UiState,
    visible_count: usize,
    direction: CycleDirection,
) -> UiState {
    if visible_count == 0 {
        return ui_state.clone();
    }

    let mut ui_state = ui_state.clone();
    let height = (ui_state.viewport.height as usize).max(1);
    let current = ui_state.selected_index;

    let new_index = match direction {
        Up if current == 0 => {
            let last = visible_count - 1;
            ui_state.viewport.offset = last.saturating_sub(height - 1);
            last
        }
        Up => {
            let new_index = current - 1;
            if new_index < ui_state.viewport.offset {
                ui_state.viewport.offset = new_index;
            }
            new_index
        }
        Down => {
            let new_index = (current + 1) % visible_count;
            if new_index < current {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + height {
                ui_state.viewport.offset = new_index + 1 - height;
            }
            new_index
        }
    };

    ui_state.selected_index = new_index;
    ui_state
}

/// Positions of the rows matching the filter, in catalog order.
///
/// A numeric filter matches on the displayed index, anything else is a fuzzy
/// match against the row text.
fn filter_rows(rows: &[CommandRow], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..rows.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let by_index = predicate.parse::<usize>().is_ok();

    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            if by_index {
                (row.index + 1).to_string().contains(predicate)
            } else {
                matcher.fuzzy_match(&row.to_string(), predicate).is_some()
            }
        })
        .map(|(position, _)| position)
        .collect()
}
