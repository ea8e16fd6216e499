use iced::widget::{button, column, text, text_input, Column};
use iced::Length;

use crate::app::Message;
use cmdpanel_core::form::{FormField, InputKind};

pub fn command_button<'a>(name: &str, signature: String) -> button::Button<'a, Message> {
    let label = if signature.is_empty() {
        name.to_string()
    } else {
        format!("{name}  {signature}")
    };

    button(text(label).size(16))
        .width(Length::Fill)
        .padding(10)
        .style(button::secondary)
        .on_press(Message::CommandSelected(name.to_string()))
}

/// A labelled input for one argument.
///
/// Enter in any field submits the form. Numeric fields never hold anything
/// but a (partial) integer, since the panel drops inadmissible edits.
pub fn field_input(field: &FormField) -> Column<'_, Message> {
    let placeholder = match field.input_kind() {
        InputKind::Numeric => "integer",
        InputKind::Text => "text",
    };

    let name = field.name.clone();
    let input = text_input(placeholder, &field.value)
        .on_input(move |value| Message::FieldChanged(name.clone(), value))
        .on_submit(Message::SubmitForm)
        .padding(8)
        .size(16);

    column![text(field.label()).size(14), input].spacing(5)
}

pub fn action_buttons() -> iced::widget::Row<'static, Message> {
    iced::widget::row![
        button(text("Execute").size(16))
            .padding([10, 20])
            .style(button::success)
            .on_press(Message::SubmitForm),
        button(text("Cancel").size(16))
            .padding([10, 20])
            .style(button::secondary)
            .on_press(Message::CloseModal),
    ]
    .spacing(10)
}
