use iced::widget::{center, column, container, mouse_area, opaque, scrollable, stack, text, Column};
use iced::{Color, Element, Font, Length};

use crate::app::{CommandPanel, Message};
use crate::ui::components;
use cmdpanel_core::catalog::Catalog;
use cmdpanel_core::form::FormState;

const OUTPUT_ID: &str = "output";

pub fn output_id() -> scrollable::Id {
    scrollable::Id::new(OUTPUT_ID)
}

pub fn main_view(app: &CommandPanel) -> Element<Message> {
    let content = column![
        text("Commands").size(24),
        command_list_view(app.panel.catalog()),
        text("Output").size(18),
        output_view(app.panel.output().text()),
    ]
    .spacing(15)
    .padding(20);

    let base = container(content).width(Length::Fill).height(Length::Fill);

    match app.panel.form() {
        Some(form) => modal(base, form_view(form, app.panel.form_error()), Message::CloseModal),
        None => base.into(),
    }
}

fn command_list_view(catalog: &Catalog) -> Element<Message> {
    let column = catalog.iter().fold(Column::new().spacing(5), |column, (name, schema)| {
        column.push(components::command_button(name, schema.to_string()))
    });

    scrollable(column)
        .height(Length::FillPortion(2))
        .width(Length::Fill)
        .into()
}

fn output_view(output: &str) -> Element<Message> {
    container(
        scrollable(text(output).font(Font::MONOSPACE).size(14).width(Length::Fill))
            .id(output_id())
            .height(Length::Fill)
            .width(Length::Fill),
    )
    .padding(10)
    .style(container::bordered_box)
    .width(Length::Fill)
    .height(Length::FillPortion(3))
    .into()
}

fn form_view<'a>(form: &'a FormState, error: Option<&'a str>) -> Element<'a, Message> {
    let mut details = Column::new()
        .spacing(15)
        .push(text(form.title()).size(20));

    for field in form.fields() {
        details = details.push(components::field_input(field));
    }

    if let Some(error) = error {
        details = details.push(text(error).size(14).color([0.8, 0.2, 0.2]));
    }

    details = details.push(components::action_buttons());

    container(details)
        .width(Length::Fixed(400.0))
        .padding(20)
        .style(container::rounded_box)
        .into()
}

/// Lays `content` over `base`. A click anywhere outside `content` sends `on_blur`.
fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.8,
                        ..Color::BLACK
                    }
                    .into()
                ),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
