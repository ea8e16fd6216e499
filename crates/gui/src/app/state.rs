use iced::task::Handle;
use iced::widget::scrollable::{self, RelativeOffset};
use iced::{Element, Task};
use log::debug;
use url::Url;

use crate::app::Message;
use cmdpanel_core::channel::{ChannelId, ChannelSignal};
use cmdpanel_core::client::CatalogClient;
use cmdpanel_core::endpoints::Endpoints;
use cmdpanel_core::error::Result;
use cmdpanel_core::panel::{Effect, Event, Panel};
use cmdpanel_core::transport;

pub struct CommandPanel {
    pub panel: Panel,
    client: CatalogClient,
    execute_url: Url,
    running: Option<(ChannelId, Handle)>,
}

impl CommandPanel {
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let execute_url = endpoints.execute_url()?;

        Ok(Self {
            panel: Panel::default(),
            client: CatalogClient::new(endpoints),
            execute_url,
            running: None,
        })
    }

    /// Hands the initial state to iced along with the catalog request.
    pub fn boot(self) -> (Self, Task<Message>) {
        let client = self.client.clone();
        let fetch = Task::perform(
            async move { client.fetch_catalog().await.map_err(|e| e.to_string()) },
            Message::CatalogLoaded,
        );

        (self, fetch)
    }

    pub fn title(&self) -> String {
        match self.panel.form() {
            Some(form) => format!("CmdPanel - {}", form.title()),
            None => "CmdPanel".to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let event = match message {
            Message::CatalogLoaded(Ok(catalog)) => Event::CatalogLoaded(catalog),
            Message::CatalogLoaded(Err(reason)) => Event::CatalogFailed(reason),
            Message::CommandSelected(name) => Event::CommandSelected(name),
            Message::FieldChanged(name, value) => Event::FieldChanged { name, value },
            Message::CloseModal => Event::ModalClosed,
            Message::SubmitForm => Event::FormSubmitted,
            Message::Channel(id, signal) => {
                if signal == ChannelSignal::Closed {
                    self.forget_channel(id);
                }
                Event::Channel(id, signal)
            }
        };

        let effects = self.panel.dispatch(event);
        Task::batch(effects.into_iter().map(|effect| self.perform(effect)))
    }

    pub fn view(&self) -> Element<Message> {
        crate::ui::views::main_view(self)
    }

    /// The channel whose transport task is still attached, if any.
    pub fn running_channel(&self) -> Option<ChannelId> {
        self.running.as_ref().map(|(id, _)| *id)
    }

    fn perform(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::Open { channel, request } => {
                let signals = transport::execute(self.execute_url.clone(), request);
                let (task, handle) =
                    Task::run(signals, move |signal| Message::Channel(channel, signal)).abortable();

                self.running = Some((channel, handle));
                task
            }
            Effect::Close(channel) => {
                if let Some(handle) = self.forget_channel(channel) {
                    debug!("Aborting transport of channel {channel}");
                    handle.abort();
                }
                Task::none()
            }
            Effect::ScrollToEnd => {
                scrollable::snap_to(crate::ui::views::output_id(), RelativeOffset::END)
            }
        }
    }

    fn forget_channel(&mut self, channel: ChannelId) -> Option<Handle> {
        match self.running.take() {
            Some((id, handle)) if id == channel => Some(handle),
            other => {
                self.running = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdpanel_core::catalog::Catalog;

    fn create_test_app() -> CommandPanel {
        let endpoints = Endpoints::new(Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let mut app = CommandPanel::new(endpoints).unwrap();
        let catalog =
            Catalog::from_json(r#"{"echo": {"text": "str"}, "sleep": {"seconds": "int"}}"#)
                .unwrap();
        let _ = app.update(Message::CatalogLoaded(Ok(catalog)));
        app
    }

    fn submit(app: &mut CommandPanel, command: &str, field: &str, value: &str) {
        let _ = app.update(Message::CommandSelected(command.to_string()));
        let _ = app.update(Message::FieldChanged(field.to_string(), value.to_string()));
        let _ = app.update(Message::SubmitForm);
    }

    #[test]
    fn test_execute_url_follows_server_scheme() {
        let endpoints = Endpoints::new(Url::parse("https://panel.example.com").unwrap()).unwrap();
        let app = CommandPanel::new(endpoints).unwrap();
        assert_eq!(app.execute_url.as_str(), "wss://panel.example.com/ws/execute");
    }

    #[test]
    fn test_title_tracks_modal() {
        let mut app = create_test_app();
        assert_eq!(app.title(), "CmdPanel");

        let _ = app.update(Message::CommandSelected("echo".to_string()));
        assert_eq!(app.title(), "CmdPanel - Execute: echo");

        let _ = app.update(Message::CloseModal);
        assert!(app.panel.form().is_none());
    }

    #[test]
    fn test_catalog_failure_shows_message() {
        let endpoints = Endpoints::new(Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let mut app = CommandPanel::new(endpoints).unwrap();

        let _ = app.update(Message::CatalogLoaded(Err("connection refused".to_string())));

        assert!(app.panel.catalog().is_empty());
        assert_eq!(
            app.panel.output().text(),
            cmdpanel_core::output::CATALOG_LOAD_FAILED
        );
    }

    #[test]
    fn test_numeric_field_rejects_letters() {
        let mut app = create_test_app();
        let _ = app.update(Message::CommandSelected("sleep".to_string()));
        let _ = app.update(Message::FieldChanged("seconds".to_string(), "5".to_string()));
        let _ = app.update(Message::FieldChanged("seconds".to_string(), "5s".to_string()));

        assert_eq!(app.panel.form().unwrap().field("seconds").unwrap().value, "5");
    }

    #[test]
    fn test_resubmit_replaces_running_channel() {
        let mut app = create_test_app();

        submit(&mut app, "echo", "text", "one");
        let first = app.running_channel().unwrap();

        submit(&mut app, "echo", "text", "two");
        let second = app.running_channel().unwrap();
        assert_ne!(first, second);

        let _ = app.update(Message::Channel(first, ChannelSignal::Frame("late".to_string())));
        let _ = app.update(Message::Channel(second, ChannelSignal::Opened));
        let _ = app.update(Message::Channel(second, ChannelSignal::Frame("two".to_string())));
        assert_eq!(app.panel.output().text(), "two");

        let _ = app.update(Message::Channel(second, ChannelSignal::Closed));
        assert_eq!(app.running_channel(), None);
    }

    #[test]
    fn test_invalid_submit_keeps_modal_open() {
        let mut app = create_test_app();
        let _ = app.update(Message::CommandSelected("sleep".to_string()));
        let _ = app.update(Message::SubmitForm);

        assert!(app.panel.form().is_some());
        assert_eq!(app.panel.form_error(), Some("Missing argument: seconds"));
        assert_eq!(app.running_channel(), None);
    }
}
