//! The control panel state and its event dispatcher.
//!
//! Front ends feed [`Event`]s into [`Panel::dispatch`] and carry out the
//! returned [`Effect`]s. All state lives here: the catalog, the open form
//! (the modal is visible exactly while a form is open), the output buffer and
//! the single execution channel.

use log::{error, info, warn};

use crate::catalog::Catalog;
use crate::channel::{ChannelId, ChannelSignal, ChannelSlot};
use crate::form::FormState;
use crate::output::{OutputBuffer, CATALOG_LOAD_FAILED, CHANNEL_FAILED};
use crate::request::ExecutionRequest;

#[derive(Debug, Clone)]
pub enum Event {
    CatalogLoaded(Catalog),
    CatalogFailed(String),
    CommandSelected(String),
    FieldChanged { name: String, value: String },
    ModalClosed,
    FormSubmitted,
    Channel(ChannelId, ChannelSignal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Connect a new channel and send `request` once it is established.
    Open {
        channel: ChannelId,
        request: ExecutionRequest,
    },
    /// Tear down the transport of a replaced channel.
    Close(ChannelId),
    /// Keep the output view on its newest content.
    ScrollToEnd,
}

#[derive(Debug, Default)]
pub struct Panel {
    catalog: Catalog,
    form: Option<FormState>,
    form_error: Option<String>,
    output: OutputBuffer,
    channel: ChannelSlot,
}

impl Panel {
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::CatalogLoaded(catalog) => {
                info!("Loaded {} commands", catalog.len());
                self.catalog = catalog;
                Vec::new()
            }
            Event::CatalogFailed(reason) => {
                error!("Error fetching commands: {reason}");
                self.catalog = Catalog::default();
                self.output.show(CATALOG_LOAD_FAILED);
                Vec::new()
            }
            Event::CommandSelected(name) => {
                self.select_command(&name);
                Vec::new()
            }
            Event::FieldChanged { name, value } => {
                if let Some(form) = self.form.as_mut() {
                    form.set_value(&name, value);
                }
                Vec::new()
            }
            Event::ModalClosed => {
                self.form = None;
                self.form_error = None;
                Vec::new()
            }
            Event::FormSubmitted => self.submit(),
            Event::Channel(id, signal) => self.on_channel_signal(id, signal),
        }
    }

    fn select_command(&mut self, name: &str) {
        let Some(schema) = self.catalog.get(name) else {
            warn!("Selected command `{name}` is not in the catalog");
            return;
        };

        self.form = Some(FormState::open(name, schema));
        self.form_error = None;
    }

    fn submit(&mut self) -> Vec<Effect> {
        let Some(form) = self.form.as_ref() else {
            return Vec::new();
        };

        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => {
                self.form_error = Some(e.to_string());
                return Vec::new();
            }
        };

        self.output.clear();
        self.form = None;
        self.form_error = None;

        let mut effects = Vec::new();
        let (prior, channel) = self.channel.begin();
        if let Some(prior) = prior {
            info!("Closing channel {prior} before opening {channel}");
            effects.push(Effect::Close(prior));
        }

        info!("Opening channel {channel} for `{request}`");
        effects.push(Effect::Open { channel, request });
        effects
    }

    fn on_channel_signal(&mut self, id: ChannelId, signal: ChannelSignal) -> Vec<Effect> {
        if !self.channel.is_live(id) {
            return Vec::new();
        }

        match signal {
            ChannelSignal::Opened => {
                self.channel.mark_open(id);
                Vec::new()
            }
            ChannelSignal::Frame(text) => {
                self.output.append(&text);
                vec![Effect::ScrollToEnd]
            }
            ChannelSignal::Error(reason) => {
                error!("WebSocket error on channel {id}: {reason}");
                self.output.append(CHANNEL_FAILED);
                vec![Effect::ScrollToEnd]
            }
            ChannelSignal::Closed => {
                self.channel.mark_closed(id);
                info!("WebSocket connection {id} closed");
                Vec::new()
            }
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The open form, if the modal is showing.
    #[must_use]
    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    #[must_use]
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    #[must_use]
    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    #[must_use]
    pub fn channel(&self) -> &ChannelSlot {
        &self.channel
    }
}
