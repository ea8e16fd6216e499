use cmdpanel_core::catalog::Catalog;
use cmdpanel_core::channel::{ChannelId, ChannelSignal};

#[derive(Debug, Clone)]
pub enum Message {
    CatalogLoaded(Result<Catalog, String>),
    CommandSelected(String),
    FieldChanged(String, String),
    CloseModal,
    SubmitForm,
    Channel(ChannelId, ChannelSignal),
}
