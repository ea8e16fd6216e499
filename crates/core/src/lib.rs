//! Command Panel Core Library
//!
//! This crate provides the core functionality for cmdpanel, a control panel
//! that discovers the commands a server offers, collects their arguments
//! through a generated form and streams their output back over a websocket.
//!
//! # Key Features
//!
//! - **Catalog**: Parse and validate the server's command/argument descriptor
//! - **Forms**: Build a typed, ordered argument form per command
//! - **Dispatcher**: A single event-driven state machine shared by all front ends
//! - **Channels**: At most one live execution stream, replaced last-writer-wins
//! - **Transport**: HTTP catalog fetch and websocket execution streaming
//!
//! # Examples
//!
//! Driving the dispatcher by hand:
//!
//! ```
//! use cmdpanel_core::catalog::Catalog;
//! use cmdpanel_core::panel::{Effect, Event, Panel};
//!
//! let mut panel = Panel::default();
//! let catalog = Catalog::from_json(r#"{"echo": {"text": "str"}}"#)?;
//! panel.dispatch(Event::CatalogLoaded(catalog));
//! panel.dispatch(Event::CommandSelected("echo".to_string()));
//! panel.dispatch(Event::FieldChanged {
//!     name: "text".to_string(),
//!     value: "hi".to_string(),
//! });
//!
//! let effects = panel.dispatch(Event::FormSubmitted);
//! assert!(matches!(effects.as_slice(), [Effect::Open { .. }]));
//! # Ok::<(), cmdpanel_core::error::Error>(())
//! ```

pub mod catalog;
pub mod channel;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod form;
pub mod output;
pub mod panel;
pub mod request;
pub mod transport;
