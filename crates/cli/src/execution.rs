//! Runs a submitted form against the server and relays its output.

use std::io::Write;

use futures_util::StreamExt;
use log::debug;
use url::Url;

use cmdpanel_core::channel::ChannelSignal;
use cmdpanel_core::error::{Error, Result};
use cmdpanel_core::panel::{Effect, Event, Panel};
use cmdpanel_core::transport;

/// Carries out the effects of a form submission.
///
/// Every signal of the opened channel is fed back through the panel, and
/// whatever the panel adds to its output buffer is written to `out` as it
/// arrives.
///
/// # Errors
///
/// Returns [`Error::ExecutionFailed`] if the channel reported an error, or an
/// IO error if `out` cannot be written.
pub async fn run_effects<W: Write>(
    panel: &mut Panel,
    effects: Vec<Effect>,
    execute_url: &Url,
    out: &mut W,
) -> Result<()> {
    let Some((channel, request)) = effects.into_iter().find_map(|effect| match effect {
        Effect::Open { channel, request } => Some((channel, request)),
        _ => None,
    }) else {
        return Ok(());
    };

    let command = request.cmd.clone();
    let mut written = panel.output().len();
    let mut failure: Option<String> = None;

    let mut signals = Box::pin(transport::execute(execute_url.clone(), request));
    while let Some(signal) = signals.next().await {
        debug!("Channel {channel}: {signal:?}");

        if let ChannelSignal::Error(reason) = &signal {
            failure.get_or_insert_with(|| reason.clone());
        }

        panel.dispatch(Event::Channel(channel, signal));

        let text = panel.output().text();
        if text.len() > written {
            out.write_all(text[written..].as_bytes())?;
            out.flush()?;
            written = text.len();
        }
    }

    match failure {
        Some(reason) => Err(Error::ExecutionFailed(command, reason)),
        None => Ok(()),
    }
}
