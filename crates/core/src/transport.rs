//! Websocket transport for one execution channel.

use futures_util::stream::{self, Stream};
use futures_util::{SinkExt, StreamExt};
use log::debug;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::channel::ChannelSignal;
use crate::request::ExecutionRequest;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

enum Phase {
    Connect(Url, ExecutionRequest),
    Streaming(Box<WsStream>),
    Closing,
    Done,
}

/// Runs one execution against `url`.
///
/// The stream yields `Opened` once the request has been sent, one `Frame` per
/// inbound payload in delivery order, and finally `Closed`. Failures yield an
/// `Error` before `Closed`. Dropping the stream drops the connection.
pub fn execute(url: Url, request: ExecutionRequest) -> impl Stream<Item = ChannelSignal> {
    stream::unfold(Phase::Connect(url, request), |phase| async move {
        match phase {
            Phase::Connect(url, request) => Some(connect(url, request).await),
            Phase::Streaming(mut socket) => match next_frame(&mut socket).await {
                Some(ChannelSignal::Error(reason)) => {
                    Some((ChannelSignal::Error(reason), Phase::Closing))
                }
                Some(signal) => Some((signal, Phase::Streaming(socket))),
                None => Some((ChannelSignal::Closed, Phase::Done)),
            },
            Phase::Closing => Some((ChannelSignal::Closed, Phase::Done)),
            Phase::Done => None,
        }
    })
}

async fn connect(url: Url, request: ExecutionRequest) -> (ChannelSignal, Phase) {
    let message = match request.to_message() {
        Ok(message) => message,
        Err(e) => return (ChannelSignal::Error(e.to_string()), Phase::Closing),
    };

    debug!("Connecting to `{url}`");
    let mut socket = match connect_async(url.as_str()).await {
        Ok((socket, _response)) => socket,
        Err(e) => return (ChannelSignal::Error(e.to_string()), Phase::Closing),
    };

    if let Err(e) = socket.send(Message::Text(message)).await {
        return (ChannelSignal::Error(e.to_string()), Phase::Closing);
    }

    (ChannelSignal::Opened, Phase::Streaming(Box::new(socket)))
}

/// Reads until the next payload. `None` once the connection is finished.
async fn next_frame(socket: &mut WsStream) -> Option<ChannelSignal> {
    loop {
        match socket.next().await? {
            Ok(Message::Text(text)) => return Some(ChannelSignal::Frame(text)),
            Ok(Message::Binary(bytes)) => {
                return Some(ChannelSignal::Frame(
                    String::from_utf8_lossy(&bytes).into_owned(),
                ))
            }
            Ok(Message::Close(frame)) => {
                debug!("Server closed the connection: {frame:?}");
                return None;
            }
            Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {}
            Err(e) => return Some(ChannelSignal::Error(e.to_string())),
        }
    }
}
