//! Integration tests for cmdpanel-core
//!
//! These tests verify that the core functionality works together correctly
//! by testing complete workflows end-to-end: the dispatcher on its own, and
//! the catalog client and websocket transport against local servers.

use cmdpanel_core::catalog::{ArgumentType, Catalog};
use cmdpanel_core::channel::{ChannelId, ChannelSignal};
use cmdpanel_core::client::CatalogClient;
use cmdpanel_core::endpoints::Endpoints;
use cmdpanel_core::error::Error;
use cmdpanel_core::form::InputKind;
use cmdpanel_core::output::CATALOG_LOAD_FAILED;
use cmdpanel_core::panel::{Effect, Event, Panel};
use cmdpanel_core::request::ExecutionRequest;
use cmdpanel_core::transport;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

fn load(panel: &mut Panel, body: &str) {
    panel.dispatch(Event::CatalogLoaded(Catalog::from_json(body).unwrap()));
}

fn set_field(panel: &mut Panel, name: &str, value: &str) {
    panel.dispatch(Event::FieldChanged {
        name: name.to_string(),
        value: value.to_string(),
    });
}

fn submit(panel: &mut Panel) -> (Vec<Effect>, ChannelId, ExecutionRequest) {
    let effects = panel.dispatch(Event::FormSubmitted);
    let (channel, request) = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Open { channel, request } => Some((*channel, request.clone())),
            _ => None,
        })
        .unwrap();
    (effects, channel, request)
}

/// Test the full echo scenario from catalog to streamed output
#[test]
fn test_echo_scenario() {
    let mut panel = Panel::default();
    load(&mut panel, r#"{"echo": {"text": "str"}}"#);

    let names: Vec<&str> = panel.catalog().names().collect();
    assert_eq!(names, vec!["echo"]);

    panel.dispatch(Event::CommandSelected("echo".to_string()));
    let form = panel.form().unwrap();
    assert_eq!(form.fields().len(), 1);
    assert_eq!(form.fields()[0].label(), "text");
    assert_eq!(form.fields()[0].input_kind(), InputKind::Text);

    set_field(&mut panel, "text", "hi");
    let (_, channel, request) = submit(&mut panel);
    assert_eq!(
        request.to_message().unwrap(),
        r#"{"cmd":"echo","args":{"text":"hi"}}"#
    );

    panel.dispatch(Event::Channel(channel, ChannelSignal::Opened));
    panel.dispatch(Event::Channel(channel, ChannelSignal::Frame("h".to_string())));
    panel.dispatch(Event::Channel(channel, ChannelSignal::Frame("i".to_string())));
    panel.dispatch(Event::Channel(channel, ChannelSignal::Closed));

    assert_eq!(panel.output().text(), "hi");
}

/// Test that one input is produced per argument, numeric iff the tag is `int`
#[test]
fn test_form_matches_schema() {
    let mut panel = Panel::default();
    load(
        &mut panel,
        r#"{"scan": {"host": "str", "[-p]": "int", "mode": "bool", "retries": "int"}}"#,
    );

    panel.dispatch(Event::CommandSelected("scan".to_string()));
    let form = panel.form().unwrap();
    let schema = panel.catalog().get("scan").unwrap();

    assert_eq!(form.fields().len(), schema.len());
    for (field, (name, argument_type)) in form.fields().iter().zip(schema.iter()) {
        assert_eq!(field.label(), name);
        assert_eq!(
            field.input_kind() == InputKind::Numeric,
            argument_type == ArgumentType::Integer
        );
    }
}

/// Test that reopening for another command does not leak values
#[test]
fn test_reopening_form_clears_previous_values() {
    let mut panel = Panel::default();
    load(&mut panel, r#"{"a": {"shared": "str"}, "b": {"shared": "str"}}"#);

    panel.dispatch(Event::CommandSelected("a".to_string()));
    set_field(&mut panel, "shared", "from a");

    panel.dispatch(Event::CommandSelected("b".to_string()));
    let form = panel.form().unwrap();
    assert_eq!(form.command(), "b");
    assert_eq!(form.field("shared").unwrap().value, "");

    panel.dispatch(Event::CommandSelected("a".to_string()));
    assert_eq!(panel.form().unwrap().field("shared").unwrap().value, "");
}

/// Test the exact outbound message for a two argument command
#[test]
fn test_submit_sends_exact_message() {
    let mut panel = Panel::default();
    load(&mut panel, r#"{"foo": {"a": "int", "b": "str"}}"#);

    panel.dispatch(Event::CommandSelected("foo".to_string()));
    set_field(&mut panel, "a", "1");
    set_field(&mut panel, "b", "2");
    let (effects, _, request) = submit(&mut panel);

    assert_eq!(effects.len(), 1);
    assert_eq!(
        request.to_message().unwrap(),
        r#"{"cmd":"foo","args":{"a":"1","b":"2"}}"#
    );
}

/// Test that a second execution replaces the first without interleaving
#[test]
fn test_second_execution_closes_first() {
    let mut panel = Panel::default();
    load(&mut panel, r#"{"tail": {"file": "str"}}"#);

    panel.dispatch(Event::CommandSelected("tail".to_string()));
    set_field(&mut panel, "file", "one.log");
    let (_, first, _) = submit(&mut panel);
    panel.dispatch(Event::Channel(first, ChannelSignal::Opened));
    panel.dispatch(Event::Channel(first, ChannelSignal::Frame("one".to_string())));

    panel.dispatch(Event::CommandSelected("tail".to_string()));
    set_field(&mut panel, "file", "two.log");
    let (effects, second, _) = submit(&mut panel);

    assert_eq!(effects[0], Effect::Close(first));
    assert!(matches!(effects[1], Effect::Open { channel, .. } if channel == second));
    assert!(panel.output().is_empty());

    panel.dispatch(Event::Channel(first, ChannelSignal::Frame("late".to_string())));
    panel.dispatch(Event::Channel(second, ChannelSignal::Opened));
    panel.dispatch(Event::Channel(second, ChannelSignal::Frame("two".to_string())));
    panel.dispatch(Event::Channel(first, ChannelSignal::Error("gone".to_string())));

    assert_eq!(panel.output().text(), "two");
}

async fn serve_http_once(response: String) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buffer).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }
        assert!(request.starts_with(b"GET /api/commands "));
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    Url::parse(&format!("http://{address}")).unwrap()
}

fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Test fetching a catalog over HTTP
#[tokio::test]
async fn test_fetch_catalog() {
    let base = serve_http_once(http_response(
        "200 OK",
        r#"{"echo": {"text": "str"}, "count": {"n": "int"}}"#,
    ))
    .await;
    let client = CatalogClient::new(Endpoints::new(base).unwrap());

    let catalog = client.fetch_catalog().await.unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get("count").unwrap().get("n"),
        Some(ArgumentType::Integer)
    );
}

/// Test that a non-JSON body is a parse failure
#[tokio::test]
async fn test_fetch_catalog_non_json() {
    let base = serve_http_once(http_response("200 OK", "<html>not json</html>")).await;
    let client = CatalogClient::new(Endpoints::new(base).unwrap());

    let result = client.fetch_catalog().await;
    assert!(matches!(result, Err(Error::CatalogParse(_))));
}

/// Test that an error status is a request failure
#[tokio::test]
async fn test_fetch_catalog_error_status() {
    let base = serve_http_once(http_response("500 Internal Server Error", "{}")).await;
    let client = CatalogClient::new(Endpoints::new(base).unwrap());

    let result = client.fetch_catalog().await;
    assert!(matches!(result, Err(Error::CatalogRequest(_))));
}

/// Test the failure scenario: unreachable server, fixed message, no commands
#[tokio::test]
async fn test_fetch_catalog_unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let base = Url::parse(&format!("http://{address}")).unwrap();
    let client = CatalogClient::new(Endpoints::new(base).unwrap());

    let error = client.fetch_catalog().await.unwrap_err();
    assert!(matches!(error, Error::CatalogRequest(_)));

    let mut panel = Panel::default();
    panel.dispatch(Event::CatalogFailed(error.to_string()));
    assert_eq!(panel.output().text(), CATALOG_LOAD_FAILED);
    assert!(panel.catalog().is_empty());
}

/// Test a websocket execution: request sent once, frames relayed in order
#[tokio::test]
async fn test_execute_streams_frames() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();

        let first = ws.next().await.unwrap().unwrap();
        ws.send(Message::Text("h".to_string())).await.unwrap();
        ws.send(Message::Text("i".to_string())).await.unwrap();
        ws.close(None).await.unwrap();
        while let Some(Ok(_)) = ws.next().await {}

        first
    });

    let endpoints = Endpoints::new(Url::parse(&format!("http://{address}")).unwrap()).unwrap();
    let mut args = indexmap::IndexMap::new();
    args.insert("text".to_string(), "hi".to_string());
    let request = ExecutionRequest::new("echo", args);

    let signals: Vec<ChannelSignal> =
        transport::execute(endpoints.execute_url().unwrap(), request)
            .collect()
            .await;

    assert_eq!(
        signals,
        vec![
            ChannelSignal::Opened,
            ChannelSignal::Frame("h".to_string()),
            ChannelSignal::Frame("i".to_string()),
            ChannelSignal::Closed,
        ]
    );

    let first = server.await.unwrap();
    assert_eq!(
        first,
        Message::Text(r#"{"cmd":"echo","args":{"text":"hi"}}"#.to_string())
    );
}

/// Test that a refused connection reports an error then closes
#[tokio::test]
async fn test_execute_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("ws://{address}/ws/execute")).unwrap();
    let signals: Vec<ChannelSignal> =
        transport::execute(url, ExecutionRequest::new("echo", Default::default()))
            .collect()
            .await;

    assert_eq!(signals.len(), 2);
    assert!(matches!(signals[0], ChannelSignal::Error(_)));
    assert_eq!(signals[1], ChannelSignal::Closed);
}
