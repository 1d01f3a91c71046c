//!
//! Subscribe and stream flash blocks over the JSON-RPC WebSocket endpoint.
//!

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{client::IntoClientRequest, http::HeaderValue, Message},
    MaybeTlsStream, WebSocketStream,
};

use crate::{
    config::Config,
    errors::{describe, StreamError},
    logging::{debug, info},
    transport::{connect_within, Payload, RawPayload, StreamHandle, Transport},
};

/// JSON-RPC method that starts the flash block subscription.
pub const SUBSCRIBE_METHOD: &str = "subscribe_FlashBlock";

/// Longest slice of a bad frame copied into an error.
const RAW_PREVIEW_CHARS: usize = 512;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

///
/// The subscription request sent right after connecting.
///
pub fn subscription_request() -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": SUBSCRIBE_METHOD,
        "params": [],
        "id": 1,
    })
}

///
/// JSON-RPC response wrapper around every flash block.
///
/// `result` is a byte string, which JSON carries as standard base64. Neither the
/// `jsonrpc` version nor a subscription id is checked.
///
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<String>,
}

///
/// Pull the raw payload out of one text or binary frame.
///
pub fn parse_envelope(frame: &[u8]) -> Result<RawPayload, StreamError> {
    let malformed = |reason: String| StreamError::Envelope {
        reason,
        raw: String::from_utf8_lossy(frame)
            .chars()
            .take(RAW_PREVIEW_CHARS)
            .collect(),
    };

    let envelope: Envelope = serde_json::from_slice(frame)
        .map_err(|err| malformed(format!("failed to parse JSON from server: {}", err)))?;
    let result = envelope
        .result
        .ok_or_else(|| malformed("message without a result field".into()))?;

    STANDARD
        .decode(result.as_bytes())
        .map_err(|err| malformed(format!("result is not a byte string: {}", err)))
}

///
/// Single-attempt WebSocket subscription to the flash block feed.
///
#[derive(Debug, Clone)]
pub struct WebSocketAdapter {
    url: String,
    auth_token: String,
    connect_timeout: Duration,
}

impl WebSocketAdapter {
    pub fn new(config: &Config) -> Self {
        Self {
            url: config.websocket_url.clone(),
            auth_token: config.auth_token.clone(),
            connect_timeout: config.websocket_connect_timeout(),
        }
    }
}

#[async_trait]
impl Transport for WebSocketAdapter {
    type Connection = Socket;
    type Handle = WebSocketStreamHandle;

    fn name(&self) -> &str {
        "WebSocket"
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn connect(&mut self) -> Result<Socket, StreamError> {
        let mut request = self
            .url
            .as_str()
            .into_client_request()
            .map_err(|err| StreamError::connect(&self.url, describe(&err)))?;
        let auth = HeaderValue::from_str(&self.auth_token)
            .map_err(|err| StreamError::connect(&self.url, format!("auth token rejected: {}", err)))?;
        request.headers_mut().insert("Authorization", auth);

        let (socket, response) = connect_within(&self.url, self.connect_timeout, async {
            connect_async(request).await.map_err(|err| describe(&err))
        })
        .await?;

        debug!(
            "[WebSocket] Handshake with {} answered {}",
            self.url,
            response.status()
        );

        Ok(socket)
    }

    async fn subscribe(&mut self, mut socket: Socket) -> Result<WebSocketStreamHandle, StreamError> {
        let request = subscription_request().to_string();

        socket
            .send(Message::Text(request.clone().into()))
            .await
            .map_err(|err| StreamError::Subscribe(describe(&err)))?;

        info!("[WebSocket] Subscription request sent: {}", request);

        Ok(WebSocketStreamHandle { socket })
    }
}

///
/// A live WebSocket subscription.
///
pub struct WebSocketStreamHandle {
    socket: Socket,
}

#[async_trait]
impl StreamHandle for WebSocketStreamHandle {
    async fn next(&mut self) -> Result<Payload, StreamError> {
        loop {
            let message = match self.socket.next().await {
                None => return Err(StreamError::EndOfStream),
                Some(Err(err)) => return Err(StreamError::Transport(describe(&err))),
                Some(Ok(message)) => message,
            };

            match message {
                Message::Text(text) => {
                    return parse_envelope(text.as_bytes()).map(Payload::Compressed)
                }
                Message::Binary(data) => return parse_envelope(&data).map(Payload::Compressed),
                Message::Close(_) => return Err(StreamError::EndOfStream),
                // Ping, pong and raw frames carry no payload.
                _ => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::net::TcpListener;
    use tokio_tungstenite::{
        accept_hdr_async,
        tungstenite::handshake::server::{ErrorResponse, Request, Response},
    };

    use super::*;
    use crate::{
        consumers::{StreamConsumer, Termination},
        decoder::compress,
        record::Record,
    };

    fn envelope(document: &str) -> String {
        json!({
            "jsonrpc": "2.0",
            "result": STANDARD.encode(compress(document.as_bytes())),
        })
        .to_string()
    }

    #[test]
    fn subscription_request_shape() {
        assert_eq!(
            subscription_request(),
            json!({"jsonrpc": "2.0", "method": "subscribe_FlashBlock", "params": [], "id": 1})
        );
    }

    #[test]
    fn envelope_yields_compressed_result() {
        let raw = parse_envelope(envelope(r#"{"a":1}"#).as_bytes()).unwrap();

        assert_eq!(raw, compress(br#"{"a":1}"#));
    }

    #[test]
    fn envelope_version_is_not_checked() {
        let frame = json!({"jsonrpc": "1.0", "id": 9, "result": STANDARD.encode(b"abc")}).to_string();

        assert_eq!(parse_envelope(frame.as_bytes()).unwrap(), b"abc".to_vec());
    }

    #[test]
    fn malformed_envelopes_are_skippable() {
        for frame in [
            "not json at all",
            r#"{"jsonrpc":"2.0"}"#,
            r#"{"jsonrpc":"2.0","result":null}"#,
            r#"{"jsonrpc":"2.0","result":"@@not base64@@"}"#,
            r#"{"jsonrpc":"2.0","result":42}"#,
        ] {
            let err = parse_envelope(frame.as_bytes()).unwrap_err();
            assert!(err.is_skippable(), "{frame}: {err}");
            assert!(err.to_string().contains("Raw data"), "{err}");
        }
    }

    #[tokio::test]
    async fn streams_flash_blocks_from_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let seen_auth = Arc::new(Mutex::new(None::<String>));

        let server_auth = seen_auth.clone();
        let server = tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let callback = |request: &Request,
                            response: Response|
             -> Result<Response, ErrorResponse> {
                *server_auth.lock().unwrap() = request
                    .headers()
                    .get("Authorization")
                    .map(|value| value.to_str().unwrap().to_string());
                Ok(response)
            };
            let mut ws = accept_hdr_async(tcp, callback).await.unwrap();

            let subscribe = ws.next().await.unwrap().unwrap().into_text().unwrap();

            ws.send(Message::Text(envelope(r#"{"a":1}"#).into())).await.unwrap();
            ws.send(Message::Text("{\"jsonrpc\":\"2.0\",\"res".to_string().into()))
                .await
                .unwrap();
            ws.send(Message::Ping(vec![1, 2, 3].into())).await.unwrap();
            ws.send(Message::Binary(envelope(r#"{"b":[2]}"#).into_bytes().into()))
                .await
                .unwrap();
            ws.close(None).await.unwrap();

            subscribe.to_string()
        });

        let config = Config {
            websocket_url: format!("ws://127.0.0.1:{port}/ws"),
            ..Config::new("ws-secret")
        };
        let mut records: Vec<Record> = Vec::new();
        let report = StreamConsumer::new(WebSocketAdapter::new(&config), &mut records)
            .run()
            .await
            .unwrap();

        let subscribe = server.await.unwrap();
        let subscribe: Value = serde_json::from_str(&subscribe).unwrap();

        assert_eq!(subscribe, subscription_request());
        assert_eq!(seen_auth.lock().unwrap().as_deref(), Some("ws-secret"));
        assert_eq!(report.records, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.termination, Termination::EndOfStream);
        assert_eq!(records[0].get("a"), Some(&json!(1)));
        assert_eq!(records[1].get("b"), Some(&json!([2])));
    }

    #[tokio::test]
    async fn refused_socket_is_connect_error() {
        let config = Config {
            websocket_url: "ws://127.0.0.1:1/ws".into(),
            ..Config::new("ws-secret")
        };

        let err = StreamConsumer::new(WebSocketAdapter::new(&config), Vec::new())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, StreamError::Connect { .. }));
    }

    #[tokio::test]
    async fn unprintable_token_is_connect_error() {
        let config = Config::new("bad\ntoken");

        let err = StreamConsumer::new(WebSocketAdapter::new(&config), Vec::new())
            .run()
            .await
            .unwrap_err();

        assert!(err.is_terminal());
        assert!(err.to_string().contains("auth token rejected"), "{err}");
    }

    #[test]
    fn handshake_uses_websocket_timeout() {
        let config = Config {
            websocket_connect_timeout_secs: 7,
            ..Config::new("ws-secret")
        };

        assert_eq!(WebSocketAdapter::new(&config).connect_timeout, Duration::from_secs(7));
    }
}
