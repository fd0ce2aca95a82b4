//! WebSocket transport for the control channel.
//!
//! Frames JSON values as WebSocket text messages. The sender and receiver
//! halves are split so the connection layer can pump inbound frames from a
//! dedicated task while commands are sent from the caller's task.

use crate::error::{Error, Result};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// The pieces of an established transport.
pub struct TransportParts {
    /// Outbound half: serializes JSON values into text frames
    pub sender: WsSender,
    /// Inbound pump: must be driven via [`WsReceiver::run`]
    pub receiver: WsReceiver,
    /// Stream of inbound JSON messages produced by the pump
    pub message_rx: mpsc::UnboundedReceiver<Value>,
}

/// Open a WebSocket control channel to the given debugger URL.
pub async fn connect(url: &str) -> Result<TransportParts> {
    let (stream, _) = connect_async(url)
        .await
        .map_err(|e| Error::ConnectionFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let (sink, stream) = stream.split();
    let (message_tx, message_rx) = mpsc::unbounded_channel();

    Ok(TransportParts {
        sender: WsSender { sink },
        receiver: WsReceiver { stream, message_tx },
        message_rx,
    })
}

/// Outbound half of the transport.
pub struct WsSender {
    sink: SplitSink<WsStream, WsMessage>,
}

impl WsSender {
    /// Serialize a JSON value and send it as one text frame.
    pub async fn send(&mut self, message: Value) -> Result<()> {
        let text = serde_json::to_string(&message)?;
        self.sink
            .send(WsMessage::Text(text))
            .await
            .map_err(|e| Error::TransportError(e.to_string()))
    }

    /// Send a close frame and flush it.
    pub async fn close(&mut self) -> Result<()> {
        self.sink
            .send(WsMessage::Close(None))
            .await
            .map_err(|e| Error::TransportError(e.to_string()))
    }
}

/// Inbound half of the transport.
pub struct WsReceiver {
    stream: SplitStream<WsStream>,
    message_tx: mpsc::UnboundedSender<Value>,
}

impl WsReceiver {
    /// Pump inbound frames until the peer closes or the channel errors.
    ///
    /// Text frames are parsed as JSON and forwarded on `message_rx`; a
    /// frame that fails to parse is logged and skipped. Ping/pong and
    /// binary frames are ignored.
    pub async fn run(mut self) -> Result<()> {
        while let Some(frame) = self.stream.next().await {
            let frame = frame.map_err(|e| Error::TransportError(e.to_string()))?;
            match frame {
                WsMessage::Text(text) => match serde_json::from_str::<Value>(&text) {
                    Ok(value) => {
                        if self.message_tx.send(value).is_err() {
                            // Consumer is gone; stop pumping.
                            return Ok(());
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unparseable text frame");
                    }
                },
                WsMessage::Close(_) => break,
                WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Binary(_) => {}
                WsMessage::Frame(_) => {}
            }
        }
        Ok(())
    }
}
