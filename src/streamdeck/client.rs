use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use super::messages::{InboundEvent, OutboundEvent, Registration};
use super::sink::StreamDeckSink;

/// Device host connection errors
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to connect to device host: {0}")]
    ConnectFailed(String),

    #[error("failed to register with device host: {0}")]
    RegisterFailed(String),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Live WebSocket connection to the device host.
///
/// A background task owns the socket: it forwards parsed events to
/// [`recv`](Self::recv) and writes everything sent through the
/// [`sink`](Self::sink). There is no reconnection; when the host closes the
/// socket, `recv` returns `None` and the plugin is expected to exit.
pub struct DeckConnection {
    incoming_rx: mpsc::Receiver<InboundEvent>,
    outbound_tx: mpsc::UnboundedSender<OutboundEvent>,
}

impl DeckConnection {
    /// Connect to `ws://127.0.0.1:<port>` and register the plugin.
    pub async fn connect(port: u16, registration: Registration) -> Result<Self, ConnectionError> {
        Self::connect_url(&format!("ws://127.0.0.1:{}", port), registration).await
    }

    pub async fn connect_url(
        url: &str,
        registration: Registration,
    ) -> Result<Self, ConnectionError> {
        let (ws_stream, _) = connect_async(url)
            .await
            .map_err(|e| ConnectionError::ConnectFailed(e.to_string()))?;
        info!("Connected to device host at {}", url);

        let (mut ws_sink, ws_stream) = ws_stream.split();

        let register = serde_json::to_string(&registration)?;
        ws_sink
            .send(Message::Text(register))
            .await
            .map_err(|e| ConnectionError::RegisterFailed(e.to_string()))?;
        debug!(event = %registration.event, "Registration sent");

        let (incoming_tx, incoming_rx) = mpsc::channel::<InboundEvent>(100);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel::<OutboundEvent>();

        tokio::spawn(run_connection_loop(ws_sink, ws_stream, incoming_tx, outbound_rx));

        Ok(Self {
            incoming_rx,
            outbound_tx,
        })
    }

    /// Device sink writing to this connection.
    pub fn sink(&self) -> StreamDeckSink {
        StreamDeckSink::new(self.outbound_tx.clone())
    }

    /// Receive the next event; `None` once the host has gone away.
    pub async fn recv(&mut self) -> Option<InboundEvent> {
        self.incoming_rx.recv().await
    }
}

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn run_connection_loop(
    mut ws_sink: futures_util::stream::SplitSink<WsStream, Message>,
    mut ws_stream: futures_util::stream::SplitStream<WsStream>,
    incoming_tx: mpsc::Sender<InboundEvent>,
    mut outbound_rx: mpsc::UnboundedReceiver<OutboundEvent>,
) {
    loop {
        tokio::select! {
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<InboundEvent>(&text) {
                            Ok(InboundEvent::Unknown) => {
                                debug!("Ignoring unhandled host event");
                            }
                            Ok(event) => {
                                if incoming_tx.send(event).await.is_err() {
                                    debug!("Event receiver dropped, closing connection");
                                    let _ = ws_sink.close().await;
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!("Failed to parse host event: {} - {}", e, text);
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Device host closed the connection");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    None => {
                        info!("WebSocket stream ended");
                        break;
                    }
                }
            }
            outbound = outbound_rx.recv() => {
                // None once the connection and every sink are dropped.
                let Some(event) = outbound else { break };
                match serde_json::to_string(&event) {
                    Ok(json) => {
                        if let Err(e) = ws_sink.send(Message::Text(json)).await {
                            error!(context = event.context(), "Failed to send to device host: {}", e);
                        }
                    }
                    Err(e) => error!("Failed to serialize outbound event: {}", e),
                }
            }
        }
    }

    info!("Device host connection loop ended");
}
