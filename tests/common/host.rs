//! Minimal stand-in for the device host's WebSocket server.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

/// Accepts one plugin connection and exchanges JSON messages with it.
pub struct FakeHost {
    listener: TcpListener,
    socket: Option<WebSocketStream<TcpStream>>,
}

impl FakeHost {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        Self {
            listener,
            socket: None,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.listener.local_addr().unwrap()
    }

    pub fn port(&self) -> u16 {
        self.addr().port()
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr())
    }

    /// Accept the plugin and return its registration message.
    pub async fn accept(&mut self) -> Value {
        let (stream, _) = self.listener.accept().await.unwrap();
        let socket = tokio_tungstenite::accept_async(stream).await.unwrap();
        self.socket = Some(socket);
        self.next_json().await.expect("registration message")
    }

    pub async fn send(&mut self, message: Value) {
        let socket = self.socket.as_mut().expect("accepted");
        socket
            .send(Message::Text(message.to_string()))
            .await
            .unwrap();
    }

    /// Next JSON message from the plugin, or `None` after two seconds.
    pub async fn next_json(&mut self) -> Option<Value> {
        let socket = self.socket.as_mut()?;
        loop {
            let message = tokio::time::timeout(Duration::from_secs(2), socket.next())
                .await
                .ok()??
                .ok()?;
            if let Message::Text(text) = message {
                return serde_json::from_str(&text).ok();
            }
        }
    }

    /// Read messages until one with `event` arrives.
    pub async fn next_event(&mut self, event: &str) -> Option<Value> {
        while let Some(message) = self.next_json().await {
            if message["event"] == event {
                return Some(message);
            }
        }
        None
    }

    pub async fn close(&mut self) {
        if let Some(socket) = self.socket.as_mut() {
            let _ = socket.close(None).await;
        }
    }
}
