use async_trait::async_trait;
use tokio::sync::mpsc;

use super::messages::{ImagePayload, OutboundEvent, StatePayload, TitlePayload};
use crate::render::ButtonImage;
use crate::traits::{DeviceSink, SinkError};

/// [`DeviceSink`] that queues commands onto the host connection.
///
/// The host never acknowledges commands, so a call only fails once the
/// connection is gone.
#[derive(Debug, Clone)]
pub struct StreamDeckSink {
    tx: mpsc::UnboundedSender<OutboundEvent>,
}

impl StreamDeckSink {
    pub fn new(tx: mpsc::UnboundedSender<OutboundEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: OutboundEvent) -> Result<(), SinkError> {
        self.tx.send(event).map_err(|_| SinkError::Disconnected)
    }
}

#[async_trait]
impl DeviceSink for StreamDeckSink {
    async fn set_image(&self, context: &str, image: &ButtonImage) -> Result<(), SinkError> {
        self.send(OutboundEvent::SetImage {
            context: context.to_string(),
            payload: ImagePayload {
                image: image.to_data_url(),
                target: 0,
            },
        })
    }

    async fn set_state(&self, context: &str, state: u8) -> Result<(), SinkError> {
        self.send(OutboundEvent::SetState {
            context: context.to_string(),
            payload: StatePayload { state },
        })
    }

    async fn set_title(&self, context: &str, title: &str) -> Result<(), SinkError> {
        self.send(OutboundEvent::SetTitle {
            context: context.to_string(),
            payload: TitlePayload {
                title: title.to_string(),
                target: 0,
            },
        })
    }

    async fn get_settings(&self, context: &str) -> Result<(), SinkError> {
        self.send(OutboundEvent::GetSettings {
            context: context.to_string(),
        })
    }

    async fn set_settings(
        &self,
        context: &str,
        settings: &serde_json::Value,
    ) -> Result<(), SinkError> {
        self.send(OutboundEvent::SetSettings {
            context: context.to_string(),
            payload: settings.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_image_sends_data_url() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = StreamDeckSink::new(tx);
        let image = ButtonImage::from_png(vec![0x89, b'P', b'N', b'G']);

        sink.set_image("ctx", &image).await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "setImage",
                "context": "ctx",
                "payload": {"image": image.to_data_url(), "target": 0}
            })
        );
    }

    #[tokio::test]
    async fn test_title_and_settings() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = StreamDeckSink::new(tx);

        sink.set_title("ctx", "").await.unwrap();
        sink.set_settings("ctx", &json!({"tabId": "magic"}))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(rx.recv().await.unwrap()).unwrap(),
            json!({"event": "setTitle", "context": "ctx", "payload": {"title": "", "target": 0}})
        );
        assert_eq!(
            serde_json::to_value(rx.recv().await.unwrap()).unwrap(),
            json!({"event": "setSettings", "context": "ctx", "payload": {"tabId": "magic"}})
        );
    }

    #[tokio::test]
    async fn test_closed_connection_is_disconnected() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sink = StreamDeckSink::new(tx);
        assert_eq!(sink.set_state("ctx", 1).await, Err(SinkError::Disconnected));
    }
}
