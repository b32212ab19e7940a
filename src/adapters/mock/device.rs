//! Recording device sink for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::render::ButtonImage;
use crate::traits::{DeviceSink, SinkError};

/// One call made against the sink.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    SetImage { context: String, image: ButtonImage },
    SetState { context: String, state: u8 },
    SetTitle { context: String, title: String },
    GetSettings { context: String },
    SetSettings { context: String, settings: serde_json::Value },
}

impl SinkCall {
    pub fn context(&self) -> &str {
        match self {
            SinkCall::SetImage { context, .. }
            | SinkCall::SetState { context, .. }
            | SinkCall::SetTitle { context, .. }
            | SinkCall::GetSettings { context }
            | SinkCall::SetSettings { context, .. } => context,
        }
    }
}

/// Device sink that records every call.
///
/// Contexts marked with [`fail_context`](Self::fail_context) reject every
/// call (the call is still recorded), which lets tests check that one
/// broken button does not affect the others.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_context(&self, context: &str) {
        self.failing.lock().unwrap().insert(context.to_string());
    }

    pub fn recover_context(&self, context: &str) {
        self.failing.lock().unwrap().remove(context);
    }

    /// Make every call wait before completing.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, context: &str) -> Vec<SinkCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.context() == context)
            .collect()
    }

    /// Images pushed to `context`, in order.
    pub fn images_for(&self, context: &str) -> Vec<ButtonImage> {
        self.calls_for(context)
            .into_iter()
            .filter_map(|call| match call {
                SinkCall::SetImage { image, .. } => Some(image),
                _ => None,
            })
            .collect()
    }

    pub fn image_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, SinkCall::SetImage { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    async fn record(&self, call: SinkCall, operation: &'static str) -> Result<(), SinkError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let context = call.context().to_string();
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(&context) {
            return Err(SinkError::Rejected {
                context,
                operation,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DeviceSink for RecordingSink {
    async fn set_image(&self, context: &str, image: &ButtonImage) -> Result<(), SinkError> {
        let call = SinkCall::SetImage {
            context: context.to_string(),
            image: image.clone(),
        };
        self.record(call, "setImage").await
    }

    async fn set_state(&self, context: &str, state: u8) -> Result<(), SinkError> {
        let call = SinkCall::SetState {
            context: context.to_string(),
            state,
        };
        self.record(call, "setState").await
    }

    async fn set_title(&self, context: &str, title: &str) -> Result<(), SinkError> {
        let call = SinkCall::SetTitle {
            context: context.to_string(),
            title: title.to_string(),
        };
        self.record(call, "setTitle").await
    }

    async fn get_settings(&self, context: &str) -> Result<(), SinkError> {
        let call = SinkCall::GetSettings {
            context: context.to_string(),
        };
        self.record(call, "getSettings").await
    }

    async fn set_settings(
        &self,
        context: &str,
        settings: &serde_json::Value,
    ) -> Result<(), SinkError> {
        let call = SinkCall::SetSettings {
            context: context.to_string(),
            settings: settings.clone(),
        };
        self.record(call, "setSettings").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let sink = RecordingSink::new();
        sink.set_state("a", 1).await.unwrap();
        sink.set_title("a", "").await.unwrap();
        sink.get_settings("b").await.unwrap();

        assert_eq!(sink.calls().len(), 3);
        assert_eq!(
            sink.calls_for("a"),
            vec![
                SinkCall::SetState {
                    context: "a".to_string(),
                    state: 1
                },
                SinkCall::SetTitle {
                    context: "a".to_string(),
                    title: String::new()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_context() {
        let sink = RecordingSink::new();
        sink.fail_context("bad");
        let image = ButtonImage::from_png(vec![1, 2, 3]);

        assert!(matches!(
            sink.set_image("bad", &image).await,
            Err(SinkError::Rejected { operation: "setImage", .. })
        ));
        assert!(sink.set_image("good", &image).await.is_ok());
        assert_eq!(sink.image_count(), 2);

        sink.recover_context("bad");
        assert!(sink.set_image("bad", &image).await.is_ok());
    }
}
