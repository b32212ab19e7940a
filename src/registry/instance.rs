//! One visible button and the task that talks to the device for it.
//!
//! Every instance owns an unbounded queue drained by a dedicated worker, so
//! pushes for one button apply in the order they were triggered while
//! different buttons proceed independently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::error::{DeckError, DeckResult};
use crate::render::{Fingerprint, Frame, Rasterizer};
use crate::traits::DeviceSink;

/// Lifecycle of a button instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Absent,
    /// Registered, no push has succeeded yet.
    Unrendered,
    Rendered,
}

pub(crate) enum SinkCommand {
    ClearTitle,
    SaveSettings(Value),
    RequestSettings,
    Render {
        frame: Frame,
        fingerprint: Fingerprint,
    },
}

/// State shared between the registry and the worker.
#[derive(Default)]
struct Shared {
    /// Fingerprint of the newest frame handed to the worker.
    fingerprint: Mutex<Option<Fingerprint>>,
    rendered: AtomicBool,
    retired: AtomicBool,
}

impl Shared {
    fn fingerprint(&self) -> MutexGuard<'_, Option<Fingerprint>> {
        self.fingerprint.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub(crate) struct Instance<S> {
    pub(crate) settings: S,
    shared: Arc<Shared>,
    tx: mpsc::UnboundedSender<SinkCommand>,
}

impl<S> Instance<S> {
    /// Register `context` and start its worker.
    pub(crate) fn spawn(
        kind: &'static str,
        context: &str,
        settings: S,
        sink: Arc<dyn DeviceSink>,
        rasterizer: Arc<Rasterizer>,
    ) -> Self {
        let shared = Arc::new(Shared::default());
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(
            kind,
            context.to_string(),
            rx,
            Arc::clone(&shared),
            sink,
            rasterizer,
        ));
        Self {
            settings,
            shared,
            tx,
        }
    }

    pub(crate) fn fingerprint(&self) -> Option<Fingerprint> {
        *self.shared.fingerprint()
    }

    pub(crate) fn state(&self) -> InstanceState {
        if self.shared.rendered.load(Ordering::SeqCst) {
            InstanceState::Rendered
        } else {
            InstanceState::Unrendered
        }
    }

    pub(crate) fn clear_fingerprint(&self) {
        *self.shared.fingerprint() = None;
    }

    /// Queue `frame` unless it matches the last one queued.
    pub(crate) fn offer(&self, frame: Frame) -> bool {
        let fingerprint = frame.fingerprint();
        {
            let mut current = self.shared.fingerprint();
            if *current == Some(fingerprint) {
                return false;
            }
            *current = Some(fingerprint);
        }
        self.send(SinkCommand::Render { frame, fingerprint })
    }

    pub(crate) fn send(&self, command: SinkCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    /// Stop pushing frames; the worker exits once the instance is dropped.
    pub(crate) fn retire(&self) {
        self.shared.retired.store(true, Ordering::SeqCst);
    }
}

async fn run_worker(
    kind: &'static str,
    context: String,
    mut rx: mpsc::UnboundedReceiver<SinkCommand>,
    shared: Arc<Shared>,
    sink: Arc<dyn DeviceSink>,
    rasterizer: Arc<Rasterizer>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            SinkCommand::ClearTitle => {
                if let Err(e) = sink.set_title(&context, "").await {
                    warn!(kind, context = %context, "Failed to clear title: {}", e);
                }
            }
            SinkCommand::SaveSettings(settings) => {
                if let Err(e) = sink.set_settings(&context, &settings).await {
                    warn!(kind, context = %context, "Failed to save settings: {}", e);
                }
            }
            SinkCommand::RequestSettings => {
                if let Err(e) = sink.get_settings(&context).await {
                    warn!(kind, context = %context, "Failed to request settings: {}", e);
                }
            }
            SinkCommand::Render { frame, fingerprint } => {
                if shared.retired.load(Ordering::SeqCst) {
                    continue;
                }
                // A newer frame is already queued behind this one.
                if *shared.fingerprint() != Some(fingerprint) {
                    trace!(kind, context = %context, "Skipping superseded frame");
                    continue;
                }
                match push_frame(&context, &frame, sink.as_ref(), &rasterizer).await {
                    Ok(()) => {
                        shared.rendered.store(true, Ordering::SeqCst);
                        debug!(kind, context = %context, "Frame pushed");
                    }
                    Err(err) => {
                        warn!(
                            kind,
                            context = %context,
                            code = err.error_code(),
                            "Failed to push frame: {}",
                            err
                        );
                        let mut current = shared.fingerprint();
                        if *current == Some(fingerprint) {
                            *current = None;
                        }
                    }
                }
            }
        }
    }
    trace!(kind, context = %context, "Instance worker finished");
}

async fn push_frame(
    context: &str,
    frame: &Frame,
    sink: &dyn DeviceSink,
    rasterizer: &Rasterizer,
) -> DeckResult<()> {
    let image = rasterizer.render(frame).await?;
    if let Some(state) = frame.state {
        sink.set_state(context, state).await?;
    }
    sink.set_image(context, &image)
        .await
        .map_err(DeckError::from)
}
