//! Generic per-kind button registry.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde_json::Value;
use tracing::{debug, info};

use super::instance::{Instance, InstanceState, SinkCommand};
use super::key_action::spawn_key_combo;
use super::kind::{merge_settings, ButtonHandler, ButtonKind};
use crate::driver::{PollDriver, PollLease};
use crate::models::StateSnapshot;
use crate::render::{Fingerprint, Rasterizer};
use crate::state::{StateStore, SubscriptionId};
use crate::traits::{DeviceSink, KeySender};

/// How a registry keeps its buttons up to date.
#[derive(Clone)]
pub enum DriveMode {
    /// Snapshots arrive through the push endpoint; subscribing is enough.
    Push,
    /// Hold a lease on the shared poller while any instance is visible.
    Pull(Arc<PollDriver>),
}

/// Collaborators shared by every registry in the plugin.
#[derive(Clone)]
pub struct RegistryContext {
    pub store: Arc<StateStore>,
    pub sink: Arc<dyn DeviceSink>,
    pub keys: Arc<dyn KeySender>,
    pub rasterizer: Arc<Rasterizer>,
    pub drive: DriveMode,
}

struct Driving {
    subscription: SubscriptionId,
    _lease: Option<PollLease>,
}

struct RegistryState<S> {
    instances: HashMap<String, Instance<S>>,
    driving: Option<Driving>,
}

struct Inner<K: ButtonKind> {
    ctx: RegistryContext,
    state: Mutex<RegistryState<K::Settings>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ButtonKind> Inner<K> {
    fn state(&self) -> MutexGuard<'_, RegistryState<K::Settings>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn render_all(&self, snapshot: &StateSnapshot) -> usize {
        let state = self.state();
        state
            .instances
            .values()
            .filter(|instance| instance.offer(K::render(snapshot, &instance.settings)))
            .count()
    }
}

/// Tracks every visible button of kind `K` and keeps them rendered.
///
/// The registry subscribes to the [`StateStore`] when its first instance
/// appears and unsubscribes when the last one disappears. Frames are only
/// pushed when their fingerprint differs from the last one queued for that
/// instance.
pub struct ButtonRegistry<K: ButtonKind> {
    inner: Arc<Inner<K>>,
}

impl<K: ButtonKind> Clone for ButtonRegistry<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: ButtonKind> ButtonRegistry<K> {
    pub fn new(ctx: RegistryContext) -> Self {
        Self {
            inner: Arc::new(Inner {
                ctx,
                state: Mutex::new(RegistryState {
                    instances: HashMap::new(),
                    driving: None,
                }),
                _kind: PhantomData,
            }),
        }
    }

    /// Register a newly visible button and render it from the current state.
    pub fn show(&self, context: &str, host_settings: &Value) {
        let mut state = self.inner.state();
        if state.instances.contains_key(context) {
            drop(state);
            debug!(kind = K::NAME, context, "Instance already visible, updating settings");
            self.update_settings(context, host_settings);
            return;
        }

        let merged = merge_settings::<K>(host_settings);
        let instance = Instance::spawn(
            K::NAME,
            context,
            merged.settings,
            Arc::clone(&self.inner.ctx.sink),
            Arc::clone(&self.inner.ctx.rasterizer),
        );
        instance.send(SinkCommand::ClearTitle);
        if host_settings.is_null() {
            // Nothing to merge into; ask for the stored settings rather than
            // overwrite them with defaults.
            instance.send(SinkCommand::RequestSettings);
        } else if merged.changed {
            instance.send(SinkCommand::SaveSettings(merged.value));
        }

        // Subscribe before reading the current snapshot so a concurrent
        // replace is either seen here or delivered to this instance.
        if state.driving.is_none() {
            state.driving = Some(self.start_driving());
        }
        let snapshot = self.inner.ctx.store.current();
        instance.offer(K::render(&snapshot, &instance.settings));
        state.instances.insert(context.to_string(), instance);
        info!(
            kind = K::NAME,
            context,
            instances = state.instances.len(),
            "Button shown"
        );
    }

    /// Forget a button. The last one to go stops the updates for this kind.
    pub fn hide(&self, context: &str) {
        let mut state = self.inner.state();
        let Some(instance) = state.instances.remove(context) else {
            debug!(kind = K::NAME, context, "Hide for unknown instance");
            return;
        };
        instance.retire();

        if state.instances.is_empty() {
            if let Some(driving) = state.driving.take() {
                self.inner.ctx.store.unsubscribe(driving.subscription);
                debug!(kind = K::NAME, "Stopped following state");
            }
        }
        info!(
            kind = K::NAME,
            context,
            instances = state.instances.len(),
            "Button hidden"
        );
    }

    /// Apply new host settings and force exactly one re-render.
    pub fn update_settings(&self, context: &str, host_settings: &Value) {
        let mut state = self.inner.state();
        let Some(instance) = state.instances.get_mut(context) else {
            debug!(kind = K::NAME, context, "Settings for unknown instance");
            return;
        };
        instance.settings = merge_settings::<K>(host_settings).settings;
        instance.clear_fingerprint();
        let snapshot = self.inner.ctx.store.current();
        instance.offer(K::render(&snapshot, &instance.settings));
    }

    /// Render every instance from `snapshot`. Returns how many were queued.
    pub fn render(&self, snapshot: &StateSnapshot) -> usize {
        self.inner.render_all(snapshot)
    }

    pub fn press(&self, context: &str) {
        self.send_keys(context, K::key_down);
    }

    pub fn release(&self, context: &str) {
        self.send_keys(context, K::key_up);
    }

    pub fn instance_count(&self) -> usize {
        self.inner.state().instances.len()
    }

    pub fn instance_state(&self, context: &str) -> InstanceState {
        self.inner
            .state()
            .instances
            .get(context)
            .map_or(InstanceState::Absent, Instance::state)
    }

    pub fn fingerprint(&self, context: &str) -> Option<Fingerprint> {
        self.inner
            .state()
            .instances
            .get(context)
            .and_then(Instance::fingerprint)
    }

    pub fn settings(&self, context: &str) -> Option<K::Settings> {
        self.inner
            .state()
            .instances
            .get(context)
            .map(|instance| instance.settings.clone())
    }

    /// Whether this kind currently follows state updates.
    pub fn is_driving(&self) -> bool {
        self.inner.state().driving.is_some()
    }

    fn start_driving(&self) -> Driving {
        let weak: Weak<Inner<K>> = Arc::downgrade(&self.inner);
        let subscription = self.inner.ctx.store.subscribe(move |snapshot| {
            if let Some(inner) = weak.upgrade() {
                inner.render_all(snapshot);
            }
        });
        let lease = match &self.inner.ctx.drive {
            DriveMode::Push => None,
            DriveMode::Pull(driver) => Some(driver.acquire()),
        };
        debug!(kind = K::NAME, "Following state");
        Driving {
            subscription,
            _lease: lease,
        }
    }

    fn send_keys(&self, context: &str, keys_for: fn(&K::Settings) -> Option<Vec<String>>) {
        let combo = {
            let state = self.inner.state();
            match state.instances.get(context) {
                Some(instance) => keys_for(&instance.settings),
                None => return,
            }
        };
        if let Some(combo) = combo {
            spawn_key_combo(K::NAME, Arc::clone(&self.inner.ctx.keys), combo);
        }
    }
}

impl<K: ButtonKind> ButtonHandler for ButtonRegistry<K> {
    fn name(&self) -> &'static str {
        K::NAME
    }

    fn on_shown(&self, context: &str, settings: &Value) {
        self.show(context, settings);
    }

    fn on_hidden(&self, context: &str) {
        self.hide(context);
    }

    fn on_settings_changed(&self, context: &str, settings: &Value) {
        self.update_settings(context, settings);
    }

    fn on_pressed(&self, context: &str) {
        self.press(context);
    }

    fn on_released(&self, context: &str) {
        self.release(context);
    }
}
