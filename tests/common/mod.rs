//! Common test utilities for integration tests.
//!
//! Snapshot fixtures, a registry context wired to recording mocks, and a
//! fake device host that speaks the WebSocket protocol.

#![allow(dead_code)]

pub mod host;

pub use host::FakeHost;

use std::sync::Arc;
use std::time::Duration;

use orbdeck::adapters::mock::{InMemoryAssets, RecordingKeySender, RecordingSink};
use orbdeck::models::{HealthStatus, Hitpoints, Player, PrayerPoints, StateSnapshot};
use orbdeck::registry::{DriveMode, RegistryContext};
use orbdeck::render::Rasterizer;
use orbdeck::state::StateStore;

/// A logged-in snapshot with the given hitpoints.
pub fn logged_in(hp: u32, max: u32) -> StateSnapshot {
    StateSnapshot {
        player: Some(Player {
            name: "Zezima".to_string(),
            world: 302,
        }),
        hp: Some(Hitpoints {
            current: hp,
            max,
            status: HealthStatus::None,
        }),
        prayer_points: Some(PrayerPoints {
            current: 40,
            max: 70,
        }),
        run_energy: Some(5000),
        run_enabled: Some(false),
        special_attack: Some(100),
        ..Default::default()
    }
}

/// Same snapshot with a different active tab.
pub fn with_tab(mut snapshot: StateSnapshot, tab: &str) -> StateSnapshot {
    snapshot.active_tab = Some(tab.to_string());
    snapshot
}

/// Registry context wired to recording mocks.
pub struct TestContext {
    pub store: Arc<StateStore>,
    pub sink: RecordingSink,
    pub keys: RecordingKeySender,
    pub assets: InMemoryAssets,
    pub ctx: RegistryContext,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_drive(DriveMode::Push)
    }

    pub fn with_drive(drive: DriveMode) -> Self {
        let store = Arc::new(StateStore::new());
        let sink = RecordingSink::new();
        let keys = RecordingKeySender::new();
        let assets = InMemoryAssets::new();
        let ctx = RegistryContext {
            store: Arc::clone(&store),
            sink: Arc::new(sink.clone()),
            keys: Arc::new(keys.clone()),
            rasterizer: Arc::new(Rasterizer::new(Arc::new(assets.clone()))),
            drive,
        };
        Self {
            store,
            sink,
            keys,
            assets,
            ctx,
        }
    }
}

/// Give spawned instance workers time to drain their queues.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
