//! Plugin wiring and host event dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::{CommandKeySender, FsAssetSource, HttpStateSource, ReqwestHttpClient};
use crate::cli::LaunchArgs;
use crate::config::{PluginConfig, UpdateMode};
use crate::driver::{start_push_server, PollDriver};
use crate::error::DeckResult;
use crate::registry::{
    ButtonHandler, ButtonRegistry, DriveMode, HealthMeter, KeyComboAction, PrayerIcon,
    PrayerMeter, RegistryContext, RunMeter, SpecialAttackMeter, TabIcon,
};
use crate::render::Rasterizer;
use crate::state::StateStore;
use crate::streamdeck::{DeckConnection, InboundEvent, Registration};

/// Action UUIDs declared in the plugin manifest.
pub mod actions {
    pub const HEALTH: &str = "dev.orbdeck.health";
    pub const PRAYER: &str = "dev.orbdeck.prayer";
    pub const RUN: &str = "dev.orbdeck.run";
    pub const SPECIAL_ATTACK: &str = "dev.orbdeck.special";
    pub const PRAYER_ICON: &str = "dev.orbdeck.prayer-icon";
    pub const TAB_ICON: &str = "dev.orbdeck.tab-icon";
    pub const MAP_TOGGLE: &str = "dev.orbdeck.map-toggle";

    pub const ALL: &[&str] = &[
        HEALTH,
        PRAYER,
        RUN,
        SPECIAL_ATTACK,
        PRAYER_ICON,
        TAB_ICON,
        MAP_TOGGLE,
    ];
}

/// Routes host events to the handler registered for their action UUID.
pub struct Plugin {
    handlers: HashMap<&'static str, Arc<dyn ButtonHandler>>,
}

impl Plugin {
    pub fn new(ctx: RegistryContext, map_keys: Vec<String>) -> Self {
        let mut handlers: HashMap<&'static str, Arc<dyn ButtonHandler>> = HashMap::new();
        handlers.insert(
            actions::HEALTH,
            Arc::new(ButtonRegistry::<HealthMeter>::new(ctx.clone())),
        );
        handlers.insert(
            actions::PRAYER,
            Arc::new(ButtonRegistry::<PrayerMeter>::new(ctx.clone())),
        );
        handlers.insert(
            actions::RUN,
            Arc::new(ButtonRegistry::<RunMeter>::new(ctx.clone())),
        );
        handlers.insert(
            actions::SPECIAL_ATTACK,
            Arc::new(ButtonRegistry::<SpecialAttackMeter>::new(ctx.clone())),
        );
        handlers.insert(
            actions::PRAYER_ICON,
            Arc::new(ButtonRegistry::<PrayerIcon>::new(ctx.clone())),
        );
        handlers.insert(
            actions::TAB_ICON,
            Arc::new(ButtonRegistry::<TabIcon>::new(ctx.clone())),
        );
        handlers.insert(
            actions::MAP_TOGGLE,
            Arc::new(KeyComboAction::new("map-toggle", ctx.keys, map_keys)),
        );
        Self { handlers }
    }

    pub fn handler(&self, action: &str) -> Option<&Arc<dyn ButtonHandler>> {
        self.handlers.get(action)
    }

    /// Dispatch one host event. Returns false if nothing handled it.
    pub fn handle_event(&self, event: &InboundEvent) -> bool {
        let Some(action_event) = event.action_event() else {
            return false;
        };
        let Some(handler) = self.handlers.get(action_event.action.as_str()) else {
            debug!(action = %action_event.action, "Event for unknown action");
            return false;
        };

        let context = action_event.context.as_str();
        let settings = &action_event.payload.settings;
        match event {
            InboundEvent::WillAppear(_) => handler.on_shown(context, settings),
            InboundEvent::WillDisappear(_) => handler.on_hidden(context),
            InboundEvent::DidReceiveSettings(_) => handler.on_settings_changed(context, settings),
            InboundEvent::KeyDown(_) => handler.on_pressed(context),
            InboundEvent::KeyUp(_) => handler.on_released(context),
            InboundEvent::Unknown => return false,
        }
        true
    }
}

/// Run the plugin until the host closes the connection.
pub async fn run(launch: LaunchArgs, config: PluginConfig) -> DeckResult<()> {
    let store = Arc::new(StateStore::new());
    let rasterizer = Arc::new(Rasterizer::new(Arc::new(FsAssetSource::new(
        config.assets_dir.clone(),
    ))));
    let keys = Arc::new(CommandKeySender::new(config.key_command.clone()));

    let mut connection = DeckConnection::connect(
        launch.port,
        Registration {
            event: launch.register_event.clone(),
            uuid: launch.plugin_uuid.clone(),
        },
    )
    .await?;
    info!(port = launch.port, "Connected to device host");

    let (drive, _server) = match config.update_mode {
        UpdateMode::Push => {
            let (handle, addr) = start_push_server(config.listen_addr, Arc::clone(&store)).await?;
            info!(%addr, "Waiting for pushed state");
            (DriveMode::Push, Some(handle))
        }
        UpdateMode::Pull => {
            let client = ReqwestHttpClient::with_timeout(config.fetch_timeout)
                .map_err(crate::traits::SourceError::from)?;
            let source = HttpStateSource::new(Arc::new(client), config.source_url.clone());
            let driver = PollDriver::new(
                Arc::new(source),
                Arc::clone(&store),
                config.poll_interval,
                config.fetch_timeout,
            );
            info!(url = %config.source_url, "Polling for state");
            (DriveMode::Pull(Arc::new(driver)), None)
        }
    };

    let plugin = Plugin::new(
        RegistryContext {
            store,
            sink: Arc::new(connection.sink()),
            keys,
            rasterizer,
            drive,
        },
        config.map_keys.clone(),
    );

    while let Some(event) = connection.recv().await {
        plugin.handle_event(&event);
    }

    info!("Device host closed the connection, shutting down");
    Ok(())
}
