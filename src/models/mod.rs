//! Data types shared across the plugin.
//!
//! - [`StateSnapshot`] - the game status consumed by every renderer
//! - [`MeterSettings`], [`PrayerIconSettings`], [`TabIconSettings`] - per-button configuration
//! - [`tabs`] - interface tab ids and their default hotkeys

pub mod settings;
pub mod snapshot;
pub mod tabs;

pub use settings::{
    parse_key_combo, MeterSettings, PrayerIconSettings, TabIconSettings, TextPosition,
    DEFAULT_PRAYER_ID, DEFAULT_TAB_ID,
};
pub use snapshot::{
    ratio, HealthStatus, Hitpoints, Player, PrayerPoints, StateSnapshot, MAX_RUN_ENERGY,
    MAX_SPECIAL_ATTACK,
};
pub use tabs::{default_key_for_tab, TAB_KEYS};
