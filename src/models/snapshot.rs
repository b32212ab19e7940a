//! Game state snapshot as delivered by the game client.
//!
//! A snapshot is replaced wholesale on every update; nothing in the crate
//! mutates one after it has been installed in the state store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Upper bound of `run_energy` (the client reports hundredths of a percent).
pub const MAX_RUN_ENERGY: u32 = 10_000;

/// Upper bound of `special_attack`.
pub const MAX_SPECIAL_ATTACK: u32 = 100;

/// One immutable copy of the game's displayable status.
///
/// Every field is optional and may be omitted from the JSON body entirely.
/// A missing `player` means "not logged in" and overrides anything else the
/// snapshot carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<Hitpoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prayer_points: Option<PrayerPoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_energy: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_attack: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_attack_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_attack_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_prayers: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<String>,
}

impl StateSnapshot {
    /// The snapshot installed whenever the source cannot be reached.
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.player.is_some()
    }

    /// Hitpoints, or `None` when logged out.
    pub fn live_hp(&self) -> Option<&Hitpoints> {
        self.player.as_ref().and(self.hp.as_ref())
    }

    /// Prayer points, or `None` when logged out.
    pub fn live_prayer_points(&self) -> Option<&PrayerPoints> {
        self.player.as_ref().and(self.prayer_points.as_ref())
    }

    /// Run energy clamped to `0..=MAX_RUN_ENERGY`; zero when logged out.
    pub fn live_run_energy(&self) -> u32 {
        match self.player {
            Some(_) => self.run_energy.unwrap_or(0).min(MAX_RUN_ENERGY),
            None => 0,
        }
    }

    pub fn live_run_enabled(&self) -> bool {
        self.is_logged_in() && self.run_enabled.unwrap_or(false)
    }

    /// Special attack energy clamped to `0..=MAX_SPECIAL_ATTACK`; zero when logged out.
    pub fn live_special_attack(&self) -> u32 {
        match self.player {
            Some(_) => self.special_attack.unwrap_or(0).min(MAX_SPECIAL_ATTACK),
            None => 0,
        }
    }

    /// Whether `prayer_id` is currently active. Always false when logged out.
    pub fn is_prayer_active(&self, prayer_id: &str) -> bool {
        self.is_logged_in()
            && self
                .active_prayers
                .as_ref()
                .is_some_and(|prayers| prayers.contains(prayer_id))
    }

    /// Whether any prayer is active. Always false when logged out.
    pub fn any_prayer_active(&self) -> bool {
        self.is_logged_in()
            && self
                .active_prayers
                .as_ref()
                .is_some_and(|prayers| !prayers.is_empty())
    }

    /// Whether `tab_id` is the focused interface tab. Always false when logged out.
    pub fn is_tab_active(&self, tab_id: &str) -> bool {
        self.is_logged_in() && self.active_tab.as_deref() == Some(tab_id)
    }
}

/// Presence of a player means the client is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub world: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hitpoints {
    pub current: u32,
    pub max: u32,
    #[serde(default)]
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerPoints {
    pub current: u32,
    pub max: u32,
}

/// Status effect currently applied to the player's hitpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    #[default]
    None,
    Poisoned,
    Venomed,
    Diseased,
    PoisonedDiseased,
    VenomedDiseased,
}

/// Ratio of `current` to `max` clamped to `0.0..=1.0`; zero when `max` is zero.
pub fn ratio(current: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (f64::from(current) / f64::from(max)).clamp(0.0, 1.0)
}
