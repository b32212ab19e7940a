//! The concrete button kinds.

use super::kind::ButtonKind;
use crate::models::{MeterSettings, PrayerIconSettings, StateSnapshot, TabIconSettings};
use crate::render::{
    health_meter, prayer_icon, prayer_meter, run_meter, special_attack_meter, tab_icon, Frame,
};

pub struct HealthMeter;

impl ButtonKind for HealthMeter {
    const NAME: &'static str = "health";
    type Settings = MeterSettings;

    fn render(snapshot: &StateSnapshot, settings: &MeterSettings) -> Frame {
        health_meter(snapshot, settings)
    }
}

pub struct PrayerMeter;

impl ButtonKind for PrayerMeter {
    const NAME: &'static str = "prayer";
    type Settings = MeterSettings;

    fn render(snapshot: &StateSnapshot, settings: &MeterSettings) -> Frame {
        prayer_meter(snapshot, settings)
    }
}

pub struct RunMeter;

impl ButtonKind for RunMeter {
    const NAME: &'static str = "run";
    type Settings = MeterSettings;

    fn render(snapshot: &StateSnapshot, settings: &MeterSettings) -> Frame {
        run_meter(snapshot, settings)
    }
}

pub struct SpecialAttackMeter;

impl ButtonKind for SpecialAttackMeter {
    const NAME: &'static str = "special-attack";
    type Settings = MeterSettings;

    fn render(snapshot: &StateSnapshot, settings: &MeterSettings) -> Frame {
        special_attack_meter(snapshot, settings)
    }
}

pub struct PrayerIcon;

impl ButtonKind for PrayerIcon {
    const NAME: &'static str = "prayer-icon";
    type Settings = PrayerIconSettings;

    fn render(snapshot: &StateSnapshot, settings: &PrayerIconSettings) -> Frame {
        prayer_icon(snapshot, settings)
    }
}

/// Shows whether a game tab has focus and opens it on key-down.
pub struct TabIcon;

impl ButtonKind for TabIcon {
    const NAME: &'static str = "tab-icon";
    type Settings = TabIconSettings;

    fn render(snapshot: &StateSnapshot, settings: &TabIconSettings) -> Frame {
        tab_icon(snapshot, settings)
    }

    fn normalize(settings: &mut TabIconSettings) {
        settings.fill_key_from_table();
    }

    fn key_down(settings: &TabIconSettings) -> Option<Vec<String>> {
        settings.key_combo()
    }
}
