//! Meter renderers: health, prayer, run energy and special attack.
//!
//! Each renderer is a pure function of the snapshot and the button's
//! settings. A logged-out snapshot renders an empty meter with no label.

use super::color::{health_colors, label_color, RUN_DISABLED, RUN_ENABLED, WHITE};
use super::frame::{Frame, Label, Layer, Placement};
use super::CANVAS_SIZE;
use crate::models::{
    ratio, HealthStatus, MeterSettings, StateSnapshot, MAX_RUN_ENERGY, MAX_SPECIAL_ATTACK,
};

pub const PRAYER_FILL: &str = "orbs/prayer_fill";
pub const PRAYER_FILL_ACTIVE: &str = "orbs/prayer_fill_active";
pub const PRAYER_EMPTY: &str = "orbs/prayer_empty";
pub const PRAYER_EMPTY_ACTIVE: &str = "orbs/prayer_empty_active";
pub const SPECIAL_FILL: &str = "orbs/special_fill";
pub const SPECIAL_FILL_ENABLED: &str = "orbs/special_fill_enabled";
pub const SPECIAL_FILL_UNAVAILABLE: &str = "orbs/special_fill_unavailable";
pub const SPECIAL_EMPTY: &str = "orbs/special_empty";

/// Rows of fill rising from the bottom for `pct`.
pub fn fill_height(pct: f64) -> u32 {
    (f64::from(CANVAS_SIZE) * pct.clamp(0.0, 1.0)).round() as u32
}

/// Rows masked from the top for `pct`.
pub fn mask_height(pct: f64) -> u32 {
    (f64::from(CANVAS_SIZE) * (1.0 - pct.clamp(0.0, 1.0))).round() as u32
}

/// Numeric label for a meter, or `None` when numbers are hidden.
fn meter_label(settings: &MeterSettings, value: u32, pct: f64) -> Option<Layer> {
    if !settings.show_numbers {
        return None;
    }
    let color = if settings.colored_numbers {
        label_color(pct)
    } else {
        WHITE
    };
    Some(Layer::Label(Label {
        text: value.to_string(),
        color,
        position: settings.text_position,
    }))
}

/// Health orb: status-coloured fill from the bottom.
pub fn health_meter(snapshot: &StateSnapshot, settings: &MeterSettings) -> Frame {
    let (pct, status, label) = match snapshot.live_hp() {
        Some(hp) => {
            let pct = ratio(hp.current, hp.max);
            (pct, hp.status, meter_label(settings, hp.current, pct))
        }
        None => (0.0, HealthStatus::None, None),
    };

    let height = fill_height(pct);
    let fill = match health_colors(status) {
        (color, None) => Layer::OrbFill { color, height },
        (left, Some(right)) => Layer::OrbSplitFill {
            left,
            right,
            height,
        },
    };

    Frame::new()
        .with_layer(Layer::OrbBase)
        .with_layer(fill)
        .with_layer(Layer::OrbShade)
        .with_layer(Layer::OrbFrame)
        .with_optional_layer(label)
}

/// Prayer orb: fill image masked from the top by the empty image. Both images
/// switch to their active pair while any prayer is active.
pub fn prayer_meter(snapshot: &StateSnapshot, settings: &MeterSettings) -> Frame {
    let (pct, label) = match snapshot.live_prayer_points() {
        Some(points) => {
            let pct = ratio(points.current, points.max);
            (pct, meter_label(settings, points.current, pct))
        }
        None => (0.0, None),
    };
    let (fill, empty) = if snapshot.any_prayer_active() {
        (PRAYER_FILL_ACTIVE, PRAYER_EMPTY_ACTIVE)
    } else {
        (PRAYER_FILL, PRAYER_EMPTY)
    };

    masked_meter(fill, empty, pct).with_optional_layer(label)
}

/// Run orb: gold while running, grey while walking. Displays whole percent.
pub fn run_meter(snapshot: &StateSnapshot, settings: &MeterSettings) -> Frame {
    let energy = snapshot.live_run_energy();
    let pct = ratio(energy, MAX_RUN_ENERGY);
    let color = if snapshot.live_run_enabled() {
        RUN_ENABLED
    } else {
        RUN_DISABLED
    };
    let label = snapshot
        .is_logged_in()
        .then(|| meter_label(settings, energy / 100, pct))
        .flatten();

    Frame::new()
        .with_layer(Layer::OrbBase)
        .with_layer(Layer::OrbFill {
            color,
            height: fill_height(pct),
        })
        .with_layer(Layer::OrbShade)
        .with_layer(Layer::OrbFrame)
        .with_optional_layer(label)
}

/// Which special attack fill variant to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialAttackState {
    Enabled,
    Available,
    Unavailable,
}

impl SpecialAttackState {
    /// Enabled wins over available. A client that omits the availability
    /// flag is treated as having the attack available.
    pub fn from_snapshot(snapshot: &StateSnapshot) -> Self {
        if !snapshot.is_logged_in() {
            return Self::Unavailable;
        }
        if snapshot.special_attack_enabled.unwrap_or(false) {
            Self::Enabled
        } else if snapshot.special_attack_available.unwrap_or(true) {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    pub fn fill_asset(self) -> &'static str {
        match self {
            Self::Enabled => SPECIAL_FILL_ENABLED,
            Self::Available => SPECIAL_FILL,
            Self::Unavailable => SPECIAL_FILL_UNAVAILABLE,
        }
    }
}

/// Special attack orb: fill image masked from the top.
pub fn special_attack_meter(snapshot: &StateSnapshot, settings: &MeterSettings) -> Frame {
    let energy = snapshot.live_special_attack();
    let pct = ratio(energy, MAX_SPECIAL_ATTACK);
    let fill = SpecialAttackState::from_snapshot(snapshot).fill_asset();
    let label = snapshot
        .is_logged_in()
        .then(|| meter_label(settings, energy, pct))
        .flatten();

    masked_meter(fill, SPECIAL_EMPTY, pct).with_optional_layer(label)
}

/// Full fill image with the empty image drawn over the top rows.
fn masked_meter(fill: &str, empty: &str, pct: f64) -> Frame {
    let frame = Frame::new()
        .with_layer(Layer::OrbBase)
        .with_image(fill, Placement::Stretch);
    match mask_height(pct) {
        0 => frame,
        rows => frame.with_image(empty, Placement::TopRows(rows)),
    }
}
