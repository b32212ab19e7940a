//! Per-button settings as stored by the device host.
//!
//! Field names follow the property inspector's camelCase JSON. Every field has
//! a default so partially filled host settings deserialize cleanly.

use serde::{Deserialize, Serialize};

use super::tabs::default_key_for_tab;

/// Prayer shown by a freshly placed prayer-icon button.
pub const DEFAULT_PRAYER_ID: &str = "protect_from_melee";

/// Tab shown by a freshly placed tab-icon button.
pub const DEFAULT_TAB_ID: &str = "inventory";

/// One of nine fixed label anchor points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextPosition {
    TopLeft,
    Top,
    TopRight,
    Left,
    #[default]
    Middle,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Settings shared by all meter buttons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeterSettings {
    pub show_numbers: bool,
    pub colored_numbers: bool,
    pub text_position: TextPosition,
}

impl Default for MeterSettings {
    fn default() -> Self {
        Self {
            show_numbers: true,
            colored_numbers: false,
            text_position: TextPosition::Middle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrayerIconSettings {
    pub prayer_id: String,
}

impl Default for PrayerIconSettings {
    fn default() -> Self {
        Self {
            prayer_id: DEFAULT_PRAYER_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabIconSettings {
    pub tab_id: String,
    /// Key combination sent on press, `+`-separated (e.g. `shift+f1`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_to_send: Option<String>,
}

impl Default for TabIconSettings {
    fn default() -> Self {
        Self {
            tab_id: DEFAULT_TAB_ID.to_string(),
            key_to_send: None,
        }
    }
}

impl TabIconSettings {
    /// Fill in `key_to_send` from the tab table when the host left it empty.
    pub fn fill_key_from_table(&mut self) {
        let missing = self
            .key_to_send
            .as_deref()
            .map_or(true, |key| key.trim().is_empty());
        if missing {
            self.key_to_send = default_key_for_tab(&self.tab_id).map(str::to_string);
        }
    }

    /// The combination to send for this tab, split into key identifiers.
    pub fn key_combo(&self) -> Option<Vec<String>> {
        let combo = parse_key_combo(self.key_to_send.as_deref()?);
        (!combo.is_empty()).then_some(combo)
    }
}

/// Split a `+`-separated key combination into lowercase key identifiers.
pub fn parse_key_combo(combo: &str) -> Vec<String> {
    combo
        .split('+')
        .map(|key| key.trim().to_lowercase())
        .filter(|key| !key.is_empty())
        .collect()
}
