//! Button kind and handler traits.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::StateSnapshot;
use crate::render::Frame;

/// Static description of one kind of button.
///
/// A kind only supplies pure behaviour; the [`ButtonRegistry`](super::ButtonRegistry)
/// owns instances, fingerprints and device I/O for every kind alike.
pub trait ButtonKind: Send + Sync + 'static {
    /// Short name used in logs.
    const NAME: &'static str;

    /// Per-instance settings. Missing fields deserialize to their defaults.
    type Settings: Serialize
        + DeserializeOwned
        + Clone
        + Default
        + PartialEq
        + fmt::Debug
        + Send
        + Sync
        + 'static;

    /// Pure mapping from state and settings to a frame.
    fn render(snapshot: &StateSnapshot, settings: &Self::Settings) -> Frame;

    /// Fill derived defaults that plain deserialization cannot express.
    fn normalize(_settings: &mut Self::Settings) {}

    /// Key combination to send when the button is pressed.
    fn key_down(_settings: &Self::Settings) -> Option<Vec<String>> {
        None
    }

    /// Key combination to send when the button is released.
    fn key_up(_settings: &Self::Settings) -> Option<Vec<String>> {
        None
    }
}

/// Object-safe entry point the plugin dispatches host events to.
pub trait ButtonHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_shown(&self, context: &str, settings: &Value);

    fn on_hidden(&self, context: &str);

    fn on_settings_changed(&self, context: &str, settings: &Value);

    fn on_pressed(&self, context: &str);

    fn on_released(&self, context: &str);
}

/// Host settings merged with a kind's defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSettings<S> {
    pub settings: S,
    /// Host object with every known field filled in. Unknown keys are kept.
    pub value: Value,
    /// Whether `value` differs from what the host sent.
    pub changed: bool,
}

/// Merge host-supplied settings with the defaults of `K`.
///
/// `null` counts as an empty object. Settings that fail to deserialize are
/// replaced by the defaults.
pub fn merge_settings<K: ButtonKind>(host: &Value) -> MergedSettings<K::Settings> {
    let host_map = match host {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        other => {
            warn!(kind = K::NAME, "Ignoring non-object settings: {}", other);
            Map::new()
        }
    };

    let mut settings = match serde_json::from_value::<K::Settings>(Value::Object(host_map.clone()))
    {
        Ok(settings) => settings,
        Err(e) => {
            warn!(kind = K::NAME, "Invalid settings, using defaults: {}", e);
            K::Settings::default()
        }
    };
    K::normalize(&mut settings);

    let mut merged = host_map.clone();
    if let Ok(Value::Object(filled)) = serde_json::to_value(&settings) {
        merged.extend(filled);
    }
    let changed = merged != host_map;

    MergedSettings {
        settings,
        value: Value::Object(merged),
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::kinds::{HealthMeter, TabIcon};
    use serde_json::json;

    #[test]
    fn test_null_settings_are_filled() {
        let merged = merge_settings::<HealthMeter>(&Value::Null);
        assert!(merged.changed);
        assert_eq!(
            merged.value,
            json!({"showNumbers": true, "coloredNumbers": false, "textPosition": "middle"})
        );
    }

    #[test]
    fn test_complete_settings_are_unchanged() {
        let host = json!({
            "showNumbers": false,
            "coloredNumbers": true,
            "textPosition": "top",
            "extra": 1
        });
        let merged = merge_settings::<HealthMeter>(&host);
        assert!(!merged.changed);
        assert_eq!(merged.value, host);
        assert!(!merged.settings.show_numbers);
    }

    #[test]
    fn test_tab_key_derived_from_table() {
        let merged = merge_settings::<TabIcon>(&json!({"tabId": "combat"}));
        assert!(merged.changed);
        assert_eq!(merged.settings.key_to_send.as_deref(), Some("f1"));
        assert_eq!(merged.value, json!({"tabId": "combat", "keyToSend": "f1"}));
    }

    #[test]
    fn test_explicit_tab_key_kept() {
        let host = json!({"tabId": "combat", "keyToSend": "shift+f1"});
        let merged = merge_settings::<TabIcon>(&host);
        assert!(!merged.changed);
        assert_eq!(merged.settings.key_combo(), Some(vec!["shift".into(), "f1".into()]));
    }

    #[test]
    fn test_invalid_settings_fall_back_to_defaults() {
        let merged = merge_settings::<HealthMeter>(&json!({"showNumbers": "yes"}));
        assert!(merged.settings.show_numbers);
        assert_eq!(merged.value["showNumbers"], json!(true));
        assert!(merged.changed);
    }
}
