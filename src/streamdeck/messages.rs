use serde::{Deserialize, Serialize};

/// Events received from the device host.
///
/// Only the per-button events the plugin reacts to are modelled; every other
/// event (device connects, property inspector traffic, ...) is `Unknown`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum InboundEvent {
    WillAppear(ActionEvent),
    WillDisappear(ActionEvent),
    DidReceiveSettings(ActionEvent),
    KeyDown(ActionEvent),
    KeyUp(ActionEvent),
    #[serde(other)]
    Unknown,
}

impl InboundEvent {
    pub fn action_event(&self) -> Option<&ActionEvent> {
        match self {
            InboundEvent::WillAppear(e)
            | InboundEvent::WillDisappear(e)
            | InboundEvent::DidReceiveSettings(e)
            | InboundEvent::KeyDown(e)
            | InboundEvent::KeyUp(e) => Some(e),
            InboundEvent::Unknown => None,
        }
    }
}

/// A button-scoped event.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActionEvent {
    /// Action UUID from the plugin manifest, selects the button kind.
    pub action: String,
    /// Opaque id of the button instance.
    pub context: String,
    #[serde(default)]
    pub payload: ActionPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ActionPayload {
    /// Stored settings; `null` or missing means none.
    #[serde(default)]
    pub settings: serde_json::Value,
}

/// First message sent after connecting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub event: String,
    pub uuid: String,
}

/// Commands sent to the device host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum OutboundEvent {
    SetImage {
        context: String,
        payload: ImagePayload,
    },
    SetState {
        context: String,
        payload: StatePayload,
    },
    SetTitle {
        context: String,
        payload: TitlePayload,
    },
    SetSettings {
        context: String,
        payload: serde_json::Value,
    },
    GetSettings {
        context: String,
    },
}

impl OutboundEvent {
    pub fn context(&self) -> &str {
        match self {
            OutboundEvent::SetImage { context, .. }
            | OutboundEvent::SetState { context, .. }
            | OutboundEvent::SetTitle { context, .. }
            | OutboundEvent::SetSettings { context, .. }
            | OutboundEvent::GetSettings { context } => context,
        }
    }
}

/// `target` 0 addresses both the hardware and the software display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePayload {
    pub image: String,
    pub target: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatePayload {
    pub state: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitlePayload {
    pub title: String,
    pub target: u8,
}
