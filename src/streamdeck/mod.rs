//! Device host transport.
//!
//! The host launches the plugin, which connects back over a local WebSocket,
//! registers, and then exchanges JSON events. Incoming button events drive
//! the registries; outgoing commands are produced by [`StreamDeckSink`].

pub mod client;
pub mod messages;
pub mod sink;

pub use client::{ConnectionError, DeckConnection};
pub use messages::{ActionEvent, ActionPayload, InboundEvent, OutboundEvent, Registration};
pub use sink::StreamDeckSink;
