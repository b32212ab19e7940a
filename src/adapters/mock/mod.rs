//! Mock implementations for testing.
//!
//! Test doubles for every capability trait, so the registry, drivers and
//! renderers can be exercised without a device host, network or files.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client answering from per-URL queues
//! - [`RecordingSink`] - device sink recording every call
//! - [`RecordingKeySender`] - key sender recording every combination
//! - [`InMemoryAssets`] - asset source backed by a map
//! - [`ScriptedSource`] - state source replaying queued results

pub mod assets;
pub mod device;
pub mod http;
pub mod keys;
pub mod source;

pub use assets::InMemoryAssets;
pub use device::{RecordingSink, SinkCall};
pub use http::{MockHttpClient, RecordedRequest};
pub use keys::RecordingKeySender;
pub use source::ScriptedSource;
