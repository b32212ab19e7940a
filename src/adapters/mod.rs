//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`HttpStateSource`] - pulls snapshots from the game client
//! - [`FsAssetSource`] - PNG assets from a directory
//! - [`CommandKeySender`] - key injection through an external command
//!
//! The device sink lives in [`crate::streamdeck`] next to its transport.
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for every trait.

pub mod command_keys;
pub mod fs_assets;
pub mod http_source;
pub mod mock;
pub mod reqwest_http;

pub use command_keys::CommandKeySender;
pub use fs_assets::FsAssetSource;
pub use http_source::HttpStateSource;
pub use mock::{InMemoryAssets, MockHttpClient, RecordingKeySender, RecordingSink, ScriptedSource};
pub use reqwest_http::ReqwestHttpClient;
