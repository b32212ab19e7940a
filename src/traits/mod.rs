//! Trait abstractions for dependency injection and testability.
//!
//! Every external collaborator of the rendering core sits behind one of
//! these traits:
//!
//! - [`DeviceSink`] - displays bitmaps, states and titles on a button
//! - [`KeySender`] - injects key combinations
//! - [`AssetSource`] - loads icon and background images by name
//! - [`StateSource`] - fetches a snapshot for the pull driver
//! - [`HttpClient`] - HTTP transport used by the production state source

pub mod assets;
pub mod device;
pub mod http;
pub mod keys;
pub mod source;

pub use assets::{validate_asset_name, AssetError, AssetSource};
pub use device::{DeviceSink, SinkError};
pub use http::{HttpClient, HttpError, Response};
pub use keys::{KeyError, KeySender};
pub use source::{SourceError, StateSource};
