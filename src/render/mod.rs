//! Button rendering.
//!
//! Rendering is split in two stages:
//!
//! 1. A per-kind renderer ([`health_meter`], [`tab_icon`], ...) maps a
//!    snapshot and the button's settings to a [`Frame`] descriptor. This is
//!    pure and cheap, so it runs on every state change.
//! 2. The [`Rasterizer`] turns a frame into a PNG [`ButtonImage`]. This only
//!    runs when the frame's [`Fingerprint`] differs from the last one pushed.

pub mod color;
pub mod font;
pub mod frame;
pub mod icons;
pub mod meters;
pub mod raster;

/// Width and height of every button bitmap.
pub const CANVAS_SIZE: u32 = 144;

pub use color::{label_color, Rgb};
pub use frame::{Fingerprint, Frame, Label, Layer, Placement};
pub use icons::{prayer_icon, tab_icon};
pub use meters::{
    fill_height, health_meter, mask_height, prayer_meter, run_meter, special_attack_meter,
    SpecialAttackState,
};
pub use raster::{AssetCache, ButtonImage, RasterError, Rasterizer};
