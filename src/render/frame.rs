//! Frame descriptors.
//!
//! Renderers never touch pixels. They return a [`Frame`]: an ordered list of
//! layers that the rasterizer turns into a bitmap. Two equal frames rasterize
//! to byte-identical images, so the frame hash doubles as the fingerprint used
//! to suppress redundant pushes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::color::Rgb;
use crate::models::TextPosition;

/// Comparable summary of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub u64);

/// How an image asset is placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Scaled to cover the whole canvas.
    Stretch,
    /// Drawn at its own size (shrunk to fit if larger), centred.
    Centered,
    /// Scaled like `Stretch`, but only the top `n` rows are drawn.
    TopRows(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    pub text: String,
    pub color: Rgb,
    pub position: TextPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Empty orb interior.
    OrbBase,
    /// Orb fill rising `height` rows from the bottom of the canvas.
    OrbFill { color: Rgb, height: u32 },
    /// Orb fill split down the middle into two colours.
    OrbSplitFill { left: Rgb, right: Rgb, height: u32 },
    /// Radial darkening lit from the upper left.
    OrbShade,
    /// Ring drawn around the orb.
    OrbFrame,
    Image { asset: String, placement: Placement },
    /// Outlined numeric text.
    Label(Label),
}

/// Everything needed to display one button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    pub layers: Vec<Layer>,
    /// Discrete device state for two-state buttons.
    pub state: Option<u8>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_optional_layer(mut self, layer: Option<Layer>) -> Self {
        self.layers.extend(layer);
        self
    }

    pub fn with_image(self, asset: impl Into<String>, placement: Placement) -> Self {
        self.with_layer(Layer::Image {
            asset: asset.into(),
            placement,
        })
    }

    pub fn with_state(mut self, state: u8) -> Self {
        self.state = Some(state);
        self
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        Fingerprint(hasher.finish())
    }

    pub fn label(&self) -> Option<&Label> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Label(label) => Some(label),
            _ => None,
        })
    }

    /// Names of every image asset the frame references, in draw order.
    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Image { asset, .. } => Some(asset.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::{HEALTH_NORMAL, WHITE};

    fn sample() -> Frame {
        Frame::new()
            .with_layer(Layer::OrbFill {
                color: HEALTH_NORMAL,
                height: 72,
            })
            .with_layer(Layer::Label(Label {
                text: "50".to_string(),
                color: WHITE,
                position: TextPosition::Middle,
            }))
    }

    #[test]
    fn test_equal_frames_share_fingerprint() {
        assert_eq!(sample().fingerprint(), sample().fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let other = Frame::new().with_layer(Layer::OrbFill {
            color: HEALTH_NORMAL,
            height: 71,
        });
        assert_ne!(sample().fingerprint(), other.fingerprint());
        assert_ne!(
            sample().fingerprint(),
            sample().with_state(1).fingerprint()
        );
    }

    #[test]
    fn test_label_and_assets() {
        let frame = sample()
            .with_image("tabs/background", Placement::Stretch)
            .with_image("tabs/inventory", Placement::Centered);
        assert_eq!(frame.label().unwrap().text, "50");
        assert_eq!(
            frame.assets().collect::<Vec<_>>(),
            vec!["tabs/background", "tabs/inventory"]
        );
    }

    #[test]
    fn test_optional_layer() {
        assert!(Frame::new().with_optional_layer(None).layers.is_empty());
        assert_eq!(
            Frame::new()
                .with_optional_layer(Some(Layer::OrbShade))
                .layers
                .len(),
            1
        );
    }
}
