//! Colours used by the renderers.

use crate::models::HealthStatus;

/// Opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 0xFF])
    }
}

pub const WHITE: Rgb = Rgb::from_hex(0xFFFFFF);
pub const BLACK: Rgb = Rgb::from_hex(0x000000);

pub const HEALTH_NORMAL: Rgb = Rgb::from_hex(0xB00905);
pub const HEALTH_POISONED: Rgb = Rgb::from_hex(0x19DA00);
pub const HEALTH_VENOMED: Rgb = Rgb::from_hex(0x24573D);
pub const HEALTH_DISEASED: Rgb = Rgb::from_hex(0xC5BA73);

pub const RUN_ENABLED: Rgb = Rgb::from_hex(0xCEA801);
pub const RUN_DISABLED: Rgb = Rgb::from_hex(0xACADA3);

/// Interior of an orb where no fill is drawn.
pub const ORB_EMPTY: Rgb = Rgb::from_hex(0x1E1C18);
pub const ORB_FRAME: Rgb = Rgb::from_hex(0x3E3529);
pub const ORB_FRAME_HIGHLIGHT: Rgb = Rgb::from_hex(0x5C5042);

/// Fill colours for a health status. Combined statuses return a second
/// colour for the right half of the orb.
pub fn health_colors(status: HealthStatus) -> (Rgb, Option<Rgb>) {
    match status {
        HealthStatus::None => (HEALTH_NORMAL, None),
        HealthStatus::Poisoned => (HEALTH_POISONED, None),
        HealthStatus::Venomed => (HEALTH_VENOMED, None),
        HealthStatus::Diseased => (HEALTH_DISEASED, None),
        HealthStatus::PoisonedDiseased => (HEALTH_POISONED, Some(HEALTH_DISEASED)),
        HealthStatus::VenomedDiseased => (HEALTH_VENOMED, Some(HEALTH_DISEASED)),
    }
}

/// Label colour ramp: red at 0, yellow at 0.5, green at 1.
pub fn label_color(pct: f64) -> Rgb {
    let pct = pct.clamp(0.0, 1.0);
    if pct > 0.5 {
        let red = (255.0 * (1.0 - (pct - 0.5) / 0.5)).round() as u8;
        Rgb::new(red, 255, 0)
    } else {
        let green = (255.0 * (pct / 0.5)).round() as u8;
        Rgb::new(255, green, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex(0xB00905), Rgb::new(0xB0, 0x09, 0x05));
        assert_eq!(WHITE, Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_label_color_endpoints() {
        assert_eq!(label_color(1.0), Rgb::from_hex(0x00FF00));
        assert_eq!(label_color(0.5), Rgb::from_hex(0xFFFF00));
        assert_eq!(label_color(0.0), Rgb::from_hex(0xFF0000));
    }

    #[test]
    fn test_label_color_midpoints() {
        assert_eq!(label_color(0.75), Rgb::new(128, 255, 0));
        assert_eq!(label_color(0.25), Rgb::new(255, 128, 0));
    }

    #[test]
    fn test_label_color_clamps() {
        assert_eq!(label_color(-1.0), label_color(0.0));
        assert_eq!(label_color(3.0), label_color(1.0));
    }

    #[test]
    fn test_combined_statuses_split() {
        assert_eq!(
            health_colors(HealthStatus::PoisonedDiseased),
            (HEALTH_POISONED, Some(HEALTH_DISEASED))
        );
        assert_eq!(
            health_colors(HealthStatus::VenomedDiseased),
            (HEALTH_VENOMED, Some(HEALTH_DISEASED))
        );
        assert_eq!(health_colors(HealthStatus::None), (HEALTH_NORMAL, None));
    }
}
