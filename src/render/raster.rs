//! Rasterization of frame descriptors into PNG bitmaps.
//!
//! Layers are drawn in order onto a transparent square canvas. Image layers
//! whose asset cannot be loaded are skipped; everything else still draws.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex, MutexGuard};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use thiserror::Error;
use tracing::{debug, warn};

use super::color::{Rgb, BLACK, ORB_EMPTY, ORB_FRAME, ORB_FRAME_HIGHLIGHT};
use super::font;
use super::frame::{Frame, Label, Layer, Placement};
use super::CANVAS_SIZE;
use crate::models::TextPosition;
use crate::traits::{AssetError, AssetSource};

/// Radius of the orb interior.
pub const ORB_RADIUS: f32 = 64.0;
/// Width of the frame ring around the orb.
pub const ORB_RING: f32 = 6.0;
/// Scale factor applied to the 5x7 label font.
pub const LABEL_SCALE: u32 = 4;
/// Outline thickness around label glyphs.
pub const LABEL_OUTLINE: u32 = 3;
/// Distance between a label and the canvas edge.
pub const LABEL_MARGIN: u32 = 8;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

/// Encoded bitmap ready for the device sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonImage {
    png: Bytes,
}

impl ButtonImage {
    pub fn from_png(png: impl Into<Bytes>) -> Self {
        Self { png: png.into() }
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// `data:` URL understood by the device host.
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", BASE64.encode(&self.png))
    }
}

/// Write-once cache of decoded assets. A failed load is remembered as
/// missing so it is only attempted (and logged) once.
pub struct AssetCache {
    source: Arc<dyn AssetSource>,
    entries: Mutex<HashMap<String, Option<Arc<RgbaImage>>>>,
}

impl AssetCache {
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Option<Arc<RgbaImage>>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub async fn get(&self, name: &str) -> Option<Arc<RgbaImage>> {
        if let Some(entry) = self.entries().get(name) {
            return entry.clone();
        }

        let loaded = match self.load(name).await {
            Ok(image) => Some(Arc::new(image)),
            Err(e) => {
                warn!(asset = name, "Asset unavailable, layer omitted: {}", e);
                None
            }
        };
        self.entries()
            .entry(name.to_string())
            .or_insert(loaded)
            .clone()
    }

    async fn load(&self, name: &str) -> Result<RgbaImage, AssetError> {
        let bytes = self.source.load(name).await?;
        let decoded = image::load_from_memory(&bytes).map_err(|e| AssetError::Decode {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(decoded.to_rgba8())
    }

    /// Number of names looked up so far, including misses.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turns frames into bitmaps.
pub struct Rasterizer {
    assets: AssetCache,
    size: u32,
}

impl Rasterizer {
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self {
            assets: AssetCache::new(source),
            size: CANVAS_SIZE,
        }
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    /// Draw every layer of `frame` onto a fresh canvas.
    pub async fn rasterize(&self, frame: &Frame) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(self.size, self.size, Rgba([0, 0, 0, 0]));
        for layer in &frame.layers {
            match layer {
                Layer::OrbBase => draw_orb_base(&mut canvas),
                Layer::OrbFill { color, height } => {
                    draw_orb_fill(&mut canvas, *height, |_| *color)
                }
                Layer::OrbSplitFill {
                    left,
                    right,
                    height,
                } => {
                    let half = self.size / 2;
                    draw_orb_fill(&mut canvas, *height, |x| if x < half { *left } else { *right })
                }
                Layer::OrbShade => draw_orb_shade(&mut canvas),
                Layer::OrbFrame => draw_orb_frame(&mut canvas),
                Layer::Image { asset, placement } => match self.assets.get(asset).await {
                    Some(image) => draw_image(&mut canvas, &image, *placement),
                    None => debug!(asset = asset.as_str(), "Skipping missing image layer"),
                },
                Layer::Label(label) => draw_label(&mut canvas, label),
            }
        }
        canvas
    }

    /// Rasterize and encode as PNG.
    pub async fn render(&self, frame: &Frame) -> Result<ButtonImage, RasterError> {
        let canvas = self.rasterize(frame).await;
        encode_png(&canvas)
    }
}

pub fn encode_png(canvas: &RgbaImage) -> Result<ButtonImage, RasterError> {
    let mut buf = Vec::new();
    let mut cursor = Cursor::new(&mut buf);
    canvas
        .write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    Ok(ButtonImage::from_png(buf))
}

/// Distance from the canvas centre to the centre of pixel (`x`, `y`).
fn distance_from_center(canvas: &RgbaImage, x: u32, y: u32) -> f32 {
    let center = canvas.width() as f32 / 2.0;
    let dx = x as f32 + 0.5 - center;
    let dy = y as f32 + 0.5 - center;
    (dx * dx + dy * dy).sqrt()
}

fn draw_orb_base(canvas: &mut RgbaImage) {
    let color = ORB_EMPTY.to_rgba();
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            if distance_from_center(canvas, x, y) <= ORB_RADIUS {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

fn draw_orb_fill(canvas: &mut RgbaImage, height: u32, color_at: impl Fn(u32) -> Rgb) {
    let height = height.min(canvas.height());
    let top = canvas.height() - height;
    for y in top..canvas.height() {
        for x in 0..canvas.width() {
            if distance_from_center(canvas, x, y) <= ORB_RADIUS {
                canvas.put_pixel(x, y, color_at(x).to_rgba());
            }
        }
    }
}

/// Darken towards the lower right, as if lit from the upper left.
fn draw_orb_shade(canvas: &mut RgbaImage) {
    let center = canvas.width() as f32 / 2.0;
    let light = center - ORB_RADIUS * 0.35;
    let reach = ORB_RADIUS * 1.35;
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            if distance_from_center(canvas, x, y) > ORB_RADIUS {
                continue;
            }
            let dx = x as f32 + 0.5 - light;
            let dy = y as f32 + 0.5 - light;
            let t = ((dx * dx + dy * dy).sqrt() / reach).min(1.0);
            let keep = 1.0 - 0.55 * t * t;
            let pixel = canvas.get_pixel_mut(x, y);
            for channel in pixel.0.iter_mut().take(3) {
                *channel = (*channel as f32 * keep).round() as u8;
            }
        }
    }
}

fn draw_orb_frame(canvas: &mut RgbaImage) {
    let ring = ORB_FRAME.to_rgba();
    let highlight = ORB_FRAME_HIGHLIGHT.to_rgba();
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let d = distance_from_center(canvas, x, y);
            if d > ORB_RADIUS && d <= ORB_RADIUS + ORB_RING {
                let color = if d <= ORB_RADIUS + 1.5 { highlight } else { ring };
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

fn draw_image(canvas: &mut RgbaImage, image: &RgbaImage, placement: Placement) {
    let size = canvas.width();
    match placement {
        Placement::Stretch => {
            let scaled = fit_exact(image, size);
            imageops::overlay(canvas, &scaled, 0, 0);
        }
        Placement::Centered => {
            let scaled = fit_within(image, size);
            let x = (size - scaled.width()) / 2;
            let y = (size - scaled.height()) / 2;
            imageops::overlay(canvas, &scaled, i64::from(x), i64::from(y));
        }
        Placement::TopRows(rows) => {
            let rows = rows.min(size);
            if rows == 0 {
                return;
            }
            let scaled = fit_exact(image, size);
            let top = imageops::crop_imm(&scaled, 0, 0, size, rows).to_image();
            imageops::overlay(canvas, &top, 0, 0);
        }
    }
}

fn fit_exact(image: &RgbaImage, size: u32) -> RgbaImage {
    if image.dimensions() == (size, size) {
        image.clone()
    } else {
        imageops::resize(image, size, size, FilterType::Triangle)
    }
}

fn fit_within(image: &RgbaImage, size: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w <= size && h <= size {
        return image.clone();
    }
    let scale = size as f32 / w.max(h) as f32;
    let nw = ((w as f32 * scale).round() as u32).clamp(1, size);
    let nh = ((h as f32 * scale).round() as u32).clamp(1, size);
    imageops::resize(image, nw, nh, FilterType::Triangle)
}

/// Top-left corner of a `width` x `height` block anchored at `position`.
pub fn label_origin(canvas_size: u32, width: u32, height: u32, position: TextPosition) -> (i64, i64) {
    let size = i64::from(canvas_size);
    let (w, h, m) = (i64::from(width), i64::from(height), i64::from(LABEL_MARGIN));
    let start = m;
    let x_center = (size - w) / 2;
    let x_end = size - w - m;
    let y_center = (size - h) / 2;
    let y_end = size - h - m;

    match position {
        TextPosition::TopLeft => (start, start),
        TextPosition::Top => (x_center, start),
        TextPosition::TopRight => (x_end, start),
        TextPosition::Left => (start, y_center),
        TextPosition::Middle => (x_center, y_center),
        TextPosition::Right => (x_end, y_center),
        TextPosition::BottomLeft => (start, y_end),
        TextPosition::Bottom => (x_center, y_end),
        TextPosition::BottomRight => (x_end, y_end),
    }
}

fn draw_label(canvas: &mut RgbaImage, label: &Label) {
    let (width, height) = font::text_size(&label.text, LABEL_SCALE);
    if width == 0 {
        return;
    }
    let (x0, y0) = label_origin(canvas.width(), width, height, label.position);

    // Outline pass first so the fill pass covers its inner edge.
    for (grow, color) in [(LABEL_OUTLINE, BLACK), (0, label.color)] {
        let mut pen_x = x0;
        for glyph in label.text.chars().filter_map(font::glyph) {
            for row in 0..font::GLYPH_HEIGHT {
                for col in 0..font::GLYPH_WIDTH {
                    if !font::is_set(glyph, col, row) {
                        continue;
                    }
                    let bx = pen_x + i64::from(col * LABEL_SCALE);
                    let by = y0 + i64::from(row * LABEL_SCALE);
                    fill_rect(canvas, bx, by, LABEL_SCALE, grow, color);
                }
            }
            pen_x += i64::from((font::GLYPH_WIDTH + 1) * LABEL_SCALE);
        }
    }
}

/// Fill a `side`-pixel square at (`x`, `y`) grown by `grow` on every edge,
/// clipped to the canvas.
fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, side: u32, grow: u32, color: Rgb) {
    let grow = i64::from(grow);
    let side = i64::from(side);
    let rgba = color.to_rgba();
    for py in (y - grow)..(y + side + grow) {
        for px in (x - grow)..(x + side + grow) {
            if px >= 0
                && py >= 0
                && px < i64::from(canvas.width())
                && py < i64::from(canvas.height())
            {
                canvas.put_pixel(px as u32, py as u32, rgba);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryAssets;
    use crate::render::color::{HEALTH_DISEASED, HEALTH_NORMAL, HEALTH_POISONED, WHITE};

    fn rasterizer(assets: InMemoryAssets) -> Rasterizer {
        Rasterizer::new(Arc::new(assets))
    }

    fn rgb_at(canvas: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
        canvas.get_pixel(x, y).0
    }

    #[tokio::test]
    async fn test_orb_fill_respects_height() {
        let frame = Frame::new().with_layer(Layer::OrbFill {
            color: HEALTH_NORMAL,
            height: 72,
        });
        let canvas = rasterizer(InMemoryAssets::new()).rasterize(&frame).await;

        // Below the midline inside the orb is filled, above is untouched.
        assert_eq!(rgb_at(&canvas, 72, 100), [0xB0, 0x09, 0x05, 0xFF]);
        assert_eq!(rgb_at(&canvas, 72, 40)[3], 0);
        // Corners lie outside the orb.
        assert_eq!(rgb_at(&canvas, 0, 143)[3], 0);
    }

    #[tokio::test]
    async fn test_split_fill_halves() {
        let frame = Frame::new().with_layer(Layer::OrbSplitFill {
            left: HEALTH_POISONED,
            right: HEALTH_DISEASED,
            height: 144,
        });
        let canvas = rasterizer(InMemoryAssets::new()).rasterize(&frame).await;
        assert_eq!(rgb_at(&canvas, 40, 72), HEALTH_POISONED.to_rgba().0);
        assert_eq!(rgb_at(&canvas, 104, 72), HEALTH_DISEASED.to_rgba().0);
    }

    #[tokio::test]
    async fn test_shade_darkens_lower_right_more() {
        let frame = Frame::new()
            .with_layer(Layer::OrbFill {
                color: WHITE,
                height: 144,
            })
            .with_layer(Layer::OrbShade);
        let canvas = rasterizer(InMemoryAssets::new()).rasterize(&frame).await;
        let upper_left = rgb_at(&canvas, 50, 50)[0];
        let lower_right = rgb_at(&canvas, 110, 110)[0];
        assert!(upper_left > lower_right);
    }

    #[tokio::test]
    async fn test_missing_asset_is_skipped() {
        let frame = Frame::new()
            .with_layer(Layer::OrbBase)
            .with_image("tabs/missing", Placement::Stretch);
        let raster = rasterizer(InMemoryAssets::new());
        let canvas = raster.rasterize(&frame).await;
        assert_eq!(rgb_at(&canvas, 72, 72), ORB_EMPTY.to_rgba().0);
        assert_eq!(raster.assets().len(), 1);
    }

    #[tokio::test]
    async fn test_stretch_and_top_rows() {
        let assets = InMemoryAssets::new();
        assets.insert_solid("fill", 16, 16, [0, 0, 255, 255]);
        assets.insert_solid("empty", 16, 16, [40, 40, 40, 255]);
        let frame = Frame::new()
            .with_image("fill", Placement::Stretch)
            .with_image("empty", Placement::TopRows(36));
        let canvas = rasterizer(assets).rasterize(&frame).await;
        assert_eq!(rgb_at(&canvas, 72, 10), [40, 40, 40, 255]);
        assert_eq!(rgb_at(&canvas, 72, 100), [0, 0, 255, 255]);
    }

    #[tokio::test]
    async fn test_centered_icon() {
        let assets = InMemoryAssets::new();
        assets.insert_solid("icon", 32, 32, [255, 0, 0, 255]);
        let frame = Frame::new().with_image("icon", Placement::Centered);
        let canvas = rasterizer(assets).rasterize(&frame).await;
        assert_eq!(rgb_at(&canvas, 72, 72), [255, 0, 0, 255]);
        assert_eq!(rgb_at(&canvas, 10, 10)[3], 0);
    }

    #[tokio::test]
    async fn test_label_is_outlined() {
        let frame = Frame::new().with_layer(Layer::Label(Label {
            text: "1".to_string(),
            color: WHITE,
            position: TextPosition::TopLeft,
        }));
        let canvas = rasterizer(InMemoryAssets::new()).rasterize(&frame).await;
        // Glyph "1" has its top pixel at column 2, row 0.
        let x = LABEL_MARGIN + 2 * LABEL_SCALE;
        let y = LABEL_MARGIN;
        assert_eq!(rgb_at(&canvas, x, y), [255, 255, 255, 255]);
        assert_eq!(rgb_at(&canvas, x, y - 1), [0, 0, 0, 255]);
    }

    #[test]
    fn test_label_origins() {
        assert_eq!(label_origin(144, 20, 28, TextPosition::TopLeft), (8, 8));
        assert_eq!(label_origin(144, 20, 28, TextPosition::Middle), (62, 58));
        assert_eq!(label_origin(144, 20, 28, TextPosition::BottomRight), (116, 108));
    }

    #[tokio::test]
    async fn test_render_is_deterministic_png() {
        let frame = crate::render::health_meter(
            &crate::models::StateSnapshot::logged_out(),
            &crate::models::MeterSettings::default(),
        );
        let raster = rasterizer(InMemoryAssets::new());
        let first = raster.render(&frame).await.unwrap();
        let second = raster.render(&frame).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(&first.png()[1..4], b"PNG");
        assert!(first.to_data_url().starts_with("data:image/png;base64,"));
    }
}
