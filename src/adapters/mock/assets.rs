//! In-memory asset source for testing.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use image::{ImageFormat, Rgba, RgbaImage};

use crate::traits::{validate_asset_name, AssetError, AssetSource};

#[derive(Debug, Clone, Default)]
pub struct InMemoryAssets {
    assets: Arc<Mutex<HashMap<String, Bytes>>>,
    loads: Arc<AtomicUsize>,
}

impl InMemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under `name`.
    pub fn insert(&self, name: &str, data: impl Into<Bytes>) {
        self.assets
            .lock()
            .unwrap()
            .insert(name.to_string(), data.into());
    }

    /// Store a single-colour PNG of the given size.
    pub fn insert_solid(&self, name: &str, width: u32, height: u32, rgba: [u8; 4]) {
        let image = RgbaImage::from_pixel(width, height, Rgba(rgba));
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        self.insert(name, buf);
    }

    /// Number of `load` calls, hits and misses alike.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetSource for InMemoryAssets {
    async fn load(&self, name: &str) -> Result<Bytes, AssetError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        validate_asset_name(name)?;
        self.assets
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}
