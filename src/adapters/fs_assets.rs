//! Filesystem asset source.
//!
//! Assets live under a root directory as `<root>/<name>.png`, e.g.
//! `assets/tabs/inventory.png` for the asset `tabs/inventory`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use crate::traits::{validate_asset_name, AssetError, AssetSource};

#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an asset name resolves to. The name must already be validated.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let (dirs, file) = name.rsplit_once('/').unwrap_or(("", name));
        dirs.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment))
            .join(format!("{file}.png"))
    }
}

#[async_trait]
impl AssetSource for FsAssetSource {
    async fn load(&self, name: &str) -> Result<Bytes, AssetError> {
        validate_asset_name(name)?;
        let path = self.path_for(name);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AssetError::NotFound(name.to_string()))
            }
            Err(source) => Err(AssetError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_for() {
        let source = FsAssetSource::new("/opt/assets");
        assert_eq!(
            source.path_for("tabs/inventory"),
            PathBuf::from("/opt/assets/tabs/inventory.png")
        );
        assert_eq!(source.path_for("logo"), PathBuf::from("/opt/assets/logo.png"));
    }

    #[tokio::test]
    async fn test_dotted_name_keeps_its_suffix() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("prayers")).unwrap();
        std::fs::write(dir.path().join("prayers/rigour.v2.png"), b"v2").unwrap();
        std::fs::write(dir.path().join("prayers/rigour.png"), b"v1").unwrap();

        let source = FsAssetSource::new(dir.path());
        assert_eq!(
            source.path_for("prayers/rigour.v2"),
            dir.path().join("prayers/rigour.v2.png")
        );
        assert_eq!(&source.load("prayers/rigour.v2").await.unwrap()[..], b"v2");
    }

    #[tokio::test]
    async fn test_load_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("tabs")).unwrap();
        std::fs::write(dir.path().join("tabs/combat.png"), b"png-bytes").unwrap();

        let source = FsAssetSource::new(dir.path());
        let bytes = source.load("tabs/combat").await.unwrap();
        assert_eq!(&bytes[..], b"png-bytes");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = FsAssetSource::new(dir.path());
        assert!(matches!(
            source.load("tabs/missing").await,
            Err(AssetError::NotFound(name)) if name == "tabs/missing"
        ));
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let source = FsAssetSource::new(dir.path());
        assert!(matches!(
            source.load("../outside").await,
            Err(AssetError::InvalidName(_))
        ));
    }
}
