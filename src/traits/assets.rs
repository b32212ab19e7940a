//! Icon and background asset source.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    /// Names are slash-separated and may not escape the asset root.
    #[error("invalid asset name: {0}")]
    InvalidName(String),

    #[error("failed to read asset {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode asset {name}: {message}")]
    Decode { name: String, message: String },
}

/// Loads raw (encoded) image bytes by asset name, e.g. `tabs/inventory`.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn load(&self, name: &str) -> Result<Bytes, AssetError>;
}

/// Check that `name` is a relative, slash-separated path without `..` or empty segments.
pub fn validate_asset_name(name: &str) -> Result<(), AssetError> {
    let valid = !name.is_empty()
        && name.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && !segment.contains('\\')
                && !segment.contains(':')
        });
    if valid {
        Ok(())
    } else {
        Err(AssetError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_asset_name("tabs/inventory").is_ok());
        assert!(validate_asset_name("orbs/prayer_fill_active").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "/etc/passwd", "../secret", "tabs//x", "tabs/..", "c:\\x", "a\\b"] {
            assert!(
                matches!(validate_asset_name(name), Err(AssetError::InvalidName(_))),
                "expected {name:?} to be rejected"
            );
        }
    }
}
