//! Image references: empty, external URL, or inline data URI.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// What an image field currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Empty,
    Url,
    Inline,
}

/// An image field value. All kinds are valid wherever an image is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn kind(&self) -> ImageKind {
        if self.is_empty() {
            ImageKind::Empty
        } else if self.0.starts_with("data:") {
            ImageKind::Inline
        } else {
            ImageKind::Url
        }
    }

    /// The image source, or `fallback` when the field is empty.
    pub fn or_placeholder(&self, fallback: &str) -> String {
        if self.is_empty() {
            fallback.to_string()
        } else {
            self.0.clone()
        }
    }

    /// Whether the value looks like a path on the local filesystem rather
    /// than something a browser can load directly.
    pub fn is_local_path(&self) -> bool {
        let value = self.0.trim();
        !value.is_empty()
            && !value.starts_with("data:")
            && !value.starts_with("http://")
            && !value.starts_with("https://")
            && !value.starts_with("//")
            && !value.starts_with('#')
    }

    /// Read an image file and encode it as a base64 data URI.
    pub fn from_file(path: &Path) -> Result<Self, AssetError> {
        let mime = mime_for(path).ok_or_else(|| AssetError::UnknownType(path.to_path_buf()))?;
        let bytes = fs::read(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes))))
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Errors that can occur when reading a local image.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported image type: {0}")]
    UnknownType(PathBuf),
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn classifies_values() {
        assert_eq!(ImageRef::empty().kind(), ImageKind::Empty);
        assert_eq!(ImageRef::from("  ").kind(), ImageKind::Empty);
        assert_eq!(ImageRef::from("https://x/y.png").kind(), ImageKind::Url);
        assert_eq!(
            ImageRef::from("data:image/png;base64,AAAA").kind(),
            ImageKind::Inline
        );
    }

    #[test]
    fn falls_back_when_empty() {
        assert_eq!(ImageRef::empty().or_placeholder("ph"), "ph");
        assert_eq!(ImageRef::from("a.png").or_placeholder("ph"), "a.png");
    }

    #[test]
    fn detects_local_paths() {
        assert!(ImageRef::from("images/logo.png").is_local_path());
        assert!(!ImageRef::from("https://example.com/a.png").is_local_path());
        assert!(!ImageRef::from("data:image/png;base64,AA").is_local_path());
        assert!(!ImageRef::empty().is_local_path());
    }

    #[test]
    fn inlines_image_files() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("dot.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let image = ImageRef::from_file(&path).unwrap();

        assert_eq!(image.kind(), ImageKind::Inline);
        assert!(image.as_str().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn rejects_unknown_types() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        assert!(matches!(
            ImageRef::from_file(&path),
            Err(AssetError::UnknownType(_))
        ));
    }

    #[test]
    fn reports_missing_files() {
        let result = ImageRef::from_file(Path::new("/nonexistent/a.png"));
        assert!(matches!(result, Err(AssetError::Read { .. })));
    }
}
