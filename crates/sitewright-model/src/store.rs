//! Configuration store backed by a file on disk.
//!
//! The file holds the configuration fields at top level and an optional
//! `[build]` table. The format is chosen from the file extension.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::image::ImageRef;
use crate::settings::BuildSettings;

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Pick a format from the path extension.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteFile {
    #[serde(default)]
    pub build: BuildSettings,

    #[serde(flatten)]
    pub site: Configuration,
}

/// Errors that can occur when loading or saving a configuration.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported configuration format: {0} (expected .toml, .json or .yaml)")]
    UnsupportedFormat(PathBuf),
}

/// Loads and saves a configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    format: Format,
}

impl ConfigStore {
    /// Create a store for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let format = Format::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Directory that relative paths in the configuration resolve against.
    pub fn base_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    /// Load the file, filling anything it omits from the defaults.
    pub fn load(&self) -> Result<SiteFile, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let file = self.parse(&content)?;
        tracing::debug!("Loaded configuration from {}", self.path.display());
        Ok(file)
    }

    /// Load the file, or the defaults when it does not exist.
    pub fn load_or_default(&self) -> Result<SiteFile, StoreError> {
        if self.exists() {
            self.load()
        } else {
            tracing::debug!(
                "No configuration at {}, using defaults",
                self.path.display()
            );
            Ok(SiteFile::default())
        }
    }

    /// Parse configuration text in this store's format.
    pub fn parse(&self, content: &str) -> Result<SiteFile, StoreError> {
        let parse_err = |message: String| StoreError::Parse {
            path: self.path.clone(),
            message,
        };

        match self.format {
            Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
            Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string())),
        }
    }

    /// Serialize to text in this store's format.
    pub fn render(&self, file: &SiteFile) -> Result<String, StoreError> {
        match self.format {
            Format::Toml => {
                toml::to_string_pretty(file).map_err(|e| StoreError::Serialize(e.to_string()))
            }
            Format::Json => serde_json::to_string_pretty(file)
                .map_err(|e| StoreError::Serialize(e.to_string())),
            Format::Yaml => {
                serde_yaml::to_string(file).map_err(|e| StoreError::Serialize(e.to_string()))
            }
        }
    }

    /// Write the file, creating parent directories as needed.
    pub fn save(&self, file: &SiteFile) -> Result<(), StoreError> {
        let text = self.render(file)?;
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, text).map_err(write_err)?;

        tracing::debug!("Saved configuration to {}", self.path.display());
        Ok(())
    }
}

/// Replace image fields that name local files with inline data URIs.
///
/// Paths resolve against `base_dir`. Values that do not name an existing file
/// are left alone. A file that exists but cannot be inlined is replaced by an
/// empty image and logged. Returns the number of images inlined.
pub fn inline_local_images(config: &mut Configuration, base_dir: &Path) -> usize {
    let mut inlined = 0;

    config.for_each_image_mut(|label, image| {
        if !image.is_local_path() {
            return;
        }

        let path = base_dir.join(image.as_str().trim());
        if !path.is_file() {
            tracing::debug!("{}: {} is not a local file, keeping as URL", label, path.display());
            return;
        }

        match ImageRef::from_file(&path) {
            Ok(inline) => {
                *image = inline;
                inlined += 1;
            }
            Err(e) => {
                tracing::warn!("{}: {}", label, e);
                *image = ImageRef::empty();
            }
        }
    });

    inlined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{Page, Section};
    use crate::image::ImageKind;
    use crate::settings::EscapePolicy;
    use crate::theme::StyleField;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn picks_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.toml")).unwrap(), Format::Toml);
        assert_eq!(Format::from_path(Path::new("a.JSON")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.yml")).unwrap(), Format::Yaml);
        assert!(matches!(
            Format::from_path(Path::new("a.ini")),
            Err(StoreError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn parses_toml_with_build_table() {
        let store = ConfigStore::new("site.toml").unwrap();
        let file = store
            .parse(
                r#"
title = "Acme"
theme = "vibrant"

[build]
output = "public"
escape = "html"

[pages]
home = true

[sections]
hero = true
faq = true

[overrides]
header_bg = "bg-black"

[[features]]
heading = "Fast"
description = "Loads quickly"
"#,
            )
            .unwrap();

        assert_eq!(file.build.output, "public");
        assert_eq!(file.build.escape, EscapePolicy::Html);
        assert_eq!(file.site.title, "Acme");
        assert!(file.site.pages.get(Page::Home));
        assert!(!file.site.pages.get(Page::About));
        assert!(file.site.sections.get(Section::Faq));
        assert_eq!(file.site.features.len(), 1);
        assert_eq!(file.site.style().header_bg, "bg-black");
        assert_eq!(file.site.style().primary_color, "#ef4444");
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let store = ConfigStore::new("broken.toml").unwrap();
        let err = store.parse("title = [").unwrap_err();

        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn round_trips_toml() {
        let temp = tempdir().unwrap();
        let store = ConfigStore::new(temp.path().join("site.toml")).unwrap();

        let mut file = SiteFile::default();
        file.site.title = "Round Trip".to_string();
        file.site.select_theme("dark-mode");
        file.site.set_override(StyleField::ButtonText, "text-black");

        store.save(&file).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, file);
    }

    #[test]
    fn round_trips_json() {
        let temp = tempdir().unwrap();
        let store = ConfigStore::new(temp.path().join("nested/site.json")).unwrap();

        let file = SiteFile::default();
        store.save(&file).unwrap();

        assert_eq!(store.load().unwrap(), file);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let temp = tempdir().unwrap();
        let store = ConfigStore::new(temp.path().join("absent.yaml")).unwrap();

        assert!(!store.exists());
        assert_eq!(store.load_or_default().unwrap(), SiteFile::default());
        assert!(matches!(store.load(), Err(StoreError::Read { .. })));
    }

    #[test]
    fn inlines_existing_local_images() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("hero.png"), [1u8, 2, 3]).unwrap();
        fs::write(temp.path().join("notes.txt"), "x").unwrap();

        let mut config = Configuration::default();
        config.images.gallery_image_1 = ImageRef::from("hero.png");
        config.images.gallery_image_2 = ImageRef::from("notes.txt");
        config.images.gallery_image_3 = ImageRef::from("missing.png");
        config.images.gallery_image_4 = ImageRef::from("https://example.com/a.png");

        let count = inline_local_images(&mut config, temp.path());

        assert_eq!(count, 1);
        assert_eq!(config.images.gallery_image_1.kind(), ImageKind::Inline);
        assert_eq!(config.images.gallery_image_2.kind(), ImageKind::Empty);
        assert_eq!(config.images.gallery_image_3.as_str(), "missing.png");
        assert_eq!(
            config.images.gallery_image_4.as_str(),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn base_dir_defaults_to_current() {
        let store = ConfigStore::new("site.toml").unwrap();
        assert_eq!(store.base_dir(), Path::new("."));
    }
}
