//! Static site builder.

use std::path::PathBuf;
use std::time::Instant;

use tokio::fs;

use sitewright_model::{Configuration, EscapePolicy};

use crate::assets::AssetPipeline;
use crate::document::{RenderOptions, SiteRenderer};
use crate::RenderError;

/// Configuration for building a site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Minify the stylesheet
    pub minify: bool,

    /// Escaping applied to text fields
    pub escape: EscapePolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            minify: false,
            escape: EscapePolicy::Trusted,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Files written, in write order
    pub files: Vec<PathBuf>,

    /// Total bytes written
    pub bytes: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `index.html`, `style.css` and `script.js` for a configuration.
#[derive(Debug)]
pub struct SiteBuilder {
    config: BuildConfig,
    renderer: SiteRenderer,
}

impl SiteBuilder {
    /// Create a new builder.
    pub fn new(config: BuildConfig) -> Result<Self, BuildError> {
        let renderer = SiteRenderer::new(RenderOptions {
            escape: config.escape,
            ..Default::default()
        })?;

        Ok(Self { config, renderer })
    }

    /// Render the configuration and write the artifacts.
    pub async fn build(&self, site: &Configuration) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let artifacts = self.renderer.render(site)?;

        let style = if self.config.minify {
            match AssetPipeline::minify_css(&artifacts.style) {
                Ok(minified) => minified,
                Err(e) => {
                    tracing::warn!("Keeping unminified stylesheet: {}", e);
                    artifacts.style
                }
            }
        } else {
            artifacts.style
        };

        let out = &self.config.output_dir;
        fs::create_dir_all(out)
            .await
            .map_err(|source| BuildError::Write {
                path: out.clone(),
                source,
            })?;

        let mut files = Vec::new();
        let mut bytes = 0;
        for (name, content) in [
            ("index.html", artifacts.document),
            ("style.css", style),
            ("script.js", artifacts.script),
        ] {
            let path = out.join(name);
            bytes += content.len();
            fs::write(&path, content)
                .await
                .map_err(|source| BuildError::Write {
                    path: path.clone(),
                    source,
                })?;
            tracing::debug!("Wrote {}", path.display());
            files.push(path);
        }

        Ok(BuildResult {
            files,
            bytes,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: out.clone(),
        })
    }
}
