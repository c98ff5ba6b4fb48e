//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sitewright_model::{inline_local_images, ConfigStore, EscapePolicy};
use sitewright_render::{BuildConfig, SiteBuilder};

/// Flags that override the `[build]` table.
#[derive(Debug, Default)]
pub struct BuildOptions {
    pub output: Option<PathBuf>,
    pub minify: bool,
    pub escape_html: bool,
}

/// Run the build command.
pub async fn run(config: &Path, options: BuildOptions) -> Result<()> {
    tracing::info!("Building site...");

    let store = ConfigStore::new(config)?;
    let mut file = store
        .load_or_default()
        .with_context(|| format!("Failed to load {}", config.display()))?;

    if file.build.inline_images {
        let inlined = inline_local_images(&mut file.site, store.base_dir());
        if inlined > 0 {
            tracing::info!("Inlined {} local images", inlined);
        }
    }

    let build = BuildConfig {
        output_dir: options
            .output
            .unwrap_or_else(|| PathBuf::from(&file.build.output)),
        minify: options.minify || file.build.minify,
        escape: if options.escape_html {
            EscapePolicy::Html
        } else {
            file.build.escape
        },
    };

    let result = SiteBuilder::new(build)?.build(&file.site).await?;

    tracing::info!(
        "Wrote {} files ({} bytes) in {}ms",
        result.files.len(),
        result.bytes,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
