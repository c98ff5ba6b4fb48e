//! Write a default configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use sitewright_model::{ConfigStore, SiteFile};

/// Run the init command.
pub async fn run(config: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing sitewright...");

    let store = ConfigStore::new(config)?;

    if store.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config.display()
        );
        return Ok(());
    }

    store
        .save(&SiteFile::default())
        .with_context(|| format!("Failed to write {}", config.display()))?;
    tracing::info!("Created {}", config.display());

    tracing::info!("Run 'sitewright dev' to start the preview server.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_loadable_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site/sitewright.toml");

        run(&path, false).await.unwrap();

        let file = ConfigStore::new(&path).unwrap().load().unwrap();
        assert_eq!(file.site.title, SiteFile::default().site.title);
        assert_eq!(file.build.output, "dist");
    }

    #[tokio::test]
    async fn keeps_existing_file_without_yes() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sitewright.toml");
        fs::write(&path, "title = \"Mine\"\n").unwrap();

        run(&path, false).await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "title = \"Mine\"\n");

        run(&path, true).await.unwrap();
        assert!(!fs::read_to_string(&path).unwrap().contains("Mine"));
    }

    #[tokio::test]
    async fn rejects_unknown_extension() {
        let temp = tempdir().unwrap();

        assert!(run(&temp.path().join("site.ini"), false).await.is_err());
    }
}
