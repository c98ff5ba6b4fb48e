//! Theme listing and selection.

use std::path::Path;

use anyhow::{Context, Result};
use sitewright_model::{theme, ConfigStore};

/// One line per registered theme, the current one marked with `*`.
fn theme_lines(current: &str) -> Vec<String> {
    theme::themes()
        .iter()
        .map(|t| {
            let marker = if t.id == current { '*' } else { ' ' };
            format!(
                "{} {:<12} {:<12} {:<10} {:<10} {}",
                marker,
                t.id,
                theme::display_name(t.id),
                t.bundle.layout.as_str(),
                t.bundle.primary_color,
                t.bundle.font_family
            )
        })
        .collect()
}

/// Print the available themes.
pub async fn list(config: &Path) -> Result<()> {
    let store = ConfigStore::new(config)?;
    let file = store
        .load_or_default()
        .with_context(|| format!("Failed to load {}", config.display()))?;

    for line in theme_lines(&file.site.theme) {
        println!("{line}");
    }

    Ok(())
}

/// Select a theme and save the configuration file.
///
/// Unknown ids fail without touching the file.
pub async fn select(config: &Path, id: &str) -> Result<()> {
    let store = ConfigStore::new(config)?;
    let mut file = store
        .load_or_default()
        .with_context(|| format!("Failed to load {}", config.display()))?;

    if !file.site.select_theme(id) {
        anyhow::bail!("Unknown theme '{}'. Run 'sitewright themes' to list them.", id);
    }

    store
        .save(&file)
        .with_context(|| format!("Failed to write {}", config.display()))?;
    tracing::info!("Selected theme {}", theme::display_name(id));

    Ok(())
}
