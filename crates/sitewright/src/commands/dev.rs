//! Preview server command.

use std::path::Path;

use anyhow::Result;
use sitewright_server::{DevServer, DevServerConfig};

/// Run the preview server.
pub async fn run(config: &Path, port: u16, open: bool) -> Result<()> {
    if !config.exists() {
        tracing::warn!(
            "{} not found, previewing defaults. Run 'sitewright init' to create it.",
            config.display()
        );
    }

    let server = DevServerConfig {
        config_path: config.to_path_buf(),
        port,
        open,
        ..Default::default()
    };

    DevServer::new(server).start().await?;

    Ok(())
}
