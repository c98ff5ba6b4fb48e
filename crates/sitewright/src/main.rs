//! sitewright CLI - generate a single-page website from a configuration file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "sitewright")]
#[command(about = "Generate a single-page website from a configuration file")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file (.toml, .json or .yaml)
    #[arg(short, long, global = true, default_value = "sitewright.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        yes: bool,
    },

    /// Render the site into an output directory
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minify the stylesheet
        #[arg(long)]
        minify: bool,

        /// HTML-escape text fields
        #[arg(long)]
        escape_html: bool,
    },

    /// Preview the site with live reload
    Dev {
        /// Port to listen on
        #[arg(short, long, default_value = "7777")]
        port: u16,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Serve a built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,
    },

    /// List the available themes
    Themes,

    /// Select a theme, replacing any style overrides
    Theme {
        /// Theme identifier, e.g. "dark-mode"
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build {
            output,
            minify,
            escape_html,
        } => {
            let options = commands::build::BuildOptions {
                output,
                minify,
                escape_html,
            };
            commands::build::run(&cli.config, options).await?;
        }
        Commands::Dev { port, no_open } => {
            commands::dev::run(&cli.config, port, !no_open).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(port, dir).await?;
        }
        Commands::Themes => {
            commands::theme::list(&cli.config).await?;
        }
        Commands::Theme { id } => {
            commands::theme::select(&cli.config, &id).await?;
        }
    }

    Ok(())
}
