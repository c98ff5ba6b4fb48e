//! Rendering pipeline for sitewright.
//!
//! Turns a [`Configuration`](sitewright_model::Configuration) into a complete
//! HTML document plus companion stylesheet and script, and writes them to an
//! output directory.

pub mod assets;
pub mod builder;
pub mod context;
pub mod document;
pub mod layout;
pub mod sections;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use context::{RenderContext, ThemeView};
pub use document::{render, FontFace, RenderOptions, SiteArtifacts, SiteRenderer};
pub use layout::{plan, NavLink, Skeleton};
pub use sections::{Block, Fragment};
pub use templates::TemplateEngine;

/// Errors that can occur while rendering.
///
/// Rendering itself is total over valid configurations; this only surfaces
/// defects in the built-in templates.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),
}
