//! Build settings stored alongside the configuration.

use serde::{Deserialize, Serialize};

/// How text fields are inserted into generated markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapePolicy {
    /// Insert text verbatim. Content comes from the site owner, so HTML in
    /// text fields is rendered as markup.
    #[default]
    Trusted,
    /// HTML-escape every text field.
    Html,
}

/// The `[build]` table of a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Output directory, relative to the working directory
    pub output: String,

    /// Minify the generated stylesheet
    pub minify: bool,

    /// Escaping applied to text fields
    pub escape: EscapePolicy,

    /// Inline local image files as data URIs
    pub inline_images: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: "dist".to_string(),
            minify: false,
            escape: EscapePolicy::Trusted,
            inline_images: true,
        }
    }
}
