//! Document assembly: head, header, composed body and footer.

use minijinja::context;
use serde::Serialize;

use sitewright_model::{color, Configuration, EscapePolicy};

use crate::assets::AssetPipeline;
use crate::context::RenderContext;
use crate::layout::{self, Skeleton};
use crate::sections;
use crate::templates::TemplateEngine;
use crate::RenderError;

/// A supported web font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFace {
    /// Family name as written in CSS
    pub family: &'static str,
    /// Suffix of the utility class and the Tailwind font key
    pub key: &'static str,
}

impl FontFace {
    /// Utility class applying this font, e.g. `font-open-sans`.
    pub fn class(&self) -> String {
        format!("font-{}", self.key)
    }

    /// Stylesheet URL loading regular and bold weights.
    pub fn url(&self) -> String {
        format!(
            "https://fonts.googleapis.com/css2?family={}:wght@400;700&display=swap",
            self.family.replace(' ', "+")
        )
    }

    /// Look up a font by family name; unknown names fall back to Inter.
    pub fn lookup(family: &str) -> &'static FontFace {
        FONTS
            .iter()
            .find(|f| f.family == family)
            .unwrap_or(&FONTS[0])
    }
}

const FONTS: [FontFace; 6] = [
    FontFace { family: "Inter", key: "inter" },
    FontFace { family: "Roboto", key: "roboto" },
    FontFace { family: "Open Sans", key: "open-sans" },
    FontFace { family: "Montserrat", key: "montserrat" },
    FontFace { family: "Lato", key: "lato" },
    FontFace { family: "Poppins", key: "poppins" },
];

/// Options applied to every render.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Escaping applied to text fields
    pub escape: EscapePolicy,

    /// Script URLs appended at the end of the body
    pub extra_scripts: Vec<String>,
}

/// The three generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteArtifacts {
    pub document: String,
    pub style: String,
    pub script: String,
}

#[derive(Debug, Serialize)]
struct Shade {
    step: u16,
    value: String,
}

#[derive(Debug, Serialize)]
struct FontKey {
    /// Object key in the Tailwind config, quoted when not an identifier
    key: String,
    family: &'static str,
}

/// Renders configurations into [`SiteArtifacts`].
///
/// Holds the template environment so repeated renders (e.g. from the preview
/// server) reuse it.
#[derive(Debug)]
pub struct SiteRenderer {
    engine: TemplateEngine,
    extra_scripts: Vec<String>,
}

impl SiteRenderer {
    pub fn new(options: RenderOptions) -> Result<Self, RenderError> {
        Ok(Self {
            engine: TemplateEngine::new(options.escape)?,
            extra_scripts: options.extra_scripts,
        })
    }

    /// Render all three artifacts. Identical configurations produce
    /// identical output.
    pub fn render(&self, config: &Configuration) -> Result<SiteArtifacts, RenderError> {
        let ctx = RenderContext::new(config, &self.engine);
        let style = AssetPipeline::generate_css(&ctx.style.font_family);
        let script = AssetPipeline::generate_js(&config.title);
        let document = self.render_document(&ctx, &style, &script)?;

        Ok(SiteArtifacts {
            document,
            style,
            script,
        })
    }

    fn render_document(
        &self,
        ctx: &RenderContext<'_>,
        style: &str,
        script: &str,
    ) -> Result<String, RenderError> {
        let face = FontFace::lookup(&ctx.style.font_family);
        let font_class = face.class();
        let skeleton = Skeleton::new(ctx.style.layout, &ctx.theme, &font_class);

        let blocks = layout::plan(ctx.config);
        let main = layout::compose(ctx, &blocks)?
            .into_iter()
            .map(|fragment| fragment.html)
            .collect::<Vec<_>>()
            .join("\n");
        let footer = sections::footer(ctx)?;

        let palette: Vec<_> = color::palette(&ctx.style.primary_color)
            .into_iter()
            .map(|(step, value)| Shade { step, value })
            .collect();
        let font_classes: Vec<_> = FONTS
            .iter()
            .map(|f| FontKey {
                key: if f.key.contains('-') {
                    format!("'{}'", f.key)
                } else {
                    f.key.to_string()
                },
                family: f.family,
            })
            .collect();

        self.engine.render(
            "document.html",
            context! {
                title => &ctx.config.title,
                theme => &ctx.theme,
                font => context! {
                    family => &ctx.style.font_family,
                    class => &font_class,
                    url => face.url(),
                },
                font_classes => font_classes,
                palette => palette,
                skeleton => skeleton,
                nav => layout::nav_links(ctx.config),
                style => style,
                main => main,
                footer => footer,
                script => script,
                extra_scripts => &self.extra_scripts,
            },
        )
    }
}

/// Render a configuration with one-off options.
pub fn render(
    config: &Configuration,
    options: RenderOptions,
) -> Result<SiteArtifacts, RenderError> {
    SiteRenderer::new(options)?.render(config)
}
