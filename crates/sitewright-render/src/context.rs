//! Per-render context shared by every section renderer.

use serde::Serialize;

use sitewright_model::{color, Configuration, Style};

use crate::templates::TemplateEngine;

/// Style tokens plus the class strings derived from them, as seen by
/// templates.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeView {
    pub header_bg: String,
    pub header_text: String,
    pub footer_bg: String,
    pub footer_text: String,
    pub body_bg: String,
    pub body_text: String,
    pub section_bg_light: String,
    pub section_bg_dark: String,
    pub button_bg: String,
    pub button_hover: String,
    pub button_text: String,

    /// Utility-class color family of the primary color
    pub accent: String,
    /// Bare hex token of the primary color
    pub digest: String,

    pub body_text_muted: String,
    pub body_text_soft: String,
    pub header_text_hover: String,
    pub header_bg_hover: String,
    pub footer_text_muted: String,
    pub button_bg_as_text: String,
    pub button_hover_as_text: String,
}

impl ThemeView {
    pub fn new(style: &Style) -> Self {
        Self {
            header_bg: style.header_bg.clone(),
            header_text: style.header_text.clone(),
            footer_bg: style.footer_bg.clone(),
            footer_text: style.footer_text.clone(),
            body_bg: style.body_bg.clone(),
            body_text: style.body_text.clone(),
            section_bg_light: style.section_bg_light.clone(),
            section_bg_dark: style.section_bg_dark.clone(),
            button_bg: style.button_bg.clone(),
            button_hover: style.button_hover.clone(),
            button_text: style.button_text.clone(),
            accent: color::classify(&style.primary_color).to_string(),
            digest: color::digest(&style.primary_color),
            body_text_muted: with_modifier(&style.body_text, "text-", "text-opacity-90 text-"),
            body_text_soft: with_modifier(&style.body_text, "text-", "text-opacity-70 text-"),
            header_text_hover: with_modifier(&style.header_text, "text-", "text-opacity-80 text-"),
            header_bg_hover: with_modifier(&style.header_bg, "bg-", "bg-opacity-90 bg-"),
            footer_text_muted: with_modifier(&style.footer_text, "text-", "text-opacity-70 text-"),
            button_bg_as_text: with_modifier(&style.button_bg, "bg-", "text-"),
            button_hover_as_text: with_modifier(&style.button_hover, "hover:bg-", "hover:text-"),
        }
    }
}

/// Replace the first occurrence of `from` in a class string.
fn with_modifier(class: &str, from: &str, to: &str) -> String {
    class.replacen(from, to, 1)
}

/// Everything a renderer needs: the configuration snapshot, its resolved
/// style and the template engine.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub config: &'a Configuration,
    pub style: Style,
    pub theme: ThemeView,
    pub(crate) engine: &'a TemplateEngine,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Configuration, engine: &'a TemplateEngine) -> Self {
        let style = config.style();
        let theme = ThemeView::new(&style);
        Self {
            config,
            style,
            theme,
            engine,
        }
    }

    /// Placeholder image URL tinted with the primary color.
    pub fn placeholder(&self, width: u32, height: u32, text: &str) -> String {
        color::placeholder_url(width, height, &self.theme.digest, text)
    }

    /// Square avatar placeholder labelled with a name's initials.
    pub fn avatar_placeholder(&self, name: &str) -> String {
        self.placeholder(60, 60, &color::initials(name))
    }
}
