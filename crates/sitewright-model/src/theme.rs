//! Theme registry and resolved style tokens.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Structural page skeleton variant.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase", from = "String")]
#[strum(serialize_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Modern,
    Minimal,
    Portfolio,
    Blog,
}

impl LayoutKind {
    /// Parse a layout name, treating anything unrecognized as `Modern`.
    pub fn parse(name: &str) -> Self {
        name.trim().to_lowercase().parse().unwrap_or_default()
    }

    /// Lowercase name as written in configuration files.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl From<String> for LayoutKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

/// A style token that a theme provides and a user may override.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StyleField {
    PrimaryColor,
    FontFamily,
    Layout,
    HeaderBg,
    HeaderText,
    FooterBg,
    FooterText,
    BodyBg,
    BodyText,
    SectionBgLight,
    SectionBgDark,
    ButtonBg,
    ButtonHover,
    ButtonText,
}

/// The fixed visual tokens associated with one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleBundle {
    pub primary_color: &'static str,
    pub font_family: &'static str,
    pub layout: LayoutKind,
    pub header_bg: &'static str,
    pub header_text: &'static str,
    pub footer_bg: &'static str,
    pub footer_text: &'static str,
    pub body_bg: &'static str,
    pub body_text: &'static str,
    pub section_bg_light: &'static str,
    pub section_bg_dark: &'static str,
    pub button_bg: &'static str,
    pub button_hover: &'static str,
    pub button_text: &'static str,
}

impl StyleBundle {
    /// Value of a single token.
    pub fn get(&self, field: StyleField) -> &'static str {
        match field {
            StyleField::PrimaryColor => self.primary_color,
            StyleField::FontFamily => self.font_family,
            StyleField::Layout => self.layout.as_str(),
            StyleField::HeaderBg => self.header_bg,
            StyleField::HeaderText => self.header_text,
            StyleField::FooterBg => self.footer_bg,
            StyleField::FooterText => self.footer_text,
            StyleField::BodyBg => self.body_bg,
            StyleField::BodyText => self.body_text,
            StyleField::SectionBgLight => self.section_bg_light,
            StyleField::SectionBgDark => self.section_bg_dark,
            StyleField::ButtonBg => self.button_bg,
            StyleField::ButtonHover => self.button_hover,
            StyleField::ButtonText => self.button_text,
        }
    }
}

/// A registered theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub id: &'static str,
    pub bundle: StyleBundle,
}

/// Identifier of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "modern";

static THEMES: [Theme; 5] = [
    Theme {
        id: "modern",
        bundle: StyleBundle {
            primary_color: "#3b82f6",
            font_family: "Inter",
            layout: LayoutKind::Modern,
            header_bg: "bg-blue-700",
            header_text: "text-white",
            footer_bg: "bg-gray-800",
            footer_text: "text-white",
            body_bg: "bg-gray-100",
            body_text: "text-gray-800",
            section_bg_light: "bg-gray-50",
            section_bg_dark: "bg-white",
            button_bg: "bg-blue-600",
            button_hover: "hover:bg-blue-700",
            button_text: "text-white",
        },
    },
    Theme {
        id: "corporate",
        bundle: StyleBundle {
            primary_color: "#047857",
            font_family: "Roboto",
            layout: LayoutKind::Modern,
            header_bg: "bg-emerald-800",
            header_text: "text-white",
            footer_bg: "bg-gray-900",
            footer_text: "text-gray-300",
            body_bg: "bg-white",
            body_text: "text-gray-900",
            section_bg_light: "bg-emerald-50",
            section_bg_dark: "bg-white",
            button_bg: "bg-emerald-700",
            button_hover: "hover:bg-emerald-800",
            button_text: "text-white",
        },
    },
    Theme {
        id: "vibrant",
        bundle: StyleBundle {
            primary_color: "#ef4444",
            font_family: "Poppins",
            layout: LayoutKind::Modern,
            header_bg: "bg-red-700",
            header_text: "text-white",
            footer_bg: "bg-red-900",
            footer_text: "text-white",
            body_bg: "bg-red-50",
            body_text: "text-red-900",
            section_bg_light: "bg-white",
            section_bg_dark: "bg-red-100",
            button_bg: "bg-red-600",
            button_hover: "hover:bg-red-700",
            button_text: "text-white",
        },
    },
    Theme {
        id: "minimalist",
        bundle: StyleBundle {
            primary_color: "#4b5563",
            font_family: "Open Sans",
            layout: LayoutKind::Minimal,
            header_bg: "bg-white",
            header_text: "text-gray-800",
            footer_bg: "bg-gray-700",
            footer_text: "text-gray-200",
            body_bg: "bg-white",
            body_text: "text-gray-800",
            section_bg_light: "bg-gray-50",
            section_bg_dark: "bg-white",
            button_bg: "bg-gray-600",
            button_hover: "hover:bg-gray-700",
            button_text: "text-white",
        },
    },
    Theme {
        id: "dark-mode",
        bundle: StyleBundle {
            primary_color: "#6366f1",
            font_family: "Lato",
            layout: LayoutKind::Modern,
            header_bg: "bg-gray-900",
            header_text: "text-white",
            footer_bg: "bg-gray-950",
            footer_text: "text-gray-400",
            body_bg: "bg-gray-800",
            body_text: "text-gray-100",
            section_bg_light: "bg-gray-700",
            section_bg_dark: "bg-gray-900",
            button_bg: "bg-indigo-600",
            button_hover: "hover:bg-indigo-700",
            button_text: "text-white",
        },
    },
];

/// Look up a theme bundle by identifier.
pub fn resolve(theme_id: &str) -> Option<&'static StyleBundle> {
    THEMES.iter().find(|t| t.id == theme_id).map(|t| &t.bundle)
}

/// All registered themes, in declaration order.
pub fn themes() -> &'static [Theme] {
    &THEMES
}

/// Human-readable label for a theme id ("dark-mode" -> "Dark mode").
pub fn display_name(theme_id: &str) -> String {
    let mut chars = theme_id.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().replacen('-', " ", 1),
        None => String::new(),
    }
}

/// Style fields explicitly set by the user, winning over the theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleOverrides(BTreeMap<StyleField, String>);

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: StyleField, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn get(&self, field: StyleField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drop an override so the field follows the theme again.
    pub fn remove(&mut self, field: StyleField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Fully resolved style: the theme bundle with overrides applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Style {
    pub primary_color: String,
    pub font_family: String,
    pub layout: LayoutKind,
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
}

impl Style {
    /// Resolve each field as `overrides[field]`, falling back to the bundle.
    pub fn resolve(bundle: &StyleBundle, overrides: &StyleOverrides) -> Self {
        let pick = |field: StyleField| {
            overrides
                .get(field)
                .unwrap_or_else(|| bundle.get(field))
                .to_string()
        };

        Self {
            primary_color: pick(StyleField::PrimaryColor),
            font_family: pick(StyleField::FontFamily),
            layout: overrides
                .get(StyleField::Layout)
                .map(LayoutKind::parse)
                .unwrap_or(bundle.layout),
            header_bg: pick(StyleField::HeaderBg),
            header_text: pick(StyleField::HeaderText),
            footer_bg: pick(StyleField::FooterBg),
            footer_text: pick(StyleField::FooterText),
            body_bg: pick(StyleField::BodyBg),
            body_text: pick(StyleField::BodyText),
            section_bg_light: pick(StyleField::SectionBgLight),
            section_bg_dark: pick(StyleField::SectionBgDark),
            button_bg: pick(StyleField::ButtonBg),
            button_hover: pick(StyleField::ButtonHover),
            button_text: pick(StyleField::ButtonText),
        }
    }

    /// Value of a single token.
    pub fn get(&self, field: StyleField) -> &str {
        match field {
            StyleField::PrimaryColor => &self.primary_color,
            StyleField::FontFamily => &self.font_family,
            StyleField::Layout => self.layout.as_str(),
            StyleField::HeaderBg => &self.header_bg,
            StyleField::HeaderText => &self.header_text,
            StyleField::FooterBg => &self.footer_bg,
            StyleField::FooterText => &self.footer_text,
            StyleField::BodyBg => &self.body_bg,
            StyleField::BodyText => &self.body_text,
            StyleField::SectionBgLight => &self.section_bg_light,
            StyleField::SectionBgDark => &self.section_bg_dark,
            StyleField::ButtonBg => &self.button_bg,
            StyleField::ButtonHover => &self.button_hover,
            StyleField::ButtonText => &self.button_text,
        }
    }

    /// Whether every token equals the bundle's value.
    pub fn matches(&self, bundle: &StyleBundle) -> bool {
        StyleField::iter().all(|f| self.get(f) == bundle.get(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_themes() {
        let bundle = resolve("corporate").unwrap();
        assert_eq!(bundle.primary_color, "#047857");
        assert_eq!(bundle.font_family, "Roboto");
        assert_eq!(resolve("minimalist").unwrap().layout, LayoutKind::Minimal);
    }

    #[test]
    fn unknown_theme_is_none() {
        assert!(resolve("neon").is_none());
        assert!(resolve("").is_none());
    }

    #[test]
    fn themes_are_listed_in_order() {
        let ids: Vec<_> = themes().iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec!["modern", "corporate", "vibrant", "minimalist", "dark-mode"]
        );
    }

    #[test]
    fn parses_layout_with_fallback() {
        assert_eq!(LayoutKind::parse("blog"), LayoutKind::Blog);
        assert_eq!(LayoutKind::parse("Portfolio"), LayoutKind::Portfolio);
        assert_eq!(LayoutKind::parse("magazine"), LayoutKind::Modern);
    }

    #[test]
    fn unknown_layout_deserializes_as_modern() {
        let kind: LayoutKind = serde_json::from_str("\"magazine\"").unwrap();
        assert_eq!(kind, LayoutKind::Modern);
    }

    #[test]
    fn layout_names_round_trip_through_serde() {
        for kind in LayoutKind::iter() {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(serde_json::from_str::<LayoutKind>(&json).unwrap(), kind);
        }
        let blog: LayoutKind = serde_json::from_str("\" Blog \"").unwrap();
        assert_eq!(blog, LayoutKind::Blog);
    }

    #[test]
    fn overrides_win_over_bundle() {
        let bundle = resolve("modern").unwrap();
        let mut overrides = StyleOverrides::new();
        overrides.set(StyleField::HeaderBg, "bg-pink-500");
        overrides.set(StyleField::Layout, "blog");

        let style = Style::resolve(bundle, &overrides);

        assert_eq!(style.header_bg, "bg-pink-500");
        assert_eq!(style.layout, LayoutKind::Blog);
        assert_eq!(style.footer_bg, bundle.footer_bg);
        assert!(!style.matches(bundle));
    }

    #[test]
    fn empty_overrides_match_bundle() {
        for theme in themes() {
            let style = Style::resolve(&theme.bundle, &StyleOverrides::new());
            assert!(style.matches(&theme.bundle), "theme {}", theme.id);
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("dark-mode"), "Dark mode");
        assert_eq!(display_name("modern"), "Modern");
    }
}
