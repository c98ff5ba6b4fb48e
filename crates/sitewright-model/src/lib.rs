//! Site configuration model for sitewright.
//!
//! This crate defines the [`Configuration`] that drives rendering, the theme
//! registry and color helpers it resolves through, and the file-backed
//! [`ConfigStore`] that persists it.

pub mod collection;
pub mod color;
pub mod config;
pub mod flags;
pub mod image;
pub mod settings;
pub mod store;
pub mod theme;

pub use collection::Collection;
pub use config::{
    AboutInfo, BlogPost, Configuration, ContactInfo, CtaContent, FaqItem, Feature, Images,
    PortfolioItem, SocialMedia, SocialPlatform, TeamMember, Testimonial, TimelineEvent,
};
pub use flags::{FlagSet, Page, Section};
pub use image::{AssetError, ImageKind, ImageRef};
pub use settings::{BuildSettings, EscapePolicy};
pub use store::{inline_local_images, ConfigStore, Format, SiteFile, StoreError};
pub use theme::{LayoutKind, Style, StyleBundle, StyleField, StyleOverrides, Theme};
