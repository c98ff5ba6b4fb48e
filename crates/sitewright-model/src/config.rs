//! The site configuration: every user-chosen content and style value.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::collection::Collection;
use crate::flags::{FlagSet, Page, Section};
use crate::image::ImageRef;
use crate::theme::{self, Style, StyleField, StyleOverrides, DEFAULT_THEME};

/// A feature card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub heading: String,
    pub description: String,
}

/// A client quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub quote: String,
    pub name: String,
    pub title: String,
    pub image: ImageRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub name: String,
    pub image_url: ImageRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
    pub image_url: ImageRef,
    /// Display date for the byline; omitted from the byline when empty.
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioItem {
    pub title: String,
    pub description: String,
    pub image_url: ImageRef,
    pub project_link: String,
}

impl Default for PortfolioItem {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image_url: ImageRef::empty(),
            project_link: "#".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEvent {
    pub year: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutInfo {
    pub title: String,
    pub description: String,
    pub image: ImageRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Supported social networks, in footer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Twitter,
    Linkedin,
    Instagram,
}

impl SocialPlatform {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Facebook => "📘",
            Self::Twitter => "🐦",
            Self::Linkedin => "💼",
            Self::Instagram => "📸",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMedia {
    pub facebook: String,
    pub twitter: String,
    pub linkedin: String,
    pub instagram: String,
}

impl SocialMedia {
    pub fn url(&self, platform: SocialPlatform) -> &str {
        match platform {
            SocialPlatform::Facebook => &self.facebook,
            SocialPlatform::Twitter => &self.twitter,
            SocialPlatform::Linkedin => &self.linkedin,
            SocialPlatform::Instagram => &self.instagram,
        }
    }

    /// Platforms with a non-empty URL, in platform order.
    pub fn links(&self) -> Vec<(SocialPlatform, &str)> {
        SocialPlatform::iter()
            .map(|p| (p, self.url(p)))
            .filter(|(_, url)| !url.trim().is_empty())
            .collect()
    }
}

/// Fixed image slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Images {
    pub about_page: ImageRef,
    pub gallery_image_1: ImageRef,
    pub gallery_image_2: ImageRef,
    pub gallery_image_3: ImageRef,
    pub gallery_image_4: ImageRef,
}

impl Images {
    pub fn gallery(&self) -> [&ImageRef; 4] {
        [
            &self.gallery_image_1,
            &self.gallery_image_2,
            &self.gallery_image_3,
            &self.gallery_image_4,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaContent {
    pub heading: String,
    pub subheading: String,
    pub button_text: String,
}

/// The complete configuration driving a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub title: String,
    pub description: String,
    pub hero_heading: String,
    pub hero_subheading: String,
    pub footer_copyright: String,

    /// Theme identifier into the registry.
    pub theme: String,

    /// Style fields set explicitly after the last theme selection.
    #[serde(skip_serializing_if = "StyleOverrides::is_empty")]
    pub overrides: StyleOverrides,

    pub pages: FlagSet<Page>,
    pub sections: FlagSet<Section>,

    pub about: AboutInfo,
    pub contact: ContactInfo,
    pub social: SocialMedia,
    pub images: Images,
    pub cta: CtaContent,

    pub features: Collection<Feature>,
    pub testimonials: Collection<Testimonial>,
    pub team: Collection<TeamMember>,
    pub blog_posts: Collection<BlogPost>,
    pub faq_items: Collection<FaqItem>,
    pub portfolio_items: Collection<PortfolioItem>,
    pub timeline_events: Collection<TimelineEvent>,
}

impl Configuration {
    /// Resolved style tokens: overrides over the theme bundle.
    ///
    /// An unregistered theme id resolves against the default theme.
    pub fn style(&self) -> Style {
        let bundle = theme::resolve(&self.theme)
            .or_else(|| theme::resolve(DEFAULT_THEME))
            .unwrap_or(&theme::themes()[0].bundle);
        Style::resolve(bundle, &self.overrides)
    }

    /// Select a theme, cascading its tokens over every style field.
    ///
    /// Unknown ids are ignored and return `false`; nothing changes.
    pub fn select_theme(&mut self, theme_id: &str) -> bool {
        if theme::resolve(theme_id).is_none() {
            return false;
        }
        self.theme = theme_id.to_string();
        self.overrides.clear();
        true
    }

    /// Manually set a style field. Wins over the theme until the next
    /// theme selection.
    pub fn set_override(&mut self, field: StyleField, value: impl Into<String>) {
        self.overrides.set(field, value);
    }

    /// Return a field to following the theme.
    pub fn clear_override(&mut self, field: StyleField) {
        self.overrides.remove(field);
    }

    /// Visit every image field with a label naming where it lives.
    pub fn for_each_image_mut(&mut self, mut visit: impl FnMut(&str, &mut ImageRef)) {
        visit("about.image", &mut self.about.image);
        visit("images.about_page", &mut self.images.about_page);
        visit("images.gallery_image_1", &mut self.images.gallery_image_1);
        visit("images.gallery_image_2", &mut self.images.gallery_image_2);
        visit("images.gallery_image_3", &mut self.images.gallery_image_3);
        visit("images.gallery_image_4", &mut self.images.gallery_image_4);

        for (i, t) in self.testimonials.iter_mut().enumerate() {
            visit(&format!("testimonials[{i}].image"), &mut t.image);
        }
        for (i, m) in self.team.iter_mut().enumerate() {
            visit(&format!("team[{i}].image_url"), &mut m.image_url);
        }
        for (i, p) in self.blog_posts.iter_mut().enumerate() {
            visit(&format!("blog_posts[{i}].image_url"), &mut p.image_url);
        }
        for (i, p) in self.portfolio_items.iter_mut().enumerate() {
            visit(&format!("portfolio_items[{i}].image_url"), &mut p.image_url);
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let year = chrono::Local::now().year();

        Self {
            title: "My Website".to_string(),
            description: "A beautifully designed website created with sitewright.".to_string(),
            hero_heading: "Welcome to My Website!".to_string(),
            hero_subheading: "Craft stunning web experiences with ease and speed.".to_string(),
            footer_copyright: format!("© {year} My Website. All rights reserved."),
            theme: DEFAULT_THEME.to_string(),
            overrides: StyleOverrides::new(),
            pages: FlagSet::from_enabled([Page::Home, Page::About, Page::Contact]),
            sections: FlagSet::from_enabled([Section::Hero, Section::Features]),
            about: AboutInfo {
                title: "About me".to_string(),
                description: "I build projects that make a real difference, with a focus on \
                              clean design and solid engineering."
                    .to_string(),
                image: ImageRef::empty(),
            },
            contact: ContactInfo {
                email: "hello@example.com".to_string(),
                phone: "+1 234 567 8900".to_string(),
                address: "123 Main St, Anytown".to_string(),
            },
            social: SocialMedia {
                facebook: "https://facebook.com/yourprofile".to_string(),
                twitter: "https://twitter.com/yourprofile".to_string(),
                linkedin: "https://linkedin.com/in/yourprofile".to_string(),
                instagram: "https://instagram.com/yourprofile".to_string(),
            },
            images: Images::default(),
            cta: CtaContent {
                heading: "Ready to Get Started?".to_string(),
                subheading: "Join us today and experience the difference!".to_string(),
                button_text: "Contact Us Now".to_string(),
            },
            features: vec![
                Feature {
                    heading: "Responsive Design".to_string(),
                    description: "Your website will look stunning on any device, from desktops \
                                  to mobile phones."
                        .to_string(),
                },
                Feature {
                    heading: "Easy Customization".to_string(),
                    description: "Effortlessly change colors, fonts, and layouts to match your \
                                  brand."
                        .to_string(),
                },
                Feature {
                    heading: "High Performance".to_string(),
                    description: "Built with clean code for fast loading times and a smooth \
                                  user experience."
                        .to_string(),
                },
            ]
            .into(),
            testimonials: vec![
                Testimonial {
                    quote: "This generator is a game-changer! I created a beautiful website in \
                            minutes without any coding knowledge."
                        .to_string(),
                    name: "Jane Doe".to_string(),
                    title: "CEO, Example Corp".to_string(),
                    image: ImageRef::empty(),
                },
                Testimonial {
                    quote: "Fantastic tool for rapid prototyping. The clean code and responsive \
                            design saved me so much time."
                        .to_string(),
                    name: "Alex Smith".to_string(),
                    title: "Developer".to_string(),
                    image: ImageRef::empty(),
                },
            ]
            .into(),
            team: vec![TeamMember {
                name: "Alex Brown".to_string(),
                image_url: ImageRef::from("https://placehold.co/60x60/cccccc/ffffff?text=AB"),
            }]
            .into(),
            blog_posts: vec![
                BlogPost {
                    title: "My First Blog Post".to_string(),
                    content: "This is the content of my first blog post. You can write about \
                              anything here!"
                        .to_string(),
                    ..Default::default()
                },
                BlogPost {
                    title: "Exploring New Web Technologies".to_string(),
                    content: "Dive into the latest trends and tools shaping the web development \
                              landscape."
                        .to_string(),
                    ..Default::default()
                },
            ]
            .into(),
            faq_items: vec![
                FaqItem {
                    question: "What services do you offer?".to_string(),
                    answer: "We offer a wide range of web development, design, and marketing \
                             services tailored to your needs."
                        .to_string(),
                },
                FaqItem {
                    question: "How can I contact support?".to_string(),
                    answer: "You can reach our support team via email, phone, or by filling out \
                             the contact form on our website."
                        .to_string(),
                },
            ]
            .into(),
            portfolio_items: vec![
                PortfolioItem {
                    title: "E-commerce Redesign".to_string(),
                    description: "Modernizing an online store for better user experience and \
                                  conversion rates."
                        .to_string(),
                    ..Default::default()
                },
                PortfolioItem {
                    title: "Mobile App Development".to_string(),
                    description: "Building a native mobile application for iOS and Android \
                                  platforms."
                        .to_string(),
                    ..Default::default()
                },
            ]
            .into(),
            timeline_events: vec![
                TimelineEvent {
                    year: "2020".to_string(),
                    title: "Company Founded".to_string(),
                    description: "Established with a vision to revolutionize web development."
                        .to_string(),
                },
                TimelineEvent {
                    year: "2022".to_string(),
                    title: "Launched Flagship Product".to_string(),
                    description: "Introduced our core web application to the market, gaining \
                                  significant traction."
                        .to_string(),
                },
            ]
            .into(),
        }
    }
}
