//! Page skeletons and the ordered block plan for each layout kind.

use serde::Serialize;

use sitewright_model::{Configuration, LayoutKind, Page, Section};

use crate::context::{RenderContext, ThemeView};
use crate::sections::{self, Block, Fragment};
use crate::RenderError;

/// Home page sections in the order they appear on the page.
const HOME_ORDER: [Section; 11] = [
    Section::Hero,
    Section::Features,
    Section::Testimonials,
    Section::Gallery,
    Section::Team,
    Section::Blog,
    Section::Faq,
    Section::Portfolio,
    Section::Timeline,
    Section::Cta,
    Section::ContactForm,
];

/// Header, body and main-column classes for a layout kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skeleton {
    pub header: String,
    pub body: String,
    pub main: &'static str,
}

impl Skeleton {
    pub fn new(layout: LayoutKind, theme: &ThemeView, font_class: &str) -> Self {
        match layout {
            LayoutKind::Modern => Self {
                header: format!(
                    "{} {} p-4 shadow-md rounded-b-lg mb-8",
                    theme.header_bg, theme.header_text
                ),
                body: format!(
                    "{} {} {} min-h-screen flex flex-col",
                    theme.body_bg, font_class, theme.body_text
                ),
                main: "container mx-auto p-4 flex-grow",
            },
            LayoutKind::Minimal => Self {
                header: "bg-white text-gray-800 p-4 shadow-sm mb-4 border-b border-gray-100"
                    .to_string(),
                body: format!("bg-white {font_class} text-gray-800 min-h-screen flex flex-col"),
                main: "container mx-auto max-w-4xl p-4 flex-grow",
            },
            LayoutKind::Portfolio => Self {
                header: "bg-gray-900 text-white p-4 shadow-lg mb-8".to_string(),
                body: format!("bg-gray-50 {font_class} text-gray-800 min-h-screen flex flex-col"),
                main: "container mx-auto p-4 flex-grow",
            },
            LayoutKind::Blog => Self {
                header: "bg-gray-800 text-white p-4 shadow-md mb-8".to_string(),
                body: format!("bg-white {font_class} text-gray-800 min-h-screen flex flex-col"),
                main: "container mx-auto max-w-3xl p-4 flex-grow",
            },
        }
    }
}

/// A navigation link in the page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

/// One link per enabled page, in page declaration order.
pub fn nav_links(config: &Configuration) -> Vec<NavLink> {
    config
        .pages
        .enabled()
        .map(|page| NavLink {
            href: format!("#{}", page.key()),
            label: page.label(),
        })
        .collect()
}

/// The ordered list of blocks making up the main content.
pub fn plan(config: &Configuration) -> Vec<Block> {
    let layout = config.style().layout;
    let home = config.pages.get(Page::Home);
    let section = |s: Section| config.sections.get(s);

    match layout {
        LayoutKind::Portfolio if home => {
            let mut blocks = vec![Block::Hero];
            blocks.push(if section(Section::Portfolio) {
                Block::Portfolio
            } else {
                Block::PortfolioFallback
            });
            if section(Section::Testimonials) {
                blocks.push(Block::Testimonials);
            }
            if section(Section::Cta) {
                blocks.push(Block::Cta);
            }
            blocks
        }
        LayoutKind::Blog if home => {
            let mut blocks = vec![Block::Hero];
            blocks.push(if section(Section::Blog) {
                Block::Blog
            } else {
                Block::BlogFallback
            });
            if section(Section::Cta) {
                blocks.push(Block::Cta);
            }
            blocks
        }
        _ => {
            let mut blocks = Vec::new();
            let contact_page = config.pages.get(Page::Contact);

            if home {
                blocks.extend(
                    HOME_ORDER
                        .into_iter()
                        .filter(|&s| section(s))
                        .filter(|&s| s != Section::ContactForm || !contact_page)
                        .map(Block::from),
                );
            }

            let about_layout = !matches!(layout, LayoutKind::Portfolio | LayoutKind::Blog);
            if config.pages.get(Page::About) && about_layout {
                blocks.push(Block::AboutPage);
            }
            if contact_page {
                blocks.push(Block::ContactPage);
            }
            blocks
        }
    }
}

/// Render every block of a plan, in order.
pub fn compose(ctx: &RenderContext<'_>, plan: &[Block]) -> Result<Vec<Fragment>, RenderError> {
    plan.iter()
        .map(|&block| sections::render_block(ctx, block))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use sitewright_model::{FlagSet, StyleField};
    use strum::IntoEnumIterator;

    fn config_with(pages: &[Page], sections: &[Section], layout: LayoutKind) -> Configuration {
        let mut config = Configuration {
            pages: FlagSet::from_enabled(pages.iter().copied()),
            sections: FlagSet::from_enabled(sections.iter().copied()),
            ..Default::default()
        };
        config.set_override(StyleField::Layout, layout.as_str());
        config
    }

    #[test]
    fn modern_home_follows_section_order() {
        let config = config_with(
            &[Page::Home],
            &[Section::Cta, Section::Hero, Section::Faq, Section::Features],
            LayoutKind::Modern,
        );

        assert_eq!(
            plan(&config),
            vec![Block::Hero, Block::Features, Block::Faq, Block::Cta]
        );
    }

    #[test]
    fn contact_form_yields_to_contact_page() {
        let sections = [Section::ContactForm];

        let inline = config_with(&[Page::Home], &sections, LayoutKind::Modern);
        assert_eq!(plan(&inline), vec![Block::ContactForm]);

        let paged = config_with(&[Page::Home, Page::Contact], &sections, LayoutKind::Modern);
        assert_eq!(plan(&paged), vec![Block::ContactPage]);
    }

    #[test]
    fn contact_only_renders_contact_page() {
        let every_section: Vec<_> = Section::iter().collect();
        let config = config_with(&[Page::Contact], &every_section, LayoutKind::Modern);

        assert_eq!(plan(&config), vec![Block::ContactPage]);
    }

    #[test]
    fn portfolio_layout_uses_fallback() {
        let config = config_with(&[Page::Home, Page::About], &[], LayoutKind::Portfolio);

        assert_eq!(plan(&config), vec![Block::Hero, Block::PortfolioFallback]);
    }

    #[test]
    fn portfolio_layout_keeps_testimonials_and_cta() {
        let config = config_with(
            &[Page::Home, Page::Contact],
            &[Section::Portfolio, Section::Cta, Section::Testimonials, Section::Faq],
            LayoutKind::Portfolio,
        );

        assert_eq!(
            plan(&config),
            vec![Block::Hero, Block::Portfolio, Block::Testimonials, Block::Cta]
        );
    }

    #[test]
    fn blog_layout_uses_fallback() {
        let config = config_with(&[Page::Home], &[Section::Cta], LayoutKind::Blog);

        assert_eq!(
            plan(&config),
            vec![Block::Hero, Block::BlogFallback, Block::Cta]
        );
    }

    #[test]
    fn blog_layout_without_home_skips_about() {
        let config = config_with(&[Page::About, Page::Contact], &[], LayoutKind::Blog);

        assert_eq!(plan(&config), vec![Block::ContactPage]);
    }

    #[test]
    fn nav_links_follow_page_order() {
        let pages = [Page::Blog, Page::Home, Page::About];
        let config = config_with(&pages, &[], LayoutKind::Modern);
        let links = nav_links(&config);

        assert_eq!(
            links,
            vec![
                NavLink {
                    href: "#home".to_string(),
                    label: "Home".to_string()
                },
                NavLink {
                    href: "#about".to_string(),
                    label: "About".to_string()
                },
                NavLink {
                    href: "#blog".to_string(),
                    label: "Blog".to_string()
                },
            ]
        );
    }

    #[test]
    fn skeleton_classes_per_layout() {
        let config = Configuration::default();
        let theme = ThemeView::new(&config.style());

        let modern = Skeleton::new(LayoutKind::Modern, &theme, "font-inter");
        assert_eq!(
            modern.header,
            "bg-blue-700 text-white p-4 shadow-md rounded-b-lg mb-8"
        );
        assert_eq!(
            modern.body,
            "bg-gray-100 font-inter text-gray-800 min-h-screen flex flex-col"
        );

        let minimal = Skeleton::new(LayoutKind::Minimal, &theme, "font-lato");
        assert_eq!(minimal.main, "container mx-auto max-w-4xl p-4 flex-grow");
        assert!(minimal.body.starts_with("bg-white font-lato"));

        let blog = Skeleton::new(LayoutKind::Blog, &theme, "font-inter");
        assert_eq!(blog.main, "container mx-auto max-w-3xl p-4 flex-grow");
    }

    /// Reference ordering written out independently of `plan`.
    fn expected_plan(layout: LayoutKind, pages: &[Page], sections: &[Section]) -> Vec<Block> {
        let home = pages.contains(&Page::Home);
        let on = |s: Section| sections.contains(&s);
        let mut blocks = Vec::new();

        if home && layout == LayoutKind::Portfolio {
            blocks.push(Block::Hero);
            blocks.push(if on(Section::Portfolio) {
                Block::Portfolio
            } else {
                Block::PortfolioFallback
            });
            if on(Section::Testimonials) {
                blocks.push(Block::Testimonials);
            }
            if on(Section::Cta) {
                blocks.push(Block::Cta);
            }
            return blocks;
        }
        if home && layout == LayoutKind::Blog {
            blocks.push(Block::Hero);
            blocks.push(if on(Section::Blog) {
                Block::Blog
            } else {
                Block::BlogFallback
            });
            if on(Section::Cta) {
                blocks.push(Block::Cta);
            }
            return blocks;
        }

        if home {
            for s in HOME_ORDER {
                if !on(s) {
                    continue;
                }
                if s == Section::ContactForm && pages.contains(&Page::Contact) {
                    continue;
                }
                blocks.push(Block::from(s));
            }
        }
        let about_layout = !matches!(layout, LayoutKind::Portfolio | LayoutKind::Blog);
        if pages.contains(&Page::About) && about_layout {
            blocks.push(Block::AboutPage);
        }
        if pages.contains(&Page::Contact) {
            blocks.push(Block::ContactPage);
        }
        blocks
    }

    proptest! {
        #[test]
        fn plan_follows_layout_ordering(
            layout in prop::sample::select(LayoutKind::iter().collect::<Vec<_>>()),
            page_bits in prop::collection::vec(any::<bool>(), 6),
            section_bits in prop::collection::vec(any::<bool>(), 11),
        ) {
            let pages: Vec<Page> = Page::iter()
                .zip(&page_bits)
                .filter_map(|(p, &on)| on.then_some(p))
                .collect();
            let sections: Vec<Section> = Section::iter()
                .zip(&section_bits)
                .filter_map(|(s, &on)| on.then_some(s))
                .collect();

            let config = config_with(&pages, &sections, layout);

            prop_assert_eq!(plan(&config), expected_plan(layout, &pages, &sections));
        }

        #[test]
        fn plan_without_home_ignores_sections(
            layout in prop::sample::select(LayoutKind::iter().collect::<Vec<_>>()),
            about in any::<bool>(),
            contact in any::<bool>(),
        ) {
            let mut pages = Vec::new();
            if about {
                pages.push(Page::About);
            }
            if contact {
                pages.push(Page::Contact);
            }
            let every_section: Vec<_> = Section::iter().collect();
            let config = config_with(&pages, &every_section, layout);

            let blocks = plan(&config);

            prop_assert!(blocks.iter().all(|b| matches!(b, Block::AboutPage | Block::ContactPage)));
            prop_assert_eq!(blocks.contains(&Block::ContactPage), contact);
        }
    }
}
