//! Section renderers: one per block kind.
//!
//! Each renderer reads the configuration snapshot held by the
//! [`RenderContext`] and produces a [`Fragment`] whose root element carries
//! `data-block="<id>"`.

use minijinja::context;
use serde::Serialize;
use strum::{EnumIter, IntoStaticStr};

use sitewright_model::{Section, SocialPlatform};

use crate::context::RenderContext;
use crate::RenderError;

/// Length of the blog excerpt, in characters.
const EXCERPT_CHARS: usize = 150;

const GALLERY_CAPTIONS: [&str; 4] = ["Project One", "Project Two", "Project Three", "Project Four"];

/// Kind of a rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Block {
    Hero,
    Features,
    Testimonials,
    Gallery,
    Team,
    Blog,
    Faq,
    Portfolio,
    Timeline,
    Cta,
    ContactForm,
    AboutPage,
    ContactPage,
    PortfolioFallback,
    BlogFallback,
}

impl Block {
    /// Stable identifier written to the fragment's `data-block` attribute.
    pub fn id(self) -> &'static str {
        self.into()
    }
}

impl From<Section> for Block {
    fn from(section: Section) -> Self {
        match section {
            Section::Hero => Self::Hero,
            Section::Features => Self::Features,
            Section::Testimonials => Self::Testimonials,
            Section::Gallery => Self::Gallery,
            Section::Cta => Self::Cta,
            Section::ContactForm => Self::ContactForm,
            Section::Team => Self::Team,
            Section::Blog => Self::Blog,
            Section::Faq => Self::Faq,
            Section::Portfolio => Self::Portfolio,
            Section::Timeline => Self::Timeline,
        }
    }
}

/// A chunk of markup produced by one renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub block: Block,
    pub html: String,
}

/// Render one block.
pub fn render_block(ctx: &RenderContext<'_>, block: Block) -> Result<Fragment, RenderError> {
    let html = match block {
        Block::Hero => hero(ctx)?,
        Block::Features => features(ctx)?,
        Block::Testimonials => testimonials(ctx)?,
        Block::Gallery => gallery(ctx)?,
        Block::Team => team(ctx)?,
        Block::Blog => blog(ctx)?,
        Block::Faq => faq(ctx)?,
        Block::Portfolio => portfolio(ctx)?,
        Block::Timeline => timeline(ctx)?,
        Block::Cta => cta(ctx)?,
        Block::ContactForm => contact(ctx, Some(Block::ContactForm))?,
        Block::AboutPage => about_page(ctx)?,
        Block::ContactPage => contact_page(ctx)?,
        Block::PortfolioFallback => portfolio_fallback(ctx)?,
        Block::BlogFallback => blog_fallback(ctx)?,
    };

    Ok(Fragment { block, html })
}

fn hero(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    ctx.engine.render(
        "hero.html",
        context! {
            theme => &ctx.theme,
            heading => &ctx.config.hero_heading,
            subheading => &ctx.config.hero_subheading,
        },
    )
}

fn features(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    ctx.engine.render(
        "features.html",
        context! {
            theme => &ctx.theme,
            features => ctx.config.features.as_slice(),
        },
    )
}

#[derive(Debug, Serialize)]
struct TestimonialView<'a> {
    quote: &'a str,
    name: &'a str,
    title: &'a str,
    src: String,
    fallback: String,
}

fn testimonials(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let items: Vec<_> = ctx
        .config
        .testimonials
        .iter()
        .map(|t| {
            let fallback = ctx.avatar_placeholder(&t.name);
            TestimonialView {
                quote: &t.quote,
                name: &t.name,
                title: &t.title,
                src: t.image.or_placeholder(&fallback),
                fallback,
            }
        })
        .collect();

    ctx.engine.render(
        "testimonials.html",
        context! { theme => &ctx.theme, testimonials => items },
    )
}

#[derive(Debug, Serialize)]
struct GallerySlot {
    number: usize,
    caption: &'static str,
    src: String,
    fallback: String,
}

fn gallery(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let slots: Vec<_> = ctx
        .config
        .images
        .gallery()
        .into_iter()
        .zip(GALLERY_CAPTIONS)
        .enumerate()
        .map(|(i, (image, caption))| {
            let number = i + 1;
            let fallback = ctx.placeholder(400, 300, &format!("Image+{number}"));
            GallerySlot {
                number,
                caption,
                src: image.or_placeholder(&fallback),
                fallback,
            }
        })
        .collect();

    ctx.engine
        .render("gallery.html", context! { theme => &ctx.theme, slots => slots })
}

#[derive(Debug, Serialize)]
struct MemberView<'a> {
    name: &'a str,
    src: String,
    fallback: String,
}

fn team(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let members: Vec<_> = ctx
        .config
        .team
        .iter()
        .map(|m| {
            let fallback = ctx.avatar_placeholder(&m.name);
            MemberView {
                name: &m.name,
                src: m.image_url.or_placeholder(&fallback),
                fallback,
            }
        })
        .collect();

    ctx.engine
        .render("team.html", context! { theme => &ctx.theme, members => members })
}

#[derive(Debug, Serialize)]
struct PostView<'a> {
    title: &'a str,
    alt: String,
    byline: String,
    excerpt: String,
    src: String,
    fallback: String,
}

fn blog(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let posts: Vec<_> = ctx
        .config
        .blog_posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            let fallback = ctx.placeholder(600, 400, &format!("Blog+Post+{}", i + 1));
            PostView {
                title: &post.title,
                alt: post.title.clone(),
                byline: byline("Admin", &post.date),
                excerpt: excerpt(&post.content),
                src: post.image_url.or_placeholder(&fallback),
                fallback,
            }
        })
        .collect();

    ctx.engine.render(
        "blog.html",
        context! {
            theme => &ctx.theme,
            block => Block::Blog.id(),
            anchored => true,
            posts => posts,
        },
    )
}

/// Built-in posts shown by the blog layout when the blog section is off.
const FALLBACK_POSTS: [(&str, &str, &str, &str); 2] = [
    (
        "Understanding Responsive Design",
        "John Doe",
        "June 26, 2025",
        "Learn the fundamentals of creating websites that adapt seamlessly to any screen size...",
    ),
    (
        "The Power of Tailwind CSS",
        "Jane Smith",
        "June 20, 2025",
        "Discover how utility-first CSS frameworks like Tailwind can supercharge your development workflow...",
    ),
];

fn blog_fallback(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let images = &ctx.config.images;
    let posts: Vec<_> = FALLBACK_POSTS
        .into_iter()
        .zip([&images.gallery_image_1, &images.gallery_image_2])
        .enumerate()
        .map(|(i, ((title, author, date, summary), image))| {
            let alt = format!("Blog Post {}", i + 1);
            let fallback = ctx.placeholder(600, 400, &alt);
            PostView {
                title,
                alt,
                byline: byline(author, date),
                excerpt: summary.to_string(),
                src: image.or_placeholder(&fallback),
                fallback,
            }
        })
        .collect();

    ctx.engine.render(
        "blog.html",
        context! {
            theme => &ctx.theme,
            block => Block::BlogFallback.id(),
            anchored => false,
            posts => posts,
        },
    )
}

fn faq(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    ctx.engine.render(
        "faq.html",
        context! {
            theme => &ctx.theme,
            items => ctx.config.faq_items.as_slice(),
        },
    )
}

#[derive(Debug, Serialize)]
struct ProjectView<'a> {
    title: &'a str,
    description: &'a str,
    link: &'a str,
    src: String,
    fallback: String,
}

fn portfolio(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let projects: Vec<_> = ctx
        .config
        .portfolio_items
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let fallback = ctx.placeholder(400, 300, &format!("Project+{}", i + 1));
            ProjectView {
                title: &project.title,
                description: &project.description,
                link: &project.project_link,
                src: project.image_url.or_placeholder(&fallback),
                fallback,
            }
        })
        .collect();

    ctx.engine.render(
        "portfolio.html",
        context! {
            theme => &ctx.theme,
            block => Block::Portfolio.id(),
            anchored => true,
            projects => projects,
        },
    )
}

/// Built-in projects shown by the portfolio layout when the portfolio
/// section is off.
const FALLBACK_PROJECTS: [(&str, &str); 3] = [
    ("Alpha", "A stunning web design for a modern startup."),
    ("Beta", "Mobile app development with a focus on UX."),
    ("Gamma", "Branding and identity design for a new company."),
];

fn portfolio_fallback(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let images = &ctx.config.images;
    let titles: Vec<String> = FALLBACK_PROJECTS
        .iter()
        .map(|(name, _)| format!("Project {name}"))
        .collect();

    let projects: Vec<_> = FALLBACK_PROJECTS
        .into_iter()
        .zip(&titles)
        .zip([
            &images.gallery_image_1,
            &images.gallery_image_2,
            &images.gallery_image_3,
        ])
        .map(|(((_, description), title), image)| {
            let fallback = ctx.placeholder(400, 300, title);
            ProjectView {
                title,
                description,
                link: "#",
                src: image.or_placeholder(&fallback),
                fallback,
            }
        })
        .collect();

    ctx.engine.render(
        "portfolio.html",
        context! {
            theme => &ctx.theme,
            block => Block::PortfolioFallback.id(),
            anchored => false,
            projects => projects,
        },
    )
}

fn timeline(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    ctx.engine.render(
        "timeline.html",
        context! {
            theme => &ctx.theme,
            events => ctx.config.timeline_events.as_slice(),
        },
    )
}

fn cta(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    ctx.engine.render(
        "cta.html",
        context! { theme => &ctx.theme, cta => &ctx.config.cta },
    )
}

/// Contact details and the decorative form. `block` is `None` when the
/// markup is nested inside the contact page wrapper.
fn contact(ctx: &RenderContext<'_>, block: Option<Block>) -> Result<String, RenderError> {
    ctx.engine.render(
        "contact.html",
        context! {
            theme => &ctx.theme,
            block => block.map(Block::id),
            contact => &ctx.config.contact,
        },
    )
}

fn about(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let about = &ctx.config.about;
    let image = (!about.image.is_empty()).then(|| about.image.as_str());

    ctx.engine
        .render("about.html", context! { about => about, image => image })
}

fn about_page(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    page(ctx, Block::AboutPage, "about", "About Us", about(ctx)?)
}

fn contact_page(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    page(ctx, Block::ContactPage, "contact", "Contact Us", contact(ctx, None)?)
}

fn page(
    ctx: &RenderContext<'_>,
    block: Block,
    anchor: &str,
    heading: &str,
    content: String,
) -> Result<String, RenderError> {
    ctx.engine.render(
        "page.html",
        context! {
            theme => &ctx.theme,
            block => block.id(),
            anchor => anchor,
            heading => heading,
            content => content,
        },
    )
}

#[derive(Debug, Serialize)]
struct SocialLink<'a> {
    platform: &'static str,
    url: &'a str,
    icon: &'static str,
}

/// Render the page footer.
pub fn footer(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let social: Vec<_> = ctx
        .config
        .social
        .links()
        .into_iter()
        .map(|(platform, url): (SocialPlatform, &str)| SocialLink {
            platform: platform.name(),
            url,
            icon: platform.icon(),
        })
        .collect();

    ctx.engine.render(
        "footer.html",
        context! {
            theme => &ctx.theme,
            copyright => &ctx.config.footer_copyright,
            social => social,
        },
    )
}

fn byline(author: &str, date: &str) -> String {
    if date.trim().is_empty() {
        format!("By {author}")
    } else {
        format!("By {author} | {date}")
    }
}

fn excerpt(content: &str) -> String {
    let mut text: String = content.chars().take(EXCERPT_CHARS).collect();
    text.push_str("...");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateEngine;
    use pretty_assertions::assert_eq;
    use sitewright_model::{
        BlogPost, Collection, Configuration, EscapePolicy, ImageRef, StyleField, TeamMember,
    };

    fn engine() -> TemplateEngine {
        TemplateEngine::new(EscapePolicy::Trusted).unwrap()
    }

    fn render(config: &Configuration, block: Block) -> String {
        let engine = engine();
        let ctx = RenderContext::new(config, &engine);
        render_block(&ctx, block).unwrap().html
    }

    #[test]
    fn block_ids_are_kebab_case() {
        assert_eq!(Block::ContactForm.id(), "contact-form");
        assert_eq!(Block::PortfolioFallback.id(), "portfolio-fallback");
        assert_eq!(Block::from(Section::Faq), Block::Faq);
    }

    #[test]
    fn fragments_carry_their_block_id() {
        let config = Configuration::default();
        for block in <Block as strum::IntoEnumIterator>::iter() {
            let html = render(&config, block);
            assert!(
                html.contains(&format!("data-block=\"{}\"", block.id())),
                "{block:?}"
            );
        }
    }

    #[test]
    fn features_render_each_item() {
        let mut config = Configuration::default();
        config.features = vec![sitewright_model::Feature {
            heading: "Fast".to_string(),
            description: "Loads quickly".to_string(),
        }]
        .into();

        let html = render(&config, Block::Features);

        assert!(html.contains("Key Features"));
        assert!(html.contains(">Fast</h3>"));
        assert_eq!(html.matches("feature-card").count(), 1);
    }

    #[test]
    fn empty_collections_render_empty_containers() {
        let config = Configuration {
            features: Collection::new(),
            testimonials: Collection::new(),
            team: Collection::new(),
            blog_posts: Collection::new(),
            faq_items: Collection::new(),
            portfolio_items: Collection::new(),
            timeline_events: Collection::new(),
            ..Default::default()
        };

        let cases = [
            (Block::Features, "feature-card"),
            (Block::Testimonials, "testimonial-card"),
            (Block::Team, "team-card"),
            (Block::Blog, "blog-card"),
            (Block::Faq, "<details"),
            (Block::Portfolio, "portfolio-card"),
            (Block::Timeline, "timeline-event"),
        ];

        for (block, item_marker) in cases {
            let html = render(&config, block);
            assert!(html.starts_with("<section"), "{block:?}");
            assert!(html.trim_end().ends_with("</section>"), "{block:?}");
            assert!(!html.contains(item_marker), "{block:?}");
        }
    }

    #[test]
    fn empty_images_use_digest_placeholders() {
        let mut config = Configuration::default();
        config.team = vec![TeamMember {
            name: "Alex Brown".to_string(),
            image_url: ImageRef::empty(),
        }]
        .into();

        let html = render(&config, Block::Team);
        assert!(html.contains("src=\"https://placehold.co/60x60/3b82f6/ffffff?text=AL\""));
        assert!(html.contains("this.src='https://placehold.co/60x60/3b82f6/ffffff?text=AL';"));

        config.set_override(StyleField::PrimaryColor, "#ef4444");
        let html = render(&config, Block::Team);
        assert!(html.contains("placehold.co/60x60/ef4444/ffffff?text=AL"));
        assert!(!html.contains("3b82f6"));
    }

    #[test]
    fn gallery_always_has_four_slots() {
        let mut config = Configuration::default();
        config.images.gallery_image_2 = ImageRef::from("https://example.com/two.png");

        let html = render(&config, Block::Gallery);

        assert_eq!(html.matches("<img").count(), 4);
        assert!(html.contains("text=Image+1"));
        assert!(html.contains("src=\"https://example.com/two.png\""));
        assert!(html.contains("Project Four"));
    }

    #[test]
    fn blog_truncates_and_dates_posts() {
        let mut config = Configuration::default();
        config.blog_posts = vec![
            BlogPost {
                title: "Long".to_string(),
                content: "x".repeat(200),
                date: "March 3, 2025".to_string(),
                ..Default::default()
            },
            BlogPost {
                title: "Short".to_string(),
                content: "Hi".to_string(),
                ..Default::default()
            },
        ]
        .into();

        let html = render(&config, Block::Blog);

        assert!(html.contains(&format!("{}...", "x".repeat(150))));
        assert!(!html.contains(&"x".repeat(151)));
        assert!(html.contains("By Admin | March 3, 2025"));
        assert!(html.contains(">By Admin</p>"));
        assert!(html.contains("Hi..."));
        assert!(html.contains("text=Blog+Post+2"));
    }

    #[test]
    fn portfolio_fallback_uses_gallery_images() {
        let mut config = Configuration::default();
        config.images.gallery_image_1 = ImageRef::from("https://example.com/alpha.png");

        let html = render(&config, Block::PortfolioFallback);

        assert!(html.contains("Project Alpha"));
        assert!(html.contains("Project Beta"));
        assert!(html.contains("Project Gamma"));
        assert!(html.contains("src=\"https://example.com/alpha.png\""));
        assert!(html.contains("text=Project+Beta"));
        assert!(!html.contains("id=\"portfolio\""));
        assert!(!html.contains("target=\"_blank\""));
    }

    #[test]
    fn blog_fallback_has_two_posts() {
        let html = render(&Configuration::default(), Block::BlogFallback);

        assert_eq!(html.matches("blog-card").count(), 2);
        assert!(html.contains("By John Doe | June 26, 2025"));
        assert!(html.contains("The Power of Tailwind CSS"));
        assert!(html.contains("alt=\"Blog Post 2\""));
    }

    #[test]
    fn portfolio_links_open_in_new_tab() {
        let html = render(&Configuration::default(), Block::Portfolio);

        assert!(html.contains("id=\"portfolio\""));
        assert!(html.contains("href=\"#\" target=\"_blank\""));
        assert!(html.contains("View Project &rarr;"));
    }

    #[test]
    fn faq_includes_toggle_script() {
        let html = render(&Configuration::default(), Block::Faq);

        assert_eq!(html.matches("<details").count(), 2);
        assert!(html.contains("rotate-180"));
    }

    #[test]
    fn pages_wrap_their_content() {
        let config = Configuration::default();

        let about = render(&config, Block::AboutPage);
        assert!(about.contains("id=\"about\""));
        assert!(about.contains("About Us"));
        assert!(!about.contains("<img"));

        let contact = render(&config, Block::ContactPage);
        assert!(contact.contains("id=\"contact\""));
        assert!(contact.contains("Get in Touch"));
        assert!(contact.contains("hello@example.com"));
        assert_eq!(contact.matches("data-block=").count(), 1);

        let form = render(&config, Block::ContactForm);
        assert!(!form.contains("id=\"contact\""));
        assert!(form.contains("Send Message"));
    }

    #[test]
    fn footer_lists_non_empty_social_links() {
        let mut config = Configuration::default();
        config.social.twitter.clear();

        let engine = engine();
        let ctx = RenderContext::new(&config, &engine);
        let html = footer(&ctx).unwrap();

        assert!(html.contains("data-platform=\"facebook\""));
        assert!(!html.contains("data-platform=\"twitter\""));
        assert!(html.contains("📸"));
        assert!(html.contains("Privacy Policy"));
    }

    #[test]
    fn html_policy_escapes_text_fields() {
        let mut config = Configuration::default();
        config.hero_heading = "<script>alert(1)</script>".to_string();

        let engine = TemplateEngine::new(EscapePolicy::Html).unwrap();
        let ctx = RenderContext::new(&config, &engine);
        let html = render_block(&ctx, Block::Hero).unwrap().html;

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn trusted_policy_keeps_markup() {
        let mut config = Configuration::default();
        config.hero_heading = "<em>Hi</em>".to_string();

        let html = render(&config, Block::Hero);

        assert!(html.contains("<em>Hi</em>"));
    }
}
