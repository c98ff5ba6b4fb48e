//! Template engine holding the built-in block and document templates.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use sitewright_model::EscapePolicy;

use crate::RenderError;

/// Template engine using minijinja.
///
/// Every text field reaches markup through this environment, so the escape
/// policy chosen here is the only place escaping is decided.
#[derive(Debug)]
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine with all built-in templates registered.
    pub fn new(escape: EscapePolicy) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(move |_name| match escape {
            EscapePolicy::Trusted => AutoEscape::None,
            EscapePolicy::Html => AutoEscape::Html,
        });

        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        Ok(Self { env })
    }

    /// Render a named template with a serializable context.
    pub fn render<S: Serialize>(&self, template: &str, ctx: S) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(template)?;
        Ok(tmpl.render(ctx)?)
    }
}

const TEMPLATES: [(&str, &str); 15] = [
    ("hero.html", HERO_TEMPLATE),
    ("features.html", FEATURES_TEMPLATE),
    ("testimonials.html", TESTIMONIALS_TEMPLATE),
    ("gallery.html", GALLERY_TEMPLATE),
    ("team.html", TEAM_TEMPLATE),
    ("blog.html", BLOG_TEMPLATE),
    ("faq.html", FAQ_TEMPLATE),
    ("portfolio.html", PORTFOLIO_TEMPLATE),
    ("timeline.html", TIMELINE_TEMPLATE),
    ("cta.html", CTA_TEMPLATE),
    ("contact.html", CONTACT_TEMPLATE),
    ("about.html", ABOUT_TEMPLATE),
    ("page.html", PAGE_TEMPLATE),
    ("footer.html", FOOTER_TEMPLATE),
    ("document.html", DOCUMENT_TEMPLATE),
];

const HERO_TEMPLATE: &str = r##"<section data-block="hero" class="relative bg-gradient-to-r from-{{ theme.accent }}-600 to-{{ theme.accent }}-800 {{ theme.header_text }} py-20 px-4 sm:px-6 lg:px-8 shadow-lg rounded-lg mb-8 overflow-hidden">
  <div class="container mx-auto text-center relative z-10">
    <h1 class="text-4xl sm:text-5xl lg:text-6xl font-bold mb-4 animate-fade-in-up">
      {{ heading }}
    </h1>
    <p class="text-lg sm:text-xl lg:text-2xl mb-8 opacity-90 animate-fade-in-up delay-200">
      {{ subheading }}
    </p>
    <a href="#features" class="inline-block bg-white {{ theme.button_text }} hover:{{ theme.button_hover }} font-semibold py-3 px-8 rounded-full shadow-lg transition duration-300 ease-in-out transform hover:scale-105">
      Explore More
    </a>
  </div>
  <div class="absolute inset-0 opacity-20">
    <svg class="w-full h-full" viewBox="0 0 100 100" preserveAspectRatio="none">
      <path fill="currentColor" class="text-{{ theme.accent }}-500" d="M0,0 Q50,100 100,0 T0,0 Z"></path>
    </svg>
  </div>
</section>
"##;

const FEATURES_TEMPLATE: &str = r##"<section data-block="features" id="features" class="py-16 px-4 sm:px-6 lg:px-8 {{ theme.section_bg_light }} rounded-lg shadow-md mb-8">
  <div class="container mx-auto text-center">
    <h2 class="text-3xl sm:text-4xl font-bold mb-12 {{ theme.body_text }}">Key Features</h2>
    <div class="grid grid-cols-1 md:grid-cols-3 gap-10">
      {% for feature in features %}
      <div class="feature-card p-6 {{ theme.section_bg_dark }} rounded-xl shadow-lg hover:shadow-xl transition-shadow duration-300 transform hover:-translate-y-2">
        <div class="text-{{ theme.accent }}-500 mb-4">
          <svg class="w-12 h-12 mx-auto" fill="none" stroke="currentColor" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9.75 17L12 19.25M12 19.25L14.25 17M12 19.25V5M12 5C7.5 5 4 8.5 4 13S7.5 21 12 21 20 17.5 20 13 16.5 5 12 5Z"></path></svg>
        </div>
        <h3 class="text-xl font-semibold mb-3 {{ theme.body_text }}">{{ feature.heading }}</h3>
        <p class="{{ theme.body_text_muted }}">{{ feature.description }}</p>
      </div>
      {% endfor %}
    </div>
  </div>
</section>
"##;

const TESTIMONIALS_TEMPLATE: &str = r##"<section data-block="testimonials" class="py-16 px-4 sm:px-6 lg:px-8 {{ theme.section_bg_light }} rounded-lg shadow-md mb-8">
  <div class="container mx-auto text-center">
    <h2 class="text-3xl sm:text-4xl font-bold mb-12 {{ theme.body_text }}">What Our Clients Say</h2>
    <div class="grid grid-cols-1 md:grid-cols-2 gap-10">
      {% for item in testimonials %}
      <div class="testimonial-card {{ theme.section_bg_dark }} p-8 rounded-xl shadow-lg relative">
        <p class="{{ theme.body_text_muted }} italic mb-6">"{{ item.quote }}"</p>
        <div class="flex items-center justify-center">
          <img src="{{ item.src }}" alt="{{ item.name }}" class="w-16 h-16 rounded-full mr-4 object-cover" onerror="this.onerror=null;this.src='{{ item.fallback }}';">
          <div>
            <p class="font-semibold {{ theme.body_text }}">{{ item.name }}</p>
            <p class="text-sm {{ theme.body_text_soft }}">{{ item.title }}</p>
          </div>
        </div>
      </div>
      {% endfor %}
    </div>
  </div>
</section>
"##;

const GALLERY_TEMPLATE: &str = r##"<section data-block="gallery" class="py-16 px-4 sm:px-6 lg:px-8 {{ theme.section_bg_light }} rounded-lg shadow-md mb-8">
  <div class="container mx-auto text-center">
    <h2 class="text-3xl sm:text-4xl font-bold mb-12 {{ theme.body_text }}">Our Work</h2>
    <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-6">
      {% for slot in slots %}
      <div class="relative overflow-hidden rounded-lg shadow-lg group">
        <img src="{{ slot.src }}" alt="Gallery Image {{ slot.number }}" class="w-full h-full object-cover transition-transform duration-300 group-hover:scale-110" onerror="this.onerror=null;this.src='{{ slot.fallback }}';">
        <div class="absolute inset-0 bg-black bg-opacity-50 flex items-center justify-center opacity-0 group-hover:opacity-100 transition-opacity duration-300">
          <p class="text-white text-lg font-semibold">{{ slot.caption }}</p>
        </div>
      </div>
      {% endfor %}
    </div>
  </div>
</section>
"##;

const TEAM_TEMPLATE: &str = r##"<section data-block="team" id="team" class="py-16 px-4 sm:px-6 lg:px-8 {{ theme.section_bg_light }} rounded-lg shadow-md mb-8">
  <div class="container mx-auto text-center">
    <h2 class="text-3xl sm:text-4xl font-bold mb-12 {{ theme.body_text }}">Meet Our Team</h2>
    <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-10">
      {% for member in members %}
      <div class="team-card p-6 {{ theme.section_bg_dark }} rounded-xl shadow-lg text-center transform hover:scale-105 transition-transform duration-300">
        <img src="{{ member.src }}" alt="{{ member.name }}" class="w-24 h-24 rounded-full mx-auto mb-4 object-cover" onerror="this.onerror=null;this.src='{{ member.fallback }}';">
        <h3 class="text-xl font-semibold {{ theme.body_text }} mb-1">{{ member.name }}</h3>
        <p class="{{ theme.body_text_muted }}">Team Member</p>
      </div>
      {% endfor %}
    </div>
  </div>
</section>
"##;

const BLOG_TEMPLATE: &str = r##"<section data-block="{{ block }}"{% if anchored %} id="blog"{% endif %} class="py-16 px-4 sm:px-6 lg:px-8 {{ theme.section_bg_light }} rounded-lg shadow-md mb-8">
  <div class="container mx-auto{% if anchored %} text-center{% endif %}">
    <h2 class="text-3xl sm:text-4xl font-bold mb-12 {{ theme.body_text }}">Latest Blog Posts</h2>
    <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
      {% for post in posts %}
      <article class="blog-card {{ theme.section_bg_dark }} rounded-lg shadow-md overflow-hidden{% if anchored %} transform hover:scale-105 transition duration-300{% endif %}">
        <img src="{{ post.src }}" alt="{{ post.alt }}" class="w-full h-56 object-cover" onerror="this.onerror=null;this.src='{{ post.fallback }}';">
        <div class="p-6">
          <h3 class="text-xl font-semibold mb-2 {{ theme.body_text }}">{{ post.title }}</h3>
          <p class="{{ theme.body_text_muted }} text-sm mb-4">{{ post.byline }}</p>
          <p class="{{ theme.body_text_muted }} mb-4">{{ post.excerpt }}</p>
          <a href="#" class="text-{{ theme.accent }}-600 hover:underline">Read More &rarr;</a>
        </div>
      </article>
      {% endfor %}
    </div>
  </div>
</section>
"##;

const FAQ_TEMPLATE: &str = r##"<section data-block="faq" id="faq" class="py-16 px-4 sm:px-6 lg:px-8 {{ theme.section_bg_light }} rounded-lg shadow-md mb-8">
  <div class="container mx-auto text-center">
    <h2 class="text-3xl sm:text-4xl font-bold mb-12 {{ theme.body_text }}">Frequently Asked Questions</h2>
    <div class="max-w-3xl mx-auto text-left">
      {% for item in items %}
      <details class="mb-4 bg-white p-5 rounded-lg shadow-md cursor-pointer transition-all duration-300 ease-in-out hover:shadow-lg">
        <summary class="font-semibold text-lg {{ theme.body_text }} flex justify-between items-center">
          {{ item.question }}
          <svg class="w-6 h-6 text-{{ theme.accent }}-500 ml-2 transform rotate-0 details-arrow transition-transform duration-300" fill="none" stroke="currentColor" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 9l-7 7-7-7"></path></svg>
        </summary>
        <p class="mt-4 {{ theme.body_text_muted }}">
          {{ item.answer }}
        </p>
      </details>
      {% endfor %}
    </div>
  </div>
  <script>
    document.querySelectorAll('details').forEach(detail => {
      detail.addEventListener('toggle', () => {
        const arrow = detail.querySelector('.details-arrow');
        if (arrow) {
          if (detail.open) {
            arrow.classList.add('rotate-180');
          } else {
            arrow.classList.remove('rotate-180');
          }
        }
      });
    });
  </script>
</section>
"##;

const PORTFOLIO_TEMPLATE: &str = r##"<section data-block="{{ block }}"{% if anchored %} id="portfolio"{% endif %} class="py-16 px-4 sm:px-6 lg:px-8 {{ theme.section_bg_light }} rounded-lg shadow-md mb-8">
  <div class="container mx-auto text-center">
    <h2 class="text-3xl sm:text-4xl font-bold mb-12 {{ theme.body_text }}">Our Portfolio</h2>
    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">
      {% for project in projects %}
      <div class="portfolio-card {{ theme.section_bg_dark }} rounded-lg shadow-md overflow-hidden transform hover:scale-105 transition duration-300">
        <img src="{{ project.src }}" alt="{{ project.title }}" class="w-full h-48 object-cover" onerror="this.onerror=null;this.src='{{ project.fallback }}';">
        <div class="p-6">
          <h3 class="text-xl font-semibold mb-2 {{ theme.body_text }}">{{ project.title }}</h3>
          <p class="{{ theme.body_text_muted }} mb-4">{{ project.description }}</p>
          <a href="{{ project.link }}"{% if anchored %} target="_blank" rel="noopener noreferrer"{% endif %} class="text-{{ theme.accent }}-600 hover:underline">View Project &rarr;</a>
        </div>
      </div>
      {% endfor %}
    </div>
  </div>
</section>
"##;

const TIMELINE_TEMPLATE: &str = r##"<section data-block="timeline" id="timeline" class="py-16 px-4 sm:px-6 lg:px-8 {{ theme.section_bg_light }} rounded-lg shadow-md mb-8">
  <div class="container mx-auto text-center">
    <h2 class="text-3xl sm:text-4xl font-bold mb-12 {{ theme.body_text }}">Our Journey</h2>
    <div class="max-w-4xl mx-auto">
      {% for event in events %}
      <div class="timeline-event flex items-center mb-8 last:mb-0">
        <div class="w-1/4 text-right pr-8">
          <h3 class="text-2xl font-bold {{ theme.body_text }}">{{ event.year }}</h3>
        </div>
        <div class="w-3/4 flex items-center">
          <div class="w-4 h-4 bg-{{ theme.accent }}-500 rounded-full flex-shrink-0 relative">
            <div class="absolute w-0.5 bg-gray-300 h-full left-1/2 -translate-x-1/2 top-4 bottom-0"></div>
          </div>
          <div class="ml-8 p-4 {{ theme.section_bg_dark }} rounded-lg shadow-md w-full">
            <h4 class="text-xl font-semibold mb-2 {{ theme.body_text }}">{{ event.title }}</h4>
            <p class="{{ theme.body_text_muted }}">{{ event.description }}</p>
          </div>
        </div>
      </div>
      {% endfor %}
    </div>
  </div>
</section>
"##;

const CTA_TEMPLATE: &str = r##"<section data-block="cta" class="{{ theme.button_bg }} {{ theme.button_text }} py-16 px-4 sm:px-6 lg:px-8 text-center rounded-lg shadow-md mb-8">
  <div class="container mx-auto">
    <h2 class="text-3xl sm:text-4xl font-bold mb-6">{{ cta.heading }}</h2>
    <p class="text-lg opacity-90 mb-8">{{ cta.subheading }}</p>
    <a href="#contact" class="inline-block {{ theme.section_bg_dark }} {{ theme.button_bg_as_text }} font-semibold py-3 px-8 rounded-full shadow-lg {{ theme.button_hover_as_text }} transition duration-300 ease-in-out transform hover:scale-105">
      {{ cta.button_text }}
    </a>
  </div>
</section>
"##;

const CONTACT_TEMPLATE: &str = r##"<section{% if block %} data-block="{{ block }}"{% endif %} class="py-16 px-4 sm:px-6 lg:px-8 {{ theme.section_bg_dark }} rounded-lg shadow-md mb-8">
  <div class="container mx-auto text-center">
    <h2 class="text-3xl sm:text-4xl font-bold mb-8 {{ theme.body_text }}">Get in Touch</h2>
    <div class="max-w-xl mx-auto">
      <p class="{{ theme.body_text_muted }} leading-relaxed mb-8">
        Have a question or want to work with us? Fill out the form below or reach us directly:
      </p>
      <div class="mb-6 {{ theme.body_text_muted }}">
        <p class="flex items-center justify-center mb-2"><svg class="w-5 h-5 mr-2 text-{{ theme.accent }}-500" fill="none" stroke="currentColor" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 8l7.89 5.26a2 2 0 002.22 0L21 8M5 19h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v10a2 2 0 002 2z"></path></svg>{{ contact.email }}</p>
        <p class="flex items-center justify-center mb-2"><svg class="w-5 h-5 mr-2 text-{{ theme.accent }}-500" fill="none" stroke="currentColor" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 5a2 2 0 012-2h3.28a1 1 0 01.948.684l1.498 4.493a1 1 0 01-.502 1.21l-2.257 1.13a11.042 11.042 0 005.516 5.516l1.13-2.257a1 1 0 011.21-.502l4.493 1.498a1 1 0 01.684.949V19a2 2 0 01-2 2h-1C9.716 21 3 14.284 3 6V5z"></path></svg>{{ contact.phone }}</p>
        <p class="flex items-center justify-center"><svg class="w-5 h-5 mr-2 text-{{ theme.accent }}-500" fill="none" stroke="currentColor" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M17.657 16.657L13.414 20.9a1.998 1.998 0 01-2.828 0L6.343 16.657a8 8 0 1111.314 0z"></path><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M15 11a3 3 0 11-6 0 3 3 0 016 0z"></path></svg>{{ contact.address }}</p>
      </div>
      <form class="space-y-6">
        <div>
          <input type="text" placeholder="Your Name" class="w-full p-4 border border-gray-300 rounded-lg focus:ring-2 focus:ring-{{ theme.accent }}-500 focus:border-transparent transition-all duration-200 shadow-sm" />
        </div>
        <div>
          <input type="email" placeholder="Your Email" class="w-full p-4 border border-gray-300 rounded-lg focus:ring-2 focus:ring-{{ theme.accent }}-500 focus:border-transparent transition-all duration-200 shadow-sm" />
        </div>
        <div>
          <textarea placeholder="Your Message" rows="6" class="w-full p-4 border border-gray-300 rounded-lg focus:ring-2 focus:ring-{{ theme.accent }}-500 focus:border-transparent transition-all duration-200 shadow-sm"></textarea>
        </div>
        <button type="submit" class="w-full {{ theme.button_bg }} {{ theme.button_text }} font-semibold py-4 rounded-lg {{ theme.button_hover }} transition duration-300 ease-in-out transform hover:scale-105 shadow-md">
          Send Message
        </button>
      </form>
    </div>
  </div>
</section>
"##;

const ABOUT_TEMPLATE: &str = r##"<section class="py-16 px-4 sm:px-6 lg:px-8 bg-white rounded-lg shadow-md mb-8">
  <div class="container mx-auto flex flex-col md:flex-row items-center gap-10">
    <div class="md:w-1/2">
      {% if image %}
      <img src="{{ image }}" alt="About Us" class="rounded-lg shadow-xl object-cover w-full h-auto">
      {% endif %}
    </div>
    <div class="md:w-1/2 text-center md:text-left">
      <h2 class="text-3xl sm:text-4xl font-bold mb-6 text-gray-800">{{ about.title }}</h2>
      <p class="text-gray-700 leading-relaxed mb-4">
        {{ about.description }}
      </p>
    </div>
  </div>
</section>
"##;

const PAGE_TEMPLATE: &str = r##"<section data-block="{{ block }}" id="{{ anchor }}" class="py-16 px-4 sm:px-6 lg:px-8 {{ theme.section_bg_light }} rounded-lg shadow-md mb-8">
  <div class="container mx-auto">
    <h2 class="text-3xl sm:text-4xl font-bold mb-12 text-center {{ theme.body_text }}">{{ heading }}</h2>
    {{ content | safe }}
  </div>
</section>
"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="{{ theme.footer_bg }} {{ theme.footer_text }} py-8 px-4 sm:px-6 lg:px-8 mt-auto rounded-t-lg shadow-inner">
  <div class="container mx-auto text-center text-sm">
    <p>{{ copyright }}</p>
    <div class="flex justify-center space-x-4 mt-4">
      <a href="#" class="{{ theme.footer_text_muted }} hover:{{ theme.footer_text }} transition duration-300">Privacy Policy</a>
      <span class="text-gray-500">|</span>
      <a href="#" class="{{ theme.footer_text_muted }} hover:{{ theme.footer_text }} transition duration-300">Terms of Service</a>
    </div>
    <div class="flex justify-center mt-4">
      {% for link in social %}
      <a href="{{ link.url }}" data-platform="{{ link.platform }}" target="_blank" rel="noopener noreferrer" class="{{ theme.footer_text_muted }} hover:{{ theme.footer_text }} transition duration-300 mx-2">
        <span class="text-xl">{{ link.icon }}</span>
      </a>
      {% endfor %}
    </div>
  </div>
</footer>
"##;

const DOCUMENT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{ title }}</title>
  <script src="https://cdn.tailwindcss.com"></script>
  <link href="{{ font.url }}" rel="stylesheet">
  <style>
    body {
      font-family: '{{ font.family }}', sans-serif;
    }
{{ style | safe }}
    html {
      scroll-behavior: smooth;
    }
    .{{ font.class }} * {
      font-family: '{{ font.family }}', sans-serif;
    }
  </style>
  <script>
    tailwind.config = {
      theme: {
        extend: {
          colors: {
            {{ theme.accent }}: {
              {% for shade in palette %}
              {{ shade.step }}: '{{ shade.value }}',
              {% endfor %}
            }
          },
          fontFamily: {
            {% for entry in font_classes %}
            {{ entry.key | safe }}: ['{{ entry.family }}', 'sans-serif'],
            {% endfor %}
          }
        }
      }
    }
  </script>
</head>
<body class="{{ skeleton.body }}">
  <header class="{{ skeleton.header }}">
    <div class="container mx-auto flex justify-between items-center flex-wrap">
      <h1 class="text-2xl font-bold">
        <a href="#home" class="hover:{{ theme.header_text_hover }} transition duration-300">{{ title }}</a>
      </h1>
      <nav class="mt-2 md:mt-0">
        {% for link in nav %}
        <a href="{{ link.href }}" class="{{ theme.header_text }} hover:{{ theme.header_text_hover }} transition duration-300 px-3 py-2 rounded-md hover:{{ theme.header_bg_hover }}">
          {{ link.label }}
        </a>
        {% endfor %}
      </nav>
    </div>
  </header>

  <main class="{{ skeleton.main }}">
{{ main | safe }}
  </main>

{{ footer | safe }}
  <script>
{{ script | safe }}
  </script>
  {% for src in extra_scripts %}
  <script src="{{ src }}"></script>
  {% endfor %}
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn registers_every_template() {
        let engine = TemplateEngine::new(EscapePolicy::Trusted).unwrap();
        for (name, _) in TEMPLATES {
            assert!(engine.env.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn trusted_policy_inserts_verbatim() {
        let engine = TemplateEngine::new(EscapePolicy::Trusted).unwrap();
        let html = engine
            .render(
                "footer.html",
                context! { theme => context! {}, copyright => "<b>bold</b>", social => Vec::<String>::new() },
            )
            .unwrap();

        assert!(html.contains("<p><b>bold</b></p>"));
    }

    #[test]
    fn html_policy_escapes_text() {
        let engine = TemplateEngine::new(EscapePolicy::Html).unwrap();
        let html = engine
            .render(
                "footer.html",
                context! { theme => context! {}, copyright => "<b>bold</b>", social => Vec::<String>::new() },
            )
            .unwrap();

        assert!(html.contains("&lt;b&gt;bold&lt;&#x2f;b&gt;"));
        assert!(!html.contains("<b>bold"));
    }
}
