//! Companion stylesheet and script.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the companion stylesheet for a font family.
    pub fn generate_css(font_family: &str) -> String {
        format!(
            r#"/* Basic global styles and custom animations */
body {{
    font-family: '{font_family}', sans-serif;
}}
@keyframes fadeIn {{
    from {{ opacity: 0; }}
    to {{ opacity: 1; }}
}}
@keyframes fadeInUp {{
    from {{ opacity: 0; transform: translateY(20px); }}
    to {{ opacity: 1; transform: translateY(0); }}
}}
.animate-fade-in {{
    animation: fadeIn 0.5s ease-out forwards;
}}
.animate-fade-in-up {{
    animation: fadeInUp 0.6s ease-out forwards;
}}
.delay-100 {{ animation-delay: 0.1s; }}
.delay-200 {{ animation-delay: 0.2s; }}
.delay-300 {{ animation-delay: 0.3s; }}

/* Utility classes come from the Tailwind CDN script loaded by index.html.
   Compiling them into this file needs a Tailwind build step. */
"#
        )
    }

    /// Generate the companion script for a site title.
    pub fn generate_js(title: &str) -> String {
        format!(
            r#"document.addEventListener('DOMContentLoaded', () => {{
    console.log('{title} website loaded!');
}});
"#
        )
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}
