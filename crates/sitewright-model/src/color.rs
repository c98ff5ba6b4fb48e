//! Color helpers derived from a single primary color.
//!
//! All functions are total: unknown or malformed input maps to a defined
//! default instead of failing.

/// Palette family used when a color is not recognized.
pub const DEFAULT_FAMILY: &str = "blue";

/// Digest used when a color cannot be reduced to six hex digits.
pub const DEFAULT_DIGEST: &str = "3b82f6";

const KNOWN_FAMILIES: [(&str, &str); 6] = [
    ("#3b82f6", "blue"),
    ("#047857", "emerald"),
    ("#ef4444", "red"),
    ("#f59e0b", "amber"),
    ("#6366f1", "indigo"),
    ("#4b5563", "gray"),
];

/// Alpha suffixes for the 10-step scale; `None` is the base color itself.
const PALETTE_STEPS: [(u16, Option<&str>); 10] = [
    (50, Some("10")),
    (100, Some("20")),
    (200, Some("30")),
    (300, Some("40")),
    (400, Some("50")),
    (500, None),
    (600, Some("d0")),
    (700, Some("a0")),
    (800, Some("80")),
    (900, Some("60")),
];

/// Map a primary color to the utility-class color family ("blue", "red", ...).
pub fn classify(color: &str) -> &'static str {
    let color = color.trim().to_ascii_lowercase();
    KNOWN_FAMILIES
        .iter()
        .find(|(hex, _)| *hex == color)
        .map(|(_, family)| *family)
        .unwrap_or(DEFAULT_FAMILY)
}

/// Reduce a color to a bare 6-digit hex token usable in URLs.
pub fn digest(color: &str) -> String {
    let trimmed = color.trim();
    let bare = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let token: String = bare.chars().take(6).collect();

    if token.len() == 6 && token.chars().all(|c| c.is_ascii_hexdigit()) {
        token.to_ascii_lowercase()
    } else {
        DEFAULT_DIGEST.to_string()
    }
}

/// Synthesize a 10-step scale from one color by alpha suffixing.
///
/// This is not a real shade computation: lighter steps are the base color
/// with decreasing alpha, darker steps with a different alpha.
pub fn palette(color: &str) -> Vec<(u16, String)> {
    PALETTE_STEPS
        .iter()
        .map(|(step, suffix)| {
            let value = match suffix {
                Some(alpha) => format!("{color}{alpha}"),
                None => color.to_string(),
            };
            (*step, value)
        })
        .collect()
}

/// Placeholder image URL tinted with the digest and labelled with `text`.
pub fn placeholder_url(width: u32, height: u32, digest: &str, text: &str) -> String {
    format!(
        "https://placehold.co/{width}x{height}/{digest}/ffffff?text={}",
        text.replace(' ', "+")
    )
}

/// First two characters of a name, upper-cased, for avatar placeholders.
pub fn initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}
