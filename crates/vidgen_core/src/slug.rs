//! Filename slugs derived from prompts.

use regex::Regex;
use std::sync::LazyLock;

/// Longest slug produced, in characters.
pub const MAX_SLUG_CHARS: usize = 50;
/// Stem used when nothing usable survives sanitizing.
pub const DEFAULT_FILE_STEM: &str = "generated-video";

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("static pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Turn free text into a filesystem-safe stem.
///
/// Lowercases, strips everything but ASCII letters, digits, whitespace and
/// hyphens, collapses whitespace runs into a single hyphen, and truncates.
///
/// # Examples
///
/// ```
/// use vidgen_core::slugify;
///
/// assert_eq!(slugify("A Cat! Flying @ Night"), "a-cat-flying-night");
/// assert_eq!(slugify("!!!"), "generated-video");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let slug: String = hyphenated.chars().take(MAX_SLUG_CHARS).collect();

    if slug.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        slug
    }
}

/// Download filename for a video generated from `prompt`.
pub fn video_filename(prompt: &str) -> String {
    format!("{}.mp4", slugify(prompt))
}
