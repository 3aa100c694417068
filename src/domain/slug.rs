//! URL slug derivation.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

fn valid_slug() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("Invalid regex"))
}

/// Lower-cases, strips diacritics and collapses every run of other
/// characters into a single hyphen.
///
/// `"Action & Aventure"` becomes `"action-aventure"`. The result is stable
/// under repeated application.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.nfd().filter(|c| !is_combining_mark(*c)) {
        for lower in c.to_lowercase() {
            if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(lower);
            } else {
                pending_hyphen = true;
            }
        }
    }

    slug
}

#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    valid_slug().is_match(slug)
}
