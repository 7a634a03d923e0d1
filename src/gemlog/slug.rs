//! # Slugs
//!
//! A slug is the filename-safe form of a post title. It is the only part of a
//! post's identity derived from the title; the creation date supplies the rest
//! (see [`crate::model::post_filename`]).
//!
//! The rules are deliberately narrow: lowercase ASCII letters and digits are
//! kept, every other run of characters collapses into a single [`SEPARATOR`],
//! and separators at either end are dropped. Non-ASCII letters are not
//! transliterated, so a title made only of them slugifies to `""`. Callers that
//! need a usable identifier must reject the empty slug.

pub const SEPARATOR: char = '-';

/// Derives the slug for a title.
///
/// ```
/// use gemlog::slug::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  --Rust 2024--  "), "rust-2024");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}
