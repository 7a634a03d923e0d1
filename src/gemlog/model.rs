//! # Posts
//!
//! A post is a single Gemtext file. Its identity is its filename,
//! `YYYY-MM-DD-{slug}{ext}`, where the date is the creation date. Nothing else
//! about a post is stored outside the file: the title displayed in listings and
//! in the generated index is always read back from line 1.
//!
//! ```text
//! # Hello, World!
//! Published: 2024-01-15
//!
//! ...body...
//! ```
//!
//! A post lives in exactly one [`Location`]. Moving between locations never
//! renames the file.

use chrono::NaiveDate;
use std::fmt;

pub const HEADING_MARKER: char = '#';
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the `YYYY-MM-DD-` filename prefix.
const DATE_PREFIX_LEN: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Drafts,
    Published,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Drafts => "drafts",
            Location::Published => "published",
        }
    }

    pub fn other(&self) -> Location {
        match self {
            Location::Drafts => Location::Published,
            Location::Published => Location::Drafts,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listed post. The title comes from the file, never from the filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub filename: String,
    pub title: String,
    pub location: Location,
}

impl Post {
    pub fn from_content(filename: String, location: Location, content: &str) -> Self {
        Self {
            title: title_from_content(content),
            filename,
            location,
        }
    }
}

/// Extracts the title from the first line of a post, dropping the heading marker.
pub fn title_from_content(content: &str) -> String {
    let first = content.lines().next().unwrap_or_default();
    let first = first.strip_suffix('\r').unwrap_or(first);
    first
        .strip_prefix("# ")
        .or_else(|| first.strip_prefix(HEADING_MARKER))
        .unwrap_or(first)
        .to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `ext` carries its leading dot.
pub fn post_filename(date: NaiveDate, slug: &str, ext: &str) -> String {
    format!("{}-{}{}", format_date(date), slug, ext)
}

/// The slug part of a filename built by [`post_filename`], if it follows the scheme.
pub fn slug_of_filename<'a>(filename: &'a str, ext: &str) -> Option<&'a str> {
    let stem = filename.strip_suffix(ext)?;
    let (date, slug) = (stem.get(..DATE_PREFIX_LEN)?, stem.get(DATE_PREFIX_LEN..)?);
    let date = date.strip_suffix('-')?;
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    Some(slug)
}

/// The skeleton written for every new post.
pub fn post_skeleton(title: &str, date: NaiveDate) -> String {
    format!(
        "{marker} {title}
Published: {date}

This is your new blog post. Start writing in Gemtext format!

## Example Heading

* You can use lists
* Like this one
* To organize your content

> You can also include blockquotes for emphasis

=> https://gemini.circumlunar.space/ Learn more about Gemini
",
        marker = HEADING_MARKER,
        title = title,
        date = format_date(date),
    )
}
