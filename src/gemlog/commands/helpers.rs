use crate::error::{GemlogError, Result};
use crate::model::{Location, slug_of_filename};
use crate::slug::slugify;
use crate::store::PostStore;

/// Search order for commands that look in both locations.
pub const ALL_LOCATIONS: [Location; 2] = [Location::Published, Location::Drafts];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub location: Location,
    pub filename: String,
}

/// Maps a typed title to exactly one post.
///
/// Any filename containing the title's slug is a candidate, searched in
/// `locations` order. One candidate wins outright. Among several, a single
/// candidate whose slug equals the title's slug wins; otherwise the title is
/// ambiguous and every candidate is reported.
pub fn resolve_title<S: PostStore>(
    store: &S,
    title: &str,
    locations: &[Location],
) -> Result<Resolved> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(GemlogError::InvalidTitle(format!(
            "\"{}\" has no letters or digits to match on",
            title
        )));
    }

    let mut candidates = Vec::new();
    for &location in locations {
        for filename in store.list_filenames(location)? {
            if filename.contains(&slug) {
                candidates.push(Resolved { location, filename });
            }
        }
    }

    if candidates.len() > 1 {
        let exact: Vec<_> = candidates
            .iter()
            .filter(|c| slug_of_filename(&c.filename, store.file_ext()) == Some(slug.as_str()))
            .collect();
        if let [only] = exact.as_slice() {
            return Ok((*only).clone());
        }
        return Err(GemlogError::Ambiguous {
            query: title.to_string(),
            matches: candidates.into_iter().map(|c| c.filename).collect(),
        });
    }

    candidates.pop().ok_or_else(|| GemlogError::NotFound {
        query: title.to_string(),
        scope: scope_label(locations),
    })
}

fn scope_label(locations: &[Location]) -> String {
    locations
        .iter()
        .map(Location::as_str)
        .collect::<Vec<_>>()
        .join(" or ")
}
