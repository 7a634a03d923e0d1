use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GemlogError, Result};
use crate::model::{Location, post_filename, post_skeleton};
use crate::slug::slugify;
use crate::store::PostStore;
use chrono::NaiveDate;

use super::helpers::ALL_LOCATIONS;

pub fn run<S: PostStore>(
    store: &mut S,
    title: &str,
    draft: bool,
    date: NaiveDate,
) -> Result<CmdResult> {
    if title.contains(['\n', '\r']) {
        return Err(GemlogError::InvalidTitle(format!(
            "{:?} must fit on the heading line",
            title
        )));
    }

    let slug = slugify(title);
    if slug.is_empty() {
        return Err(GemlogError::InvalidTitle(format!(
            "\"{}\" needs at least one letter or digit",
            title
        )));
    }

    let filename = post_filename(date, &slug, store.file_ext());
    for location in ALL_LOCATIONS {
        if store.contains(location, &filename)? {
            return Err(GemlogError::AlreadyExists {
                path: store.post_path(location, &filename),
            });
        }
    }

    let location = if draft {
        Location::Drafts
    } else {
        Location::Published
    };
    let path = store.write_new(location, &filename, &post_skeleton(title, date))?;

    let mut result = CmdResult::default().with_post_paths(vec![path.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Created new {}: {}",
        if draft { "draft" } else { "post" },
        title
    )));
    result.add_message(CmdMessage::info(path.display().to_string()));
    Ok(result)
}
