//! Lifecycle transitions. A post moves between drafts and published under its
//! original filename; the title is resolved only in the source location.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Location;
use crate::store::PostStore;

use super::helpers::resolve_title;

/// Draft → published.
pub fn promote<S: PostStore>(store: &mut S, title: &str) -> Result<CmdResult> {
    transition(store, title, Location::Drafts)
}

/// Published → draft.
pub fn demote<S: PostStore>(store: &mut S, title: &str) -> Result<CmdResult> {
    transition(store, title, Location::Published)
}

fn transition<S: PostStore>(store: &mut S, title: &str, from: Location) -> Result<CmdResult> {
    let resolved = resolve_title(store, title, &[from])?;
    let to = from.other();
    let moved = store.move_post(&resolved.filename, from, to)?;

    let verb = match to {
        Location::Published => "Published",
        Location::Drafts => "Moved back to drafts",
    };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("{}: {}", verb, moved.filename)));
    result.add_message(CmdMessage::info(format!(
        "{} -> {}",
        moved.source.display(),
        moved.target.display()
    )));
    Ok(result.with_transition(moved))
}
