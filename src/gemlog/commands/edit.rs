use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::PostStore;

use super::helpers::{ALL_LOCATIONS, resolve_title};

/// Resolves a title to the path of its file. Launching the editor is up to the caller.
pub fn run<S: PostStore>(store: &S, title: &str) -> Result<CmdResult> {
    let resolved = resolve_title(store, title, &ALL_LOCATIONS)?;
    let path = store.post_path(resolved.location, &resolved.filename);
    let mut result = CmdResult::default().with_post_paths(vec![path]);
    result.add_message(CmdMessage::success(format!(
        "Edited {} post: {}",
        resolved.location, resolved.filename
    )));
    Ok(result)
}
