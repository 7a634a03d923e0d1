use crate::commands::{CmdMessage, CmdResult};
use crate::config::{BlogPaths, CONFIG_FILENAME, GemlogConfig};
use crate::error::{GemlogError, Result};
use std::fs;
use std::path::Path;

/// Creates the managed directories and writes a default config if none exists.
/// Safe to run on an existing blog.
pub fn run(root: &Path, config: &GemlogConfig) -> Result<CmdResult> {
    let paths = BlogPaths::from_config(root, config);
    let mut result = CmdResult::default();

    for dir in [&paths.content, &paths.drafts, &paths.public] {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(GemlogError::io(dir))?;
            result.add_message(CmdMessage::info(format!("Created {}", dir.display())));
        }
    }

    let config_path = root.join(CONFIG_FILENAME);
    if config_path.exists() {
        result.add_message(CmdMessage::info(format!(
            "Keeping existing {}",
            config_path.display()
        )));
    } else {
        config.save(root)?;
        result.add_message(CmdMessage::info(format!("Wrote {}", config_path.display())));
    }

    result.add_message(CmdMessage::success(format!(
        "Initialized blog in {}",
        root.display()
    )));
    Ok(result)
}
