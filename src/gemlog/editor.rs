use crate::error::{GemlogError, Result};
use std::env;
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub const EDITOR_VAR: &str = "EDITOR";
pub const FALLBACK_EDITOR: &str = "nano";

/// Gets the editor command: $EDITOR, then the configured editor, then `nano`.
pub fn editor_command(configured: Option<&str>) -> String {
    choose_editor(env::var(EDITOR_VAR).ok(), configured)
}

fn choose_editor(from_env: Option<String>, configured: Option<&str>) -> String {
    from_env
        .filter(|e| !e.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|e| !e.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// Opens a file in the editor and waits for it to close.
///
/// The editor string may carry arguments (`code --wait`); the path is appended
/// last. The editor shares this terminal and there is no timeout.
pub fn open_in_editor<P: AsRef<Path>>(editor: &str, file_path: P) -> Result<()> {
    let path = file_path.as_ref();
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or_else(|| GemlogError::Launch {
        editor: editor.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty editor command"),
    })?;

    debug!(editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|source| GemlogError::Launch {
            editor: editor.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(GemlogError::EditorExit {
            editor: editor.to_string(),
            code: status.code(),
        });
    }
    Ok(())
}
