use crate::error::{GemlogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const CONFIG_FILENAME: &str = "gemlog.json";
const DEFAULT_FILE_EXT: &str = ".gmi";
const DEFAULT_INDEX_TITLE: &str = "Blog";

/// Blog configuration, read from `gemlog.json` in the blog root.
/// Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GemlogConfig {
    /// Published posts, relative to the root
    pub content_dir: PathBuf,

    /// Draft posts, relative to the root
    pub drafts_dir: PathBuf,

    /// Rendered site, relative to the root
    pub public_dir: PathBuf,

    /// Extension for posts and the index (e.g. ".gmi")
    pub file_ext: String,

    /// Heading of the generated index
    pub index_title: String,

    /// Editor used when $EDITOR is not set
    pub editor: Option<String>,
}

impl Default for GemlogConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            drafts_dir: Path::new("content").join("drafts"),
            public_dir: PathBuf::from("public"),
            file_ext: DEFAULT_FILE_EXT.to_string(),
            index_title: DEFAULT_INDEX_TITLE.to_string(),
            editor: None,
        }
    }
}

impl GemlogConfig {
    /// Load config from the given root, or return defaults if not found
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(GemlogError::io(&config_path))?;
        let mut config: GemlogConfig =
            serde_json::from_str(&content).map_err(|source| GemlogError::Config {
                path: config_path.clone(),
                source,
            })?;
        let ext = config.file_ext.clone();
        config.set_file_ext(&ext);
        Ok(config)
    }

    /// Save config to the given root
    pub fn save<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(|source| GemlogError::Config {
            path: config_path.clone(),
            source,
        })?;
        fs::write(&config_path, content).map_err(GemlogError::io(&config_path))?;
        Ok(())
    }

    pub fn get_file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }
}

/// The three managed directories, resolved against a blog root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPaths {
    pub content: PathBuf,
    pub drafts: PathBuf,
    pub public: PathBuf,
}

impl BlogPaths {
    pub fn from_config(root: &Path, config: &GemlogConfig) -> Self {
        Self {
            content: root.join(&config.content_dir),
            drafts: root.join(&config.drafts_dir),
            public: root.join(&config.public_dir),
        }
    }

    /// The build replaces `public` wholesale, so it must not be, contain, or
    /// sit inside either source directory.
    pub fn check_output(&self) -> Result<()> {
        let public = normalize(&self.public);
        for source_dir in [&self.content, &self.drafts] {
            let source = normalize(source_dir);
            if public.starts_with(&source) || source.starts_with(&public) {
                return Err(GemlogError::OverlappingOutput {
                    output: self.public.clone(),
                    source_dir: source_dir.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Lexical cleanup: drops `.` and folds `..` into its parent.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                let pops = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if pops {
                    out.pop();
                } else if !at_root {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
