use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GemlogError {
    #[error("No post found matching \"{query}\" in {scope}")]
    NotFound { query: String, scope: String },

    #[error("\"{query}\" matches multiple posts: {}", join_matches(.matches))]
    Ambiguous { query: String, matches: Vec<String> },

    #[error("Post already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoBare(#[from] std::io::Error),

    #[error("Failed to launch editor '{editor}': {source}")]
    Launch {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor '{editor}' exited with {}", describe_exit(.code))]
    EditorExit { editor: String, code: Option<i32> },

    #[error("Invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Output directory {} overlaps source directory {}", .output.display(), .source_dir.display())]
    OverlappingOutput { output: PathBuf, source_dir: PathBuf },
}

impl GemlogError {
    /// Wraps an I/O error with the path it happened on. Meant for `map_err`.
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| GemlogError::Io { path, source }
    }

    /// Process exit code for this failure kind. Starts at 3; clap uses 2 for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            GemlogError::NotFound { .. } => 3,
            GemlogError::Ambiguous { .. } => 4,
            GemlogError::AlreadyExists { .. } => 5,
            GemlogError::InvalidTitle(_) => 6,
            GemlogError::Io { .. } | GemlogError::IoBare(_) => 7,
            GemlogError::Launch { .. } => 8,
            GemlogError::EditorExit { .. } => 9,
            GemlogError::Config { .. } | GemlogError::OverlappingOutput { .. } => 10,
        }
    }
}

fn join_matches(matches: &[String]) -> String {
    matches.join(", ")
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, GemlogError>;
