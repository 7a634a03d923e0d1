use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "gemlog", bin_name = "gemlog", version = get_version())]
#[command(about = "A simple command-line CMS for Gemtext blogs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Blog root containing content/ and public/ (defaults to the current directory)
    #[arg(long, global = true, env = "GEMLOG_ROOT")]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create a new blog post
    New {
        /// Title of the post
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Save as draft
        #[arg(short, long)]
        draft: bool,
    },

    /// List blog posts
    #[command(alias = "ls")]
    List {
        /// Show drafts only
        #[arg(short, long)]
        drafts: bool,
    },

    /// Delete a blog post
    #[command(alias = "rm")]
    Delete {
        /// Title of the post
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Open a blog post in $EDITOR
    #[command(alias = "e")]
    Edit {
        /// Title of the post
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Publish a draft
    PushDraft {
        /// Title of the draft
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Move a published post back to drafts
    PopPublic {
        /// Title of the published post
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Build the static Gemtext site
    Build,

    /// Print the file path of a blog post
    Path {
        /// Title of the post
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Create the blog directories and a default gemlog.json
    Init,
}

/// Title words arrive as separate args when unquoted.
pub fn join_title(words: &[String]) -> String {
    words.join(" ")
}
