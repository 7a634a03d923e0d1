//! # Site Builder
//!
//! Renders the published set into the output directory: an index document
//! linking every post, plus a verbatim copy of each post next to it.
//!
//! ```text
//! public/
//! ├── index.gmi                  # "# Blog", blank line, "=> {filename} {title}" per post
//! ├── 2024-01-01-a.gmi
//! └── 2024-01-02-b.gmi
//! ```
//!
//! Output is never updated in place. Everything is written to a staging
//! directory beside the output directory first, and the old output is only
//! replaced once staging has fully succeeded. A failed build leaves the
//! previous site as it was. Source posts are only read, and are copied byte
//! for byte. A layout whose output directory overlaps a source directory is
//! refused before anything is touched.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::BlogPaths;
use crate::error::{GemlogError, Result};
use crate::model::{Location, Post};
use crate::store::PostStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const INDEX_STEM: &str = "index";
pub const LINK_MARKER: &str = "=>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub index_path: PathBuf,
    pub posts: Vec<Post>,
}

/// The index document for the given posts, in the order given.
pub fn index_document(index_title: &str, posts: &[Post]) -> String {
    let mut index = format!("# {}\n\n", index_title);
    for post in posts {
        index.push_str(&format!("{} {} {}\n", LINK_MARKER, post.filename, post.title));
    }
    index
}

pub fn run<S: PostStore>(store: &S, paths: &BlogPaths, index_title: &str) -> Result<CmdResult> {
    paths.check_output()?;
    let public_dir = paths.public.as_path();

    let mut sources = Vec::new();
    for filename in store.list_filenames(Location::Published)? {
        let bytes = store.read_bytes(Location::Published, &filename)?;
        let title_source = String::from_utf8_lossy(&bytes).into_owned();
        let post = Post::from_content(filename, Location::Published, &title_source);
        sources.push((post, bytes));
    }
    let posts: Vec<Post> = sources.iter().map(|(post, _)| post.clone()).collect();
    let index_name = format!("{}{}", INDEX_STEM, store.file_ext());

    let staging = staging_dir(public_dir)?;
    clear_dir(&staging)?;
    fs::create_dir_all(&staging).map_err(GemlogError::io(&staging))?;
    debug!(staging = %staging.display(), posts = posts.len(), "staging site");

    let staged = stage(&staging, &index_name, &index_document(index_title, &posts), &sources);
    if let Err(e) = staged {
        let _ = fs::remove_dir_all(&staging);
        return Err(e);
    }

    clear_dir(public_dir)?;
    fs::rename(&staging, public_dir).map_err(GemlogError::io(public_dir))?;
    info!(output = %public_dir.display(), posts = posts.len(), "site built");

    let mut result = CmdResult::default();
    if posts.is_empty() {
        result.add_message(CmdMessage::warning("No published posts; the index is empty"));
    }
    result.add_message(CmdMessage::success(format!(
        "Site built successfully: {} post{}",
        posts.len(),
        if posts.len() == 1 { "" } else { "s" }
    )));

    Ok(result.with_build(BuildReport {
        output_dir: public_dir.to_path_buf(),
        index_path: public_dir.join(index_name),
        posts,
    }))
}

fn stage(staging: &Path, index_name: &str, index: &str, sources: &[(Post, Vec<u8>)]) -> Result<()> {
    let index_path = staging.join(index_name);
    fs::write(&index_path, index).map_err(GemlogError::io(&index_path))?;

    for (post, bytes) in sources {
        let path = staging.join(&post.filename);
        fs::write(&path, bytes).map_err(GemlogError::io(&path))?;
    }
    Ok(())
}

/// `public` → `.public.staging` in the same parent, so the final rename stays on one filesystem.
fn staging_dir(public_dir: &Path) -> Result<PathBuf> {
    let name = public_dir.file_name().ok_or_else(|| GemlogError::Io {
        path: public_dir.to_path_buf(),
        source: std::io::Error::new(ErrorKind::InvalidInput, "output directory has no name"),
    })?;
    let mut staged = std::ffi::OsString::from(".");
    staged.push(name);
    staged.push(".staging");
    Ok(public_dir.with_file_name(staged))
}

fn clear_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(GemlogError::Io {
            path: dir.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GemlogConfig;
    use crate::store::fs::FileStore;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn file_store(temp: &TempDir) -> (FileStore, BlogPaths) {
        let paths = BlogPaths::from_config(temp.path(), &GemlogConfig::default());
        (FileStore::new(paths.clone()), paths)
    }

    #[test]
    fn index_lists_posts_in_order_under_header() {
        let posts = vec![
            Post::from_content("2024-01-01-a.gmi".into(), Location::Published, "# A\n"),
            Post::from_content("2024-01-02-b.gmi".into(), Location::Published, "# B\n"),
        ];
        assert_eq!(
            index_document("Blog", &posts),
            "# Blog\n\n=> 2024-01-01-a.gmi A\n=> 2024-01-02-b.gmi B\n"
        );
    }

    #[test]
    fn builds_index_and_copies_posts() {
        let temp = TempDir::new().unwrap();
        let (mut store, paths) = file_store(&temp);
        store
            .write_new(Location::Published, "2024-01-02-b.gmi", "# B\nsecond\n")
            .unwrap();
        store
            .write_new(Location::Published, "2024-01-01-a.gmi", "# A\nfirst\n")
            .unwrap();

        let result = run(&store, &paths, "Blog").unwrap();

        let index = fs::read_to_string(paths.public.join("index.gmi")).unwrap();
        assert_eq!(index, "# Blog\n\n=> 2024-01-01-a.gmi A\n=> 2024-01-02-b.gmi B\n");
        assert_eq!(
            fs::read_to_string(paths.public.join("2024-01-01-a.gmi")).unwrap(),
            "# A\nfirst\n"
        );
        assert_eq!(
            fs::read_to_string(paths.public.join("2024-01-02-b.gmi")).unwrap(),
            "# B\nsecond\n"
        );
        let report = result.build.unwrap();
        assert_eq!(report.posts.len(), 2);
        assert_eq!(report.index_path, paths.public.join("index.gmi"));
    }

    #[test]
    fn output_matches_published_count_and_skips_drafts() {
        let temp = TempDir::new().unwrap();
        let (mut store, paths) = file_store(&temp);
        for name in ["2024-01-01-a.gmi", "2024-01-02-b.gmi", "2024-01-03-c.gmi"] {
            store
                .write_new(Location::Published, name, "# Post\n")
                .unwrap();
        }
        store
            .write_new(Location::Drafts, "2024-01-04-secret.gmi", "# Secret\n")
            .unwrap();

        run(&store, &paths, "Blog").unwrap();

        let copied: Vec<_> = fs::read_dir(&paths.public)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|name| name != "index.gmi")
            .collect();
        assert_eq!(copied.len(), 3);
        let index = fs::read_to_string(paths.public.join("index.gmi")).unwrap();
        assert_eq!(index.lines().filter(|l| l.starts_with("=> ")).count(), 3);
        assert!(!paths.public.join("2024-01-04-secret.gmi").exists());
    }

    #[test]
    fn stale_output_is_discarded() {
        let temp = TempDir::new().unwrap();
        let (mut store, paths) = file_store(&temp);
        fs::create_dir_all(&paths.public).unwrap();
        fs::write(paths.public.join("2023-12-31-old.gmi"), "# Old\n").unwrap();
        store
            .write_new(Location::Published, "2024-01-01-a.gmi", "# A\n")
            .unwrap();

        run(&store, &paths, "Blog").unwrap();

        assert!(!paths.public.join("2023-12-31-old.gmi").exists());
        assert!(paths.public.join("2024-01-01-a.gmi").exists());
        assert!(!staging_dir(&paths.public).unwrap().exists());
    }

    #[test]
    fn sources_are_untouched() {
        let temp = TempDir::new().unwrap();
        let (mut store, paths) = file_store(&temp);
        store
            .write_new(Location::Published, "2024-01-01-a.gmi", "# A\n")
            .unwrap();

        run(&store, &paths, "Blog").unwrap();

        assert_eq!(
            store.list_filenames(Location::Published).unwrap(),
            vec!["2024-01-01-a.gmi"]
        );
        assert_eq!(store.read(Location::Published, "2024-01-01-a.gmi").unwrap(), "# A\n");
    }

    #[test]
    fn empty_published_set_builds_header_only_index() {
        let temp = TempDir::new().unwrap();
        let (store, paths) = file_store(&temp);

        let result = run(&store, &paths, "Phlog").unwrap();

        assert_eq!(
            fs::read_to_string(paths.public.join("index.gmi")).unwrap(),
            "# Phlog\n\n"
        );
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == crate::commands::MessageLevel::Warning));
    }

    #[test]
    fn failed_staging_keeps_previous_output() {
        let temp = TempDir::new().unwrap();
        let paths = BlogPaths::from_config(temp.path(), &GemlogConfig::default());
        let public = paths.public.clone();
        fs::create_dir_all(&public).unwrap();
        fs::write(public.join("index.gmi"), "previous").unwrap();

        // A post whose filename points into a missing subdirectory cannot be staged.
        let mut store = InMemoryStore::new();
        store
            .write_new(Location::Published, "missing/2024-01-01-a.gmi", "# A\n")
            .unwrap();

        let err = run(&store, &paths, "Blog").unwrap_err();
        assert!(matches!(err, GemlogError::Io { .. }));
        assert_eq!(fs::read_to_string(public.join("index.gmi")).unwrap(), "previous");
        assert!(!staging_dir(&public).unwrap().exists());
    }

    #[test]
    fn non_utf8_post_is_copied_verbatim() {
        let temp = TempDir::new().unwrap();
        let (mut store, paths) = file_store(&temp);
        store
            .write_new(Location::Published, "2024-01-01-a.gmi", "# A\n")
            .unwrap();
        fs::write(paths.content.join("2024-01-02-cafe.gmi"), b"# Caf\xe9\nbody\n").unwrap();

        let report = run(&store, &paths, "Blog").unwrap().build.unwrap();

        assert_eq!(
            fs::read(paths.public.join("2024-01-02-cafe.gmi")).unwrap(),
            b"# Caf\xe9\nbody\n"
        );
        assert_eq!(report.posts[1].title, "Caf\u{FFFD}");
        let index = fs::read_to_string(paths.public.join("index.gmi")).unwrap();
        assert!(index.contains("=> 2024-01-02-cafe.gmi Caf\u{FFFD}\n"));
    }

    fn layout(temp: &TempDir, public_dir: &str) -> BlogPaths {
        let config = GemlogConfig {
            public_dir: public_dir.into(),
            ..GemlogConfig::default()
        };
        BlogPaths::from_config(temp.path(), &config)
    }

    #[test]
    fn output_over_content_leaves_sources_alone() {
        let temp = TempDir::new().unwrap();
        let paths = layout(&temp, "content");
        let mut store = FileStore::new(paths.clone());
        store
            .write_new(Location::Published, "2024-01-01-a.gmi", "# A\n")
            .unwrap();
        store
            .write_new(Location::Drafts, "2024-01-02-b.gmi", "# B\n")
            .unwrap();

        let err = run(&store, &paths, "Blog").unwrap_err();

        assert!(matches!(err, GemlogError::OverlappingOutput { .. }));
        assert!(paths.drafts.join("2024-01-02-b.gmi").is_file());
        assert!(paths.content.join("2024-01-01-a.gmi").is_file());
        assert!(!paths.content.join("index.gmi").exists());
    }

    #[test]
    fn output_at_root_or_inside_drafts_is_refused() {
        let temp = TempDir::new().unwrap();
        for public_dir in [".", "content/drafts", "content/drafts/site"] {
            let paths = layout(&temp, public_dir);
            let mut store = FileStore::new(paths.clone());
            let _ = store.write_new(Location::Drafts, "2024-01-02-b.gmi", "# B\n");

            let err = run(&store, &paths, "Blog").unwrap_err();
            assert!(matches!(err, GemlogError::OverlappingOutput { .. }), "{public_dir}");
            assert!(paths.drafts.join("2024-01-02-b.gmi").is_file(), "{public_dir}");
        }
    }

    #[test]
    fn staging_dir_is_a_hidden_sibling() {
        assert_eq!(
            staging_dir(Path::new("/blog/public")).unwrap(),
            Path::new("/blog/.public.staging")
        );
    }
}
