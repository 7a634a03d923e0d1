use super::{PostStore, Transition};
use crate::config::BlogPaths;
use crate::error::{GemlogError, Result};
use crate::model::Location;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct FileStore {
    paths: BlogPaths,
    file_ext: String,
}

impl FileStore {
    pub fn new(paths: BlogPaths) -> Self {
        Self {
            paths,
            file_ext: ".gmi".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn paths(&self) -> &BlogPaths {
        &self.paths
    }

    fn dir(&self, location: Location) -> &Path {
        match location {
            Location::Drafts => &self.paths.drafts,
            Location::Published => &self.paths.content,
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            debug!(path = %path.display(), "creating directory");
            fs::create_dir_all(path).map_err(GemlogError::io(path))?;
        }
        Ok(())
    }

    fn not_found(location: Location, filename: &str) -> GemlogError {
        GemlogError::NotFound {
            query: filename.to_string(),
            scope: location.to_string(),
        }
    }
}

impl PostStore for FileStore {
    fn list_filenames(&self, location: Location) -> Result<Vec<String>> {
        let dir = self.dir(location);
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(GemlogError::Io {
                path: dir.to_path_buf(),
                source: e,
            }),
        };

        let mut filenames = Vec::new();
        for entry in entries {
            let entry = entry.map_err(GemlogError::io(dir))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %path.display(), "skipping non UTF-8 filename");
                continue;
            };
            if name.ends_with(&self.file_ext) {
                filenames.push(name);
            }
        }

        filenames.sort();
        Ok(filenames)
    }

    fn read_bytes(&self, location: Location, filename: &str) -> Result<Vec<u8>> {
        let path = self.post_path(location, filename);
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Self::not_found(location, filename),
            _ => GemlogError::Io { path, source: e },
        })
    }

    fn write_new(&mut self, location: Location, filename: &str, content: &str) -> Result<PathBuf> {
        let dir = self.dir(location).to_path_buf();
        self.ensure_dir(&dir)?;

        let path = dir.join(filename);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => GemlogError::AlreadyExists { path: path.clone() },
                _ => GemlogError::Io {
                    path: path.clone(),
                    source: e,
                },
            })?;
        file.write_all(content.as_bytes())
            .map_err(GemlogError::io(&path))?;

        debug!(path = %path.display(), "wrote post");
        Ok(path)
    }

    fn remove(&mut self, location: Location, filename: &str) -> Result<()> {
        let path = self.post_path(location, filename);
        fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Self::not_found(location, filename),
            _ => GemlogError::Io {
                path: path.clone(),
                source: e,
            },
        })?;
        debug!(path = %path.display(), "removed post");
        Ok(())
    }

    fn move_post(&mut self, filename: &str, from: Location, to: Location) -> Result<Transition> {
        let source = self.post_path(from, filename);
        let target = self.post_path(to, filename);

        if !source.is_file() {
            return Err(Self::not_found(from, filename));
        }
        if target.exists() {
            return Err(GemlogError::AlreadyExists { path: target });
        }
        self.ensure_dir(self.dir(to))?;

        match fs::rename(&source, &target) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::CrossesDevices => {
                warn!(
                    source = %source.display(),
                    target = %target.display(),
                    "rename crosses devices, copying instead"
                );
                copy_then_remove(&source, &target)?;
            }
            Err(e) => return Err(GemlogError::Io { path: source, source: e }),
        }

        debug!(source = %source.display(), target = %target.display(), "moved post");
        Ok(Transition {
            filename: filename.to_string(),
            source,
            target,
        })
    }

    fn post_path(&self, location: Location, filename: &str) -> PathBuf {
        self.dir(location).join(filename)
    }

    fn file_ext(&self) -> &str {
        &self.file_ext
    }
}

// The source is only removed once the copy is complete.
fn copy_then_remove(source: &Path, target: &Path) -> Result<()> {
    if let Err(e) = fs::copy(source, target) {
        let _ = fs::remove_file(target);
        return Err(GemlogError::Io {
            path: target.to_path_buf(),
            source: e,
        });
    }
    fs::remove_file(source).map_err(GemlogError::io(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GemlogConfig;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> FileStore {
        FileStore::new(BlogPaths::from_config(temp.path(), &GemlogConfig::default()))
    }

    #[test]
    fn lists_missing_directory_as_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert!(store.list_filenames(Location::Drafts).unwrap().is_empty());
        assert!(store.list_filenames(Location::Published).unwrap().is_empty());
    }

    #[test]
    fn write_creates_directories_on_first_use() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        let path = store
            .write_new(Location::Drafts, "2024-01-10-foo.gmi", "# Foo\n")
            .unwrap();

        assert_eq!(path, temp.path().join("content/drafts/2024-01-10-foo.gmi"));
        assert_eq!(fs::read_to_string(path).unwrap(), "# Foo\n");
    }

    #[test]
    fn write_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store
            .write_new(Location::Published, "2024-01-10-foo.gmi", "# Foo\n")
            .unwrap();

        let err = store
            .write_new(Location::Published, "2024-01-10-foo.gmi", "# Other\n")
            .unwrap_err();
        assert!(matches!(err, GemlogError::AlreadyExists { .. }));
        assert_eq!(
            store.read(Location::Published, "2024-01-10-foo.gmi").unwrap(),
            "# Foo\n"
        );
    }

    #[test]
    fn latin1_post_reads_as_bytes_and_lossy_text() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::create_dir_all(temp.path().join("content")).unwrap();
        fs::write(temp.path().join("content/2024-01-10-cafe.gmi"), b"# Caf\xe9\n").unwrap();

        assert_eq!(
            store.read_bytes(Location::Published, "2024-01-10-cafe.gmi").unwrap(),
            b"# Caf\xe9\n"
        );
        assert_eq!(
            store.read(Location::Published, "2024-01-10-cafe.gmi").unwrap(),
            "# Caf\u{FFFD}\n"
        );
    }

    #[test]
    fn published_listing_skips_drafts_dir_and_foreign_files() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store
            .write_new(Location::Published, "2024-01-02-b.gmi", "# B\n")
            .unwrap();
        store
            .write_new(Location::Published, "2024-01-01-a.gmi", "# A\n")
            .unwrap();
        store
            .write_new(Location::Drafts, "2024-01-03-c.gmi", "# C\n")
            .unwrap();
        fs::write(temp.path().join("content/notes.txt"), "ignored").unwrap();

        assert_eq!(
            store.list_filenames(Location::Published).unwrap(),
            vec!["2024-01-01-a.gmi", "2024-01-02-b.gmi"]
        );
    }

    #[test]
    fn move_keeps_filename_and_content() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store
            .write_new(Location::Drafts, "2024-01-10-foo.gmi", "# Foo\nbody\n")
            .unwrap();

        let moved = store
            .move_post("2024-01-10-foo.gmi", Location::Drafts, Location::Published)
            .unwrap();

        assert_eq!(moved.target, temp.path().join("content/2024-01-10-foo.gmi"));
        assert!(!moved.source.exists());
        assert_eq!(fs::read_to_string(&moved.target).unwrap(), "# Foo\nbody\n");
    }

    #[test]
    fn move_refuses_occupied_target() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store
            .write_new(Location::Drafts, "2024-01-10-foo.gmi", "draft")
            .unwrap();
        store
            .write_new(Location::Published, "2024-01-10-foo.gmi", "published")
            .unwrap();

        let err = store
            .move_post("2024-01-10-foo.gmi", Location::Drafts, Location::Published)
            .unwrap_err();
        assert!(matches!(err, GemlogError::AlreadyExists { .. }));
        assert_eq!(store.read(Location::Drafts, "2024-01-10-foo.gmi").unwrap(), "draft");
    }

    #[test]
    fn move_missing_source_is_not_found() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let err = store
            .move_post("2024-01-10-foo.gmi", Location::Drafts, Location::Published)
            .unwrap_err();
        assert!(matches!(err, GemlogError::NotFound { .. }));
    }

    #[test]
    fn remove_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let err = store.remove(Location::Published, "nope.gmi").unwrap_err();
        assert!(matches!(err, GemlogError::NotFound { .. }));
    }

    #[test]
    fn copy_then_remove_moves_the_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.gmi");
        let target = temp.path().join("b.gmi");
        fs::write(&source, "content").unwrap();

        copy_then_remove(&source, &target).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(target).unwrap(), "content");
    }

    #[test]
    fn failed_copy_keeps_the_source() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.gmi");
        let target = temp.path().join("missing-dir").join("b.gmi");
        fs::write(&source, "content").unwrap();

        let err = copy_then_remove(&source, &target).unwrap_err();
        assert!(matches!(err, GemlogError::Io { .. }));
        assert_eq!(fs::read_to_string(source).unwrap(), "content");
    }
}
