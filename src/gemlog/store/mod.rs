//! # Storage Layer
//!
//! Posts are plain files in two locations, drafts and published. The
//! [`PostStore`] trait is the only way commands touch them, so the same command
//! code runs against the filesystem and against memory in tests.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage over [`crate::config::BlogPaths`]
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!
//! ## Storage Format
//!
//! ```text
//! content/
//! ├── 2024-01-15-hello-world.gmi   # published
//! └── drafts/
//!     └── 2024-01-20-next-post.gmi # draft
//! ```
//!
//! The filename is the key. A filename is present in at most one location;
//! [`PostStore::write_new`] and [`PostStore::move_post`] refuse to create a
//! second copy.

use crate::error::Result;
use crate::model::Location;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Outcome of moving a post between locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub filename: String,
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Abstract interface for post storage.
pub trait PostStore {
    /// Post-format filenames in a location, sorted. A missing location is empty.
    fn list_filenames(&self, location: Location) -> Result<Vec<String>>;

    /// Contents of a post, byte for byte
    fn read_bytes(&self, location: Location, filename: &str) -> Result<Vec<u8>>;

    /// Contents of a post as text. Invalid UTF-8 becomes U+FFFD.
    fn read(&self, location: Location, filename: &str) -> Result<String> {
        let bytes = self.read_bytes(location, filename)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Create a post. Fails if the file already exists.
    fn write_new(&mut self, location: Location, filename: &str, content: &str) -> Result<PathBuf>;

    /// Delete a post permanently
    fn remove(&mut self, location: Location, filename: &str) -> Result<()>;

    /// Move a post to the other location under the same filename
    fn move_post(&mut self, filename: &str, from: Location, to: Location) -> Result<Transition>;

    /// Path of a post (virtual for in-memory stores)
    fn post_path(&self, location: Location, filename: &str) -> PathBuf;

    fn file_ext(&self) -> &str;

    fn contains(&self, location: Location, filename: &str) -> Result<bool> {
        Ok(self
            .list_filenames(location)?
            .iter()
            .any(|f| f == filename))
    }
}
