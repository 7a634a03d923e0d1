use super::{PostStore, Transition};
use crate::error::{GemlogError, Result};
use crate::model::Location;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Keeps posts in sorted maps, one per location. Paths are virtual.
pub struct InMemoryStore {
    drafts: BTreeMap<String, Vec<u8>>,
    published: BTreeMap<String, Vec<u8>>,
    file_ext: String,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            drafts: BTreeMap::new(),
            published: BTreeMap::new(),
            file_ext: ".gmi".to_string(),
        }
    }

    fn posts(&self, location: Location) -> &BTreeMap<String, Vec<u8>> {
        match location {
            Location::Drafts => &self.drafts,
            Location::Published => &self.published,
        }
    }

    fn posts_mut(&mut self, location: Location) -> &mut BTreeMap<String, Vec<u8>> {
        match location {
            Location::Drafts => &mut self.drafts,
            Location::Published => &mut self.published,
        }
    }

    fn not_found(location: Location, filename: &str) -> GemlogError {
        GemlogError::NotFound {
            query: filename.to_string(),
            scope: location.to_string(),
        }
    }
}

impl PostStore for InMemoryStore {
    fn list_filenames(&self, location: Location) -> Result<Vec<String>> {
        Ok(self
            .posts(location)
            .keys()
            .filter(|name| name.ends_with(&self.file_ext))
            .cloned()
            .collect())
    }

    fn read_bytes(&self, location: Location, filename: &str) -> Result<Vec<u8>> {
        self.posts(location)
            .get(filename)
            .cloned()
            .ok_or_else(|| Self::not_found(location, filename))
    }

    fn write_new(&mut self, location: Location, filename: &str, content: &str) -> Result<PathBuf> {
        let path = self.post_path(location, filename);
        let posts = self.posts_mut(location);
        if posts.contains_key(filename) {
            return Err(GemlogError::AlreadyExists { path });
        }
        posts.insert(filename.to_string(), content.as_bytes().to_vec());
        Ok(path)
    }

    fn remove(&mut self, location: Location, filename: &str) -> Result<()> {
        self.posts_mut(location)
            .remove(filename)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(location, filename))
    }

    fn move_post(&mut self, filename: &str, from: Location, to: Location) -> Result<Transition> {
        let source = self.post_path(from, filename);
        let target = self.post_path(to, filename);
        if !self.posts(from).contains_key(filename) {
            return Err(Self::not_found(from, filename));
        }
        if self.posts(to).contains_key(filename) {
            return Err(GemlogError::AlreadyExists { path: target });
        }

        let content = self.posts_mut(from).remove(filename).unwrap_or_default();
        self.posts_mut(to).insert(filename.to_string(), content);
        Ok(Transition {
            filename: filename.to_string(),
            source,
            target,
        })
    }

    fn post_path(&self, location: Location, filename: &str) -> PathBuf {
        PathBuf::from("/mem").join(location.as_str()).join(filename)
    }

    fn file_ext(&self) -> &str {
        &self.file_ext
    }
}
