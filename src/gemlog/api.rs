//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! gemlog operation. It dispatches, supplies "now" where a command needs a
//! date, and returns structured [`CmdResult`]s. It never prints.
//!
//! `GemlogApi<S: PostStore>` is generic over the storage backend:
//! - Production: `GemlogApi<FileStore>`
//! - Testing: `GemlogApi<InMemoryStore>`

use crate::commands;
use crate::config::{BlogPaths, GemlogConfig};
use crate::error::Result;
use crate::store::PostStore;
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;

pub struct GemlogApi<S: PostStore> {
    store: S,
    root: PathBuf,
    config: GemlogConfig,
}

impl<S: PostStore> GemlogApi<S> {
    pub fn new(store: S, root: PathBuf, config: GemlogConfig) -> Self {
        Self {
            store,
            root,
            config,
        }
    }

    pub fn create_post(&mut self, title: &str, draft: bool) -> Result<CmdResult> {
        self.create_post_on(title, draft, today())
    }

    pub fn create_post_on(&mut self, title: &str, draft: bool, date: NaiveDate) -> Result<CmdResult> {
        commands::create::run(&mut self.store, title, draft, date)
    }

    pub fn list_posts(&self, drafts_only: bool) -> Result<CmdResult> {
        commands::list::run(&self.store, drafts_only)
    }

    pub fn delete_post(&mut self, title: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, title)
    }

    /// Path of the post to hand to an editor.
    pub fn edit_post(&self, title: &str) -> Result<CmdResult> {
        commands::edit::run(&self.store, title)
    }

    pub fn push_draft(&mut self, title: &str) -> Result<CmdResult> {
        commands::publish::promote(&mut self.store, title)
    }

    pub fn pop_public(&mut self, title: &str) -> Result<CmdResult> {
        commands::publish::demote(&mut self.store, title)
    }

    pub fn build_site(&self) -> Result<CmdResult> {
        commands::build::run(&self.store, &self.paths(), &self.config.index_title)
    }

    pub fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.root, &self.config)
    }

    pub fn paths(&self) -> BlogPaths {
        BlogPaths::from_config(&self.root, &self.config)
    }

    pub fn config(&self) -> &GemlogConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Creation dates are UTC.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub use crate::commands::{BuildReport, CmdMessage, CmdResult, MessageLevel};
