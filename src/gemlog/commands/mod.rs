use crate::model::Post;
use crate::store::Transition;
use std::path::PathBuf;

pub mod build;
pub mod create;
pub mod delete;
pub mod edit;
pub mod helpers;
pub mod init;
pub mod list;
pub mod publish;

pub use build::BuildReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_posts: Vec<Post>,
    pub post_paths: Vec<PathBuf>,
    pub transitions: Vec<Transition>,
    pub build: Option<BuildReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_posts(mut self, posts: Vec<Post>) -> Self {
        self.listed_posts = posts;
        self
    }

    pub fn with_post_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.post_paths = paths;
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn with_build(mut self, report: BuildReport) -> Self {
        self.build = Some(report);
        self
    }
}
