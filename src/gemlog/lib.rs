//! # Gemlog Architecture
//!
//! Gemlog manages a small Gemtext blog kept as plain files: posts are written
//! as drafts, promoted to the published set, and the published set is rendered
//! into a flat output site. There is no database and no server; every command
//! runs to completion and exits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, launches the editor    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - create, list, delete, edit, publish, build, init         │
//! │  - Title resolution (commands/helpers.rs)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - PostStore trait                                          │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Post identity
//!
//! A post is named `YYYY-MM-DD-{slug}.gmi` when created and keeps that name
//! for life. Users refer to posts by title; the title is slugified
//! ([`slug::slugify`]) and matched against filenames. A title that matches
//! more than one post is an error, never a guess.
//!
//! ## Directory layout
//!
//! ```text
//! content/          published posts
//! content/drafts/   drafts
//! public/           rendered site, regenerated by every build
//! gemlog.json       optional configuration
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Posts, locations, filenames and the post skeleton
//! - [`slug`]: Title → slug
//! - [`config`]: `gemlog.json` and the resolved directory layout
//! - [`editor`]: External editor integration
//! - [`error`]: Error types and exit codes

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod slug;
pub mod store;
