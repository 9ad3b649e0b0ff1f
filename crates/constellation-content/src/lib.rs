//! File-backed content store for Constellation.
//!
//! Portfolio items live on disk as one directory per item, grouped by tag:
//!
//! ```text
//! <root>/
//!   <tag>/
//!     <slug>/
//!       content.json
//!       thumbnail.jpg
//!       README.md
//! ```
//!
//! The placement engine only cares about an item's id and position; this
//! crate owns everything else: loading and saving `content.json` documents
//! without losing unknown fields, creating and removing item directories,
//! and writing the generated manifest consumed by the site.
//!
//! # Example
//!
//! ```no_run
//! use constellation_content::{ContentConfig, ContentStore};
//!
//! let store = ContentStore::open(ContentConfig::default()).expect("Failed to load content");
//! for item in store.items() {
//!     println!("{} at {:?}", item.id(), item.position());
//! }
//! ```

mod config;
mod document;
mod error;
mod manifest;
mod slug;
mod store;

pub use config::ContentConfig;
pub use document::{ItemDocument, Link, NewItem, Status};
pub use error::ContentError;
pub use manifest::Manifest;
pub use slug::slugify;
pub use store::{ContentItem, ContentStore, SkippedItem};
