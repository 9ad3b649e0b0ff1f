//! Content directory configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_ROOT: &str = "public/content";

const DEFAULT_TAGS: [&str; 6] = [
    "exploration",
    "experience",
    "digital",
    "motion",
    "storytelling",
    "brand",
];

/// Where the content store lives and which tag directories it scans.
///
/// Tags are scanned in the listed order, which also fixes the order items
/// are handed to the placement engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Root directory holding one sub-directory per tag.
    root: PathBuf,

    /// Tag directory names, in scan order.
    tags: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            tags: DEFAULT_TAGS.iter().map(|tag| tag.to_string()).collect(),
        }
    }
}

impl ContentConfig {
    /// Creates a new [`ContentConfig`] with the given root and tags.
    pub fn new(root: impl Into<PathBuf>, tags: Vec<String>) -> Self {
        Self {
            root: root.into(),
            tags,
        }
    }

    /// Returns a copy of this configuration rooted at `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Returns the content root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the tag directory names in scan order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns `true` if `tag` is one of the configured tags.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|known| known == tag)
    }
}
