//! Error types for content store operations.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while reading or writing portfolio content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("I/O error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid position in {path}: expected an object with numeric `x` and `y`")]
    InvalidPosition { path: PathBuf },

    #[error("Unknown tag `{0}`")]
    UnknownTag(String),

    #[error("Duplicate item id `{id}` in {first} and {second}")]
    DuplicateId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Item `{0}` not found")]
    NotFound(String),

    #[error("Item `{slug}` already exists at {path}")]
    AlreadyExists { slug: String, path: PathBuf },

    #[error("Cannot derive a slug from title `{0}`")]
    InvalidTitle(String),
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
