//! Error types for Constellation operations.
//!
//! This module provides the main error type [`ConstellationError`] which
//! wraps the error conditions that can occur while loading content, placing
//! items and exporting results. Exhausted placement searches are not errors:
//! they produce a degenerate placement and a warning instead.

use std::io;

use thiserror::Error;

use constellation_content::ContentError;

/// The main error type for Constellation operations.
#[derive(Debug, Error)]
pub enum ConstellationError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for ConstellationError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
