pub mod svg;

use std::io;

use thiserror::Error;

use crate::placement::Layout;

/// Writes a layout to some output format.
pub trait Exporter {
    fn export_layout(&self, layout: &Layout) -> Result<(), Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
