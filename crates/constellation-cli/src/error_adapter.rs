//! Error adapter for converting ConstellationError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Source Snippets
//!
//! When a `content.json` file fails to parse, the offending file is read back
//! and the error is rendered with a labelled snippet at the reported line and
//! column. Every other error is rendered as a plain diagnostic with a stable
//! code and, where useful, a hint.

use std::{fmt, fs, path::Path};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use constellation::{
    ConstellationError,
    content::{ContentError, SkippedItem},
};

/// Adapter for a JSON syntax error inside a content file.
pub struct JsonAdapter<'a> {
    err: &'a serde_json::Error,
    src: NamedSource<String>,
    span: SourceSpan,
}

impl<'a> JsonAdapter<'a> {
    /// Create an adapter if the content file can be read back.
    pub fn new(err: &'a serde_json::Error, path: &Path) -> Option<Self> {
        let text = fs::read_to_string(path).ok()?;
        let offset = line_column_offset(&text, err.line(), err.column());
        Some(Self {
            err,
            src: NamedSource::new(path.display().to_string(), text),
            span: SourceSpan::new(offset.into(), 0),
        })
    }
}

impl fmt::Debug for JsonAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonAdapter")
            .field("err", &self.err)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for JsonAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid JSON in content file")
    }
}

impl std::error::Error for JsonAdapter<'_> {}

impl MietteDiagnostic for JsonAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("constellation::content::json"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(Some(self.err.to_string()), self.span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`ConstellationError`] variants without source snippets.
pub struct ErrorAdapter<'a>(pub &'a ConstellationError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ConstellationError::Io(_) => "constellation::io",
            ConstellationError::Content(_) => "constellation::content",
            ConstellationError::Config(_) => "constellation::config",
            ConstellationError::Export(_) => "constellation::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ConstellationError::Content(ContentError::DuplicateId { .. }) => {
                "Give one of the items a distinct `id` in its content.json"
            }
            ConstellationError::Content(ContentError::UnknownTag(_)) => {
                "Use one of the tags listed under [content] in the configuration"
            }
            ConstellationError::Content(ContentError::InvalidPosition { .. }) => {
                "Positions look like {\"x\": 900, \"y\": 0}; fix or delete the `position` field"
            }
            ConstellationError::Config(_) => {
                "Check the [placement], [canvas] and [content] sections of the configuration file"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A JSON syntax error with a snippet of the offending file.
    Json(JsonAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Json(j) => fmt::Display::fmt(j, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Json(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Json(j) => j.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Json(j) => j.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Json(j) => j.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Json(j) => j.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`ConstellationError`] into a reportable error.
///
/// JSON syntax errors become snippet diagnostics when the file can still be
/// read; everything else is wrapped in an [`ErrorAdapter`].
pub fn to_reportable(err: &ConstellationError) -> Reportable<'_> {
    let snippet = match err {
        ConstellationError::Content(content) => json_snippet(content),
        _ => None,
    };
    match snippet {
        Some(adapter) => Reportable::Json(adapter),
        None => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Builds a snippet diagnostic for a JSON syntax error in a readable file.
pub fn json_snippet(err: &ContentError) -> Option<JsonAdapter<'_>> {
    match err {
        ContentError::Json { path, source } if source.line() > 0 => JsonAdapter::new(source, path),
        _ => None,
    }
}

/// Renders why a content item was skipped while loading the store.
///
/// JSON syntax errors are drawn with a snippet of the file; other errors
/// fall back to their message.
pub fn render_skipped(item: &SkippedItem) -> String {
    let Some(adapter) = json_snippet(item.error()) else {
        return item.error().to_string();
    };

    let mut writer = String::new();
    match miette::GraphicalReportHandler::new().render_report(&mut writer, &adapter) {
        Ok(()) => writer,
        Err(_) => item.error().to_string(),
    }
}

/// Byte offset of a 1-based line and column, clamped to the text length.
fn line_column_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}
