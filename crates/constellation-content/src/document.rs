//! The `content.json` document of a single portfolio item.
//!
//! Documents are kept as ordered JSON objects so that fields this crate does
//! not know about (descriptions, media galleries, custom metadata) survive a
//! load/save cycle untouched and in their original order.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use constellation_core::geometry::Point;

use crate::error::ContentError;

/// Thumbnail file name written for newly created items.
pub(crate) const DEFAULT_THUMBNAIL: &str = "thumbnail.jpg";

/// A parsed `content.json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemDocument(Map<String, Value>);

impl ItemDocument {
    /// Parses a document from JSON text.
    ///
    /// The top-level value must be an object.
    pub(crate) fn parse(text: &str, path: &Path) -> Result<Self, ContentError> {
        serde_json::from_str(text).map_err(|err| ContentError::json(path, err))
    }

    /// Serializes the document as pretty JSON with two-space indentation.
    pub(crate) fn to_pretty_json(&self, path: &Path) -> Result<String, ContentError> {
        serde_json::to_string_pretty(&self.0).map_err(|err| ContentError::json(path, err))
    }

    /// Returns the explicit `id` field, if any.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Returns the `title` field, if any.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Reads the `position` field.
    ///
    /// A missing or `null` position reads as the origin, which is what
    /// freshly created and reset items carry.
    pub fn position(&self, path: &Path) -> Result<Point, ContentError> {
        let Some(value) = self.0.get("position") else {
            return Ok(Point::default());
        };
        if value.is_null() {
            return Ok(Point::default());
        }

        let x = value.get("x").and_then(Value::as_f64);
        let y = value.get("y").and_then(Value::as_f64);
        match (x, y) {
            (Some(x), Some(y)) => Ok(Point::new(x as f32, y as f32)),
            _ => Err(ContentError::InvalidPosition {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Overwrites the `position` field, keeping its place in the key order.
    pub fn set_position(&mut self, position: Point) {
        self.0.insert("position".to_string(), position_value(position));
    }

    /// Returns the raw JSON value of a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets a raw JSON field.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Consumes the document, returning the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Encodes a position, writing whole coordinates as integers.
pub(crate) fn position_value(position: Point) -> Value {
    json!({
        "x": coordinate_value(position.x()),
        "y": coordinate_value(position.y()),
    })
}

fn coordinate_value(value: f32) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f32 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

/// Lifecycle status of a portfolio item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Completed,
    InProgress,
    Concept,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Completed => write!(f, "completed"),
            Status::InProgress => write!(f, "in-progress"),
            Status::Concept => write!(f, "concept"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Status::Completed),
            "in-progress" => Ok(Status::InProgress),
            "concept" => Ok(Status::Concept),
            other => Err(format!(
                "unknown status `{other}` (expected completed, in-progress or concept)"
            )),
        }
    }
}

/// An external link shown in an item's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl FromStr for Link {
    type Err = String;

    /// Parses `label=url`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, url) = s
            .split_once('=')
            .ok_or_else(|| format!("invalid link `{s}` (expected label=url)"))?;
        let (label, url) = (label.trim(), url.trim());
        if label.is_empty() || url.is_empty() {
            return Err(format!("invalid link `{s}` (label and url must be non-empty)"));
        }
        Ok(Link {
            label: label.to_string(),
            url: url.to_string(),
        })
    }
}

/// Fields for a newly authored item.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub tag: String,
    pub date: Option<String>,
    pub technologies: Vec<String>,
    pub status: Option<Status>,
    pub links: Vec<Link>,
}

impl NewItem {
    /// Builds the initial `content.json` document for this item.
    ///
    /// The position starts at the origin; the next repair or regeneration
    /// pass assigns a real one.
    pub(crate) fn to_document(&self, slug: &str) -> ItemDocument {
        let mut doc = Map::new();
        doc.insert("id".to_string(), json!(slug));
        doc.insert("title".to_string(), json!(self.title));
        doc.insert("description".to_string(), json!(self.description));
        if let Some(short) = self.short_description.as_deref().filter(|s| !s.is_empty()) {
            doc.insert("shortDescription".to_string(), json!(short));
        }
        doc.insert("thumbnailUrl".to_string(), json!(DEFAULT_THUMBNAIL));
        doc.insert("position".to_string(), position_value(Point::default()));

        let mut metadata = Map::new();
        if let Some(date) = self.date.as_deref().filter(|d| !d.is_empty()) {
            metadata.insert("date".to_string(), json!(date));
        }
        let technologies: Vec<&str> = self
            .technologies
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if !technologies.is_empty() {
            metadata.insert("technologies".to_string(), json!(technologies));
        }
        if let Some(status) = self.status {
            metadata.insert("status".to_string(), json!(status));
        }
        doc.insert("metadata".to_string(), Value::Object(metadata));

        if !self.links.is_empty() {
            doc.insert("links".to_string(), json!(self.links));
        }

        ItemDocument(doc)
    }

    /// Renders the placeholder README written next to `content.json`.
    pub(crate) fn readme(&self, slug: &str) -> String {
        format!(
            "# {title}\n\n{description}\n\n## Assets Needed\n\n\
             - `{DEFAULT_THUMBNAIL}` - Main thumbnail image (recommended: 384x256px)\n\n\
             ## Notes\n\n\
             - Auto-generated slug: {slug}\n\
             - Position will be assigned automatically to avoid collisions\n\
             - Edit `content.json` to update item properties\n",
            title = self.title,
            description = self.description,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn path() -> PathBuf {
        PathBuf::from("content.json")
    }

    #[test]
    fn test_position_roundtrip_keeps_key_order() {
        let text = r#"{"id":"a","title":"A","position":{"x":1,"y":2},"metadata":{"date":"2024"}}"#;
        let mut doc = ItemDocument::parse(text, &path()).unwrap();

        assert_eq!(doc.position(&path()).unwrap(), Point::new(1.0, 2.0));

        doc.set_position(Point::new(-664.0, 608.0));
        let keys: Vec<&String> = doc.0.keys().collect();
        assert_eq!(keys, ["id", "title", "position", "metadata"]);
        assert_eq!(doc.get("position"), Some(&json!({"x": -664, "y": 608})));
    }

    #[test]
    fn test_missing_position_reads_as_origin() {
        let doc = ItemDocument::parse(r#"{"title":"A"}"#, &path()).unwrap();
        assert_eq!(doc.position(&path()).unwrap(), Point::default());

        let doc = ItemDocument::parse(r#"{"position":null}"#, &path()).unwrap();
        assert_eq!(doc.position(&path()).unwrap(), Point::default());
    }

    #[test]
    fn test_invalid_position() {
        let doc = ItemDocument::parse(r#"{"position":{"x":"left"}}"#, &path()).unwrap();

        assert!(matches!(
            doc.position(&path()),
            Err(ContentError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let result = ItemDocument::parse("[1, 2, 3]", &path());
        assert!(matches!(result, Err(ContentError::Json { .. })));
    }

    #[test]
    fn test_fractional_coordinates_are_kept() {
        let mut doc = ItemDocument::default();
        doc.set_position(Point::new(1.5, -2.0));

        assert_eq!(doc.get("position"), Some(&json!({"x": 1.5, "y": -2})));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!(Status::Concept.to_string(), "concept");
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn test_link_parse() {
        let link: Link = "GitHub=https://github.com/example".parse().unwrap();
        assert_eq!(link.label, "GitHub");
        assert_eq!(link.url, "https://github.com/example");

        assert!("no-separator".parse::<Link>().is_err());
        assert!("=https://example.com".parse::<Link>().is_err());
    }

    #[test]
    fn test_new_item_document() {
        let item = NewItem {
            title: "Sound Garden".to_string(),
            description: "Generative audio".to_string(),
            tag: "motion".to_string(),
            technologies: vec!["WebAudio".to_string(), " ".to_string()],
            status: Some(Status::InProgress),
            ..Default::default()
        };

        let doc = item.to_document("sound-garden");
        assert_eq!(doc.id(), Some("sound-garden"));
        assert_eq!(doc.title(), Some("Sound Garden"));
        assert_eq!(doc.get("thumbnailUrl"), Some(&json!("thumbnail.jpg")));
        assert_eq!(doc.position(&path()).unwrap(), Point::default());
        assert_eq!(
            doc.get("metadata"),
            Some(&json!({"technologies": ["WebAudio"], "status": "in-progress"}))
        );
        assert!(doc.get("links").is_none());
        assert!(doc.get("shortDescription").is_none());
    }
}
