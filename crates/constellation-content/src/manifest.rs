//! The generated portfolio manifest read by the site.

use std::{fs, path::Path};

use serde::Serialize;
use serde_json::{Map, Value, json};

use constellation_core::geometry::{Bounds, Point};

use crate::{document::position_value, error::ContentError, store::ContentItem};

/// Document fields that name files inside the item directory.
const ASSET_FIELDS: [&str; 2] = ["thumbnailUrl", "imageUrl"];

/// All items with their final positions plus the canvas extent.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    items: Vec<Map<String, Value>>,
    canvas_bounds: Bounds,
}

impl Manifest {
    pub fn new(canvas_bounds: Bounds) -> Self {
        Self {
            items: Vec::new(),
            canvas_bounds,
        }
    }

    /// Appends an item at `position`.
    ///
    /// The entry is the item's document with `id` and `tag` filled in,
    /// asset file names expanded to public URLs, and `position` replaced.
    pub fn push(&mut self, item: &ContentItem, position: Point) {
        let mut entry = item.document().clone().into_inner();

        entry.insert("id".to_string(), json!(item.id()));
        entry.insert("tag".to_string(), json!(item.tag()));
        for field in ASSET_FIELDS {
            let url = entry
                .get(field)
                .and_then(Value::as_str)
                .map(|file| item.asset_url(file));
            if let Some(url) = url {
                entry.insert(field.to_string(), json!(url));
            }
        }
        entry.insert("position".to_string(), position_value(position));

        self.items.push(entry);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn canvas_bounds(&self) -> Bounds {
        self.canvas_bounds
    }

    /// Serializes the manifest as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the manifest to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), ContentError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| ContentError::io(parent, err))?;
        }
        let mut json = self.to_json().map_err(|err| ContentError::json(path, err))?;
        json.push('\n');
        fs::write(path, json).map_err(|err| ContentError::io(path, err))
    }
}
