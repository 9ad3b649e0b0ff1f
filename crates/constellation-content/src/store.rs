//! Loading and persisting portfolio items on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, error, info, warn};

use constellation_core::geometry::Point;

use crate::{
    config::ContentConfig,
    document::{ItemDocument, NewItem},
    error::ContentError,
    slug::slugify,
};

const CONTENT_FILE: &str = "content.json";
const README_FILE: &str = "README.md";

/// A single portfolio item loaded from `<root>/<tag>/<slug>/content.json`.
#[derive(Debug, Clone)]
pub struct ContentItem {
    id: String,
    tag: String,
    slug: String,
    dir: PathBuf,
    position: Point,
    document: ItemDocument,
}

impl ContentItem {
    /// Returns the item id: the document's `id` field, or the slug if absent.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the item directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the item's `content.json`.
    pub fn content_path(&self) -> PathBuf {
        self.dir.join(CONTENT_FILE)
    }

    /// Returns the position currently held in memory.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn document(&self) -> &ItemDocument {
        &self.document
    }

    /// Builds the public URL of an asset stored next to `content.json`.
    pub fn asset_url(&self, file: &str) -> String {
        format!("/content/{}/{}/{}", self.tag, self.slug, file)
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
        self.document.set_position(position);
    }

    fn write(&self) -> Result<(), ContentError> {
        let path = self.content_path();
        let mut json = self.document.to_pretty_json(&path)?;
        json.push('\n');
        fs::write(&path, json).map_err(|err| ContentError::io(&path, err))
    }
}

/// The set of portfolio items under a content root, keyed by id.
///
/// Items keep the order they were discovered in: tags in configured order,
/// then slugs sorted by name. That order is the placement order.
#[derive(Debug)]
pub struct ContentStore {
    config: ContentConfig,
    items: IndexMap<String, ContentItem>,
    skipped: Vec<SkippedItem>,
}

/// An item directory whose `content.json` could not be loaded.
///
/// Skipped items take no part in placement, but [`ContentStore::remove`]
/// can still delete them by slug.
#[derive(Debug)]
pub struct SkippedItem {
    tag: String,
    slug: String,
    dir: PathBuf,
    error: ContentError,
}

impl SkippedItem {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns why the item could not be loaded.
    pub fn error(&self) -> &ContentError {
        &self.error
    }
}

impl ContentStore {
    /// Loads every item below the configured root.
    ///
    /// Missing tag directories and item directories without a
    /// `content.json` are skipped with a warning. Documents that cannot be
    /// read, are not valid JSON or carry a malformed position are logged and
    /// kept aside in [`Self::skipped`].
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be listed or two items share
    /// an id.
    pub fn open(config: ContentConfig) -> Result<Self, ContentError> {
        info!(root:? = config.root(); "Loading content");

        let mut items: IndexMap<String, ContentItem> = IndexMap::new();
        let mut skipped = Vec::new();
        for tag in config.tags() {
            let tag_dir = config.root().join(tag);
            if !tag_dir.is_dir() {
                warn!(path:? = tag_dir; "Tag directory not found");
                continue;
            }

            for slug in item_slugs(&tag_dir)? {
                let dir = tag_dir.join(&slug);
                let path = dir.join(CONTENT_FILE);
                if !path.is_file() {
                    warn!(path:?; "Content file not found");
                    continue;
                }

                let item = match load_item(tag, &slug, dir.clone()) {
                    Ok(item) => item,
                    Err(err) => {
                        error!(path:?, err:err; "Skipping item that failed to load");
                        skipped.push(SkippedItem {
                            tag: tag.clone(),
                            slug,
                            dir,
                            error: err,
                        });
                        continue;
                    }
                };

                if let Some(existing) = items.get(&item.id) {
                    return Err(ContentError::DuplicateId {
                        id: item.id.clone(),
                        first: existing.content_path(),
                        second: item.content_path(),
                    });
                }
                debug!(id = item.id, tag = item.tag; "Loaded item");
                items.insert(item.id.clone(), item);
            }
        }

        info!(count = items.len(), skipped = skipped.len(); "Content loaded");
        Ok(Self {
            config,
            items,
            skipped,
        })
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Returns the item directories that failed to load, in scan order.
    pub fn skipped(&self) -> &[SkippedItem] {
        &self.skipped
    }

    /// Iterates items in placement order.
    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.get(id)
    }

    /// Returns `(id, position)` pairs in placement order.
    pub fn positions(&self) -> Vec<(String, Point)> {
        self.items
            .values()
            .map(|item| (item.id.clone(), item.position))
            .collect()
    }

    /// Changes an item's position in memory without touching the disk.
    pub fn set_position(&mut self, id: &str, position: Point) -> Result<(), ContentError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| ContentError::NotFound(id.to_string()))?;
        item.set_position(position);
        Ok(())
    }

    /// Writes an item's current document back to its `content.json`.
    pub fn save(&self, id: &str) -> Result<(), ContentError> {
        self.items
            .get(id)
            .ok_or_else(|| ContentError::NotFound(id.to_string()))?
            .write()
    }

    /// Sets an item's position and persists it.
    pub fn save_position(&mut self, id: &str, position: Point) -> Result<(), ContentError> {
        self.set_position(id, position)?;
        self.save(id)?;
        debug!(id, x = position.x(), y = position.y(); "Saved position");
        Ok(())
    }

    /// Resets every item's position to the origin and persists it.
    ///
    /// Returns the number of items written.
    pub fn reset_positions(&mut self) -> Result<usize, ContentError> {
        for item in self.items.values_mut() {
            item.set_position(Point::default());
            item.write()?;
        }
        info!(count = self.items.len(); "Positions reset");
        Ok(self.items.len())
    }

    /// Creates a new item directory with a `content.json` and a README.
    ///
    /// # Errors
    ///
    /// Fails if the tag is not configured, the title yields an empty slug,
    /// or the item directory (or id) already exists.
    pub fn create(&mut self, new_item: NewItem) -> Result<&ContentItem, ContentError> {
        if !self.config.has_tag(&new_item.tag) {
            return Err(ContentError::UnknownTag(new_item.tag));
        }

        let slug = slugify(&new_item.title);
        if slug.is_empty() {
            return Err(ContentError::InvalidTitle(new_item.title));
        }

        let dir = self.config.root().join(&new_item.tag).join(&slug);
        if dir.exists() || self.items.contains_key(&slug) {
            return Err(ContentError::AlreadyExists { slug, path: dir });
        }

        fs::create_dir_all(&dir).map_err(|err| ContentError::io(&dir, err))?;

        let item = ContentItem {
            id: slug.clone(),
            tag: new_item.tag.clone(),
            slug: slug.clone(),
            dir,
            position: Point::default(),
            document: new_item.to_document(&slug),
        };
        item.write()?;

        let readme_path = item.dir.join(README_FILE);
        fs::write(&readme_path, new_item.readme(&slug))
            .map_err(|err| ContentError::io(&readme_path, err))?;

        info!(id = slug, tag = item.tag; "Created item");
        let (index, _) = self.items.insert_full(slug, item);
        Ok(&self.items[index])
    }

    /// Deletes an item's directory and forgets it.
    ///
    /// `id` names a loaded item, or the slug of a skipped one so that broken
    /// items can be cleaned up. Returns the removed directory.
    pub fn remove(&mut self, id: &str) -> Result<PathBuf, ContentError> {
        let dir = if let Some(item) = self.items.shift_remove(id) {
            item.dir
        } else if let Some(index) = self.skipped.iter().position(|s| s.slug == id) {
            self.skipped.remove(index).dir
        } else {
            return Err(ContentError::NotFound(id.to_string()));
        };

        fs::remove_dir_all(&dir).map_err(|err| ContentError::io(&dir, err))?;
        info!(id, path:? = dir; "Removed item");
        Ok(dir)
    }
}

/// Lists the sub-directories of a tag directory, sorted by name.
fn item_slugs(tag_dir: &Path) -> Result<Vec<String>, ContentError> {
    let entries = fs::read_dir(tag_dir).map_err(|err| ContentError::io(tag_dir, err))?;

    let mut slugs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ContentError::io(tag_dir, err))?;
        if !entry.path().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            slugs.push(name.to_string());
        } else {
            warn!(path:? = entry.path(); "Skipping non UTF-8 directory name");
        }
    }
    slugs.sort();
    Ok(slugs)
}

fn load_item(tag: &str, slug: &str, dir: PathBuf) -> Result<ContentItem, ContentError> {
    let path = dir.join(CONTENT_FILE);
    let text = fs::read_to_string(&path).map_err(|err| ContentError::io(&path, err))?;
    let document = ItemDocument::parse(&text, &path)?;
    let position = document.position(&path)?;
    let id = document.id().unwrap_or(slug).to_string();

    Ok(ContentItem {
        id,
        tag: tag.to_string(),
        slug: slug.to_string(),
        dir,
        position,
        document,
    })
}
