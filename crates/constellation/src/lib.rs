//! Constellation - collision-avoiding spiral placement for infinite canvases.
//!
//! Portfolio thumbnails are scattered around a protected central heading on
//! a golden-angle spiral. The engine guarantees that no two thumbnails (plus
//! spacing) overlap and that none reaches into the protected zone, retrying
//! and falling back to outer rings when a candidate collides.
//!
//! The [`Constellation`] builder ties the engine to a content directory:
//! it loads items, regenerates or repairs their positions, writes the site
//! manifest and renders SVG previews. The engine itself lives in
//! [`placement`] and works on plain ids and points.

pub mod config;
pub mod placement;

mod error;
mod export;

pub use constellation_content as content;
pub use constellation_core::geometry;

pub use error::ConstellationError;
pub use export::{Error as ExportError, Exporter};

use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use rand::Rng;

use constellation_content::{ContentStore, Manifest};

use config::AppConfig;
use export::svg::Svg;
use placement::{CheckReport, Item, Layout, RepairReport};

/// Builder for placing portfolio items and exporting the result.
///
/// # Examples
///
/// ```rust,no_run
/// use constellation::{Constellation, config::AppConfig};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let constellation = Constellation::new(AppConfig::default());
/// let store = constellation.load().expect("Failed to load content");
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let layout = constellation.regenerate(&store, &mut rng);
///
/// constellation
///     .write_manifest(&store, &layout, "portfolio.json")
///     .expect("Failed to write manifest");
/// println!("{}", constellation.render_svg(&layout));
/// ```
#[derive(Debug, Default)]
pub struct Constellation {
    config: AppConfig,
}

impl Constellation {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load the content store from the configured root.
    ///
    /// # Errors
    ///
    /// Returns `ConstellationError::Content` if the content directory cannot
    /// be read or contains invalid documents.
    pub fn load(&self) -> Result<ContentStore, ConstellationError> {
        Ok(ContentStore::open(self.config.content().clone())?)
    }

    /// Load the content store from `root`, keeping the configured tags.
    pub fn load_from(&self, root: impl Into<PathBuf>) -> Result<ContentStore, ConstellationError> {
        Ok(ContentStore::open(
            self.config.content().clone().with_root(root),
        )?)
    }

    /// Compute fresh positions for every item in the store.
    ///
    /// Existing positions are ignored; items are placed in store order.
    pub fn regenerate(&self, store: &ContentStore, rng: &mut impl Rng) -> Layout {
        info!(count = store.len(); "Applying golden spiral to all items");
        placement::regenerate(
            store.items().map(|item| item.id().to_string()),
            self.config.placement(),
            self.config.canvas(),
            rng,
        )
    }

    /// Build the site manifest for a regenerated layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout names an item the store does not hold.
    pub fn manifest(
        &self,
        store: &ContentStore,
        layout: &Layout,
    ) -> Result<Manifest, ConstellationError> {
        let mut manifest = Manifest::new(layout.canvas_bounds());
        for placement in layout.placements() {
            let item = store.get(placement.id()).ok_or_else(|| {
                constellation_content::ContentError::NotFound(placement.id().to_string())
            })?;
            manifest.push(item, placement.position());
        }
        Ok(manifest)
    }

    /// Build the manifest for `layout` and write it to `path`.
    pub fn write_manifest(
        &self,
        store: &ContentStore,
        layout: &Layout,
        path: impl AsRef<Path>,
    ) -> Result<Manifest, ConstellationError> {
        let manifest = self.manifest(store, layout)?;
        manifest.write(path.as_ref())?;
        info!(path:? = path.as_ref(), items = manifest.len(); "Manifest written");
        Ok(manifest)
    }

    /// Relocate overlapping and protected-zone items in the store.
    ///
    /// New positions are applied to the store; with `persist` set they are
    /// also written back to each moved item's `content.json`.
    ///
    /// # Errors
    ///
    /// A failed write does not stop the others: every moved item is still
    /// attempted and the first failure is returned once all writes are done,
    /// so the files on disk may hold only part of the repair.
    pub fn repair(
        &self,
        store: &mut ContentStore,
        rng: &mut impl Rng,
        persist: bool,
    ) -> Result<RepairReport, ConstellationError> {
        let mut items = store_items(store);
        let report = placement::repair(&mut items, self.config.placement(), rng);

        if report.degenerate_count() > 0 {
            warn!(count = report.degenerate_count(); "Some items could not be placed without overlap");
        }

        let mut updated: Vec<&str> = Vec::new();
        for relocation in report.relocations() {
            if !updated.contains(&relocation.id.as_str()) {
                updated.push(&relocation.id);
            }
        }
        let mut failures = Vec::new();
        for item in items.iter().filter(|item| updated.contains(&item.id())) {
            store.set_position(item.id(), item.position())?;
            if !persist {
                continue;
            }
            if let Err(err) = store.save(item.id()) {
                error!(id = item.id(), err:err; "Failed to save repaired position");
                failures.push(err);
            }
        }
        debug!(
            updated = updated.len(),
            failed = failures.len(),
            persist;
            "Repaired positions applied"
        );

        match failures.into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(report),
        }
    }

    /// Check the store's current positions against both placement constraints.
    pub fn check(&self, store: &ContentStore) -> CheckReport {
        CheckReport::new(&store_items(store), self.config.placement())
    }

    /// Render an SVG preview of a layout.
    pub fn render_svg(&self, layout: &Layout) -> String {
        Svg::new(self.config.placement())
            .render_layout(layout)
            .to_string()
    }

    /// Render an SVG preview of a layout into `path`.
    pub fn export_svg(
        &self,
        layout: &Layout,
        path: impl AsRef<Path>,
    ) -> Result<(), ConstellationError> {
        Svg::new(self.config.placement())
            .with_file_name(path)
            .export_layout(layout)?;
        Ok(())
    }
}

fn store_items(store: &ContentStore) -> Vec<Item> {
    store
        .items()
        .map(|item| Item::new(item.id(), item.position()))
        .collect()
}
