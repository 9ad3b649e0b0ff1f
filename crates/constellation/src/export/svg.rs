//! SVG preview of a layout.
//!
//! The preview draws the canvas bounds, the protected zone, each thumbnail
//! box with its spacing halo, and the item id. Degenerate placements are
//! highlighted since they may overlap their neighbours.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use svg::{
    Document,
    node::element::{Group, Rectangle, Text},
};

use constellation_core::geometry::Bounds;

use crate::{
    config::PlacementConfig,
    export,
    placement::{Layout, Placement, inflated},
};

const MARGIN: f32 = 50.0;
const FONT_SIZE: f32 = 28.0;

/// Renders layouts as SVG documents.
pub struct Svg {
    config: PlacementConfig,
    file_name: Option<PathBuf>,
}

impl Svg {
    pub fn new(config: &PlacementConfig) -> Self {
        Self {
            config: config.clone(),
            file_name: None,
        }
    }

    /// Sets the file written by [`export::Exporter::export_layout`].
    pub fn with_file_name(mut self, file_name: impl AsRef<Path>) -> Self {
        self.file_name = Some(file_name.as_ref().to_path_buf());
        self
    }

    /// Builds the SVG document for a layout.
    pub fn render_layout(&self, layout: &Layout) -> Document {
        let view = layout.canvas_bounds().merge(&self.config.protected_zone().bounds());

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    view.min_x() - MARGIN,
                    view.min_y() - MARGIN,
                    view.width() + MARGIN * 2.0,
                    view.height() + MARGIN * 2.0
                ),
            )
            .set("width", view.width() + MARGIN * 2.0)
            .set("height", view.height() + MARGIN * 2.0);

        doc = doc
            .add(
                rectangle(layout.canvas_bounds())
                    .set("fill", "none")
                    .set("stroke", "#9ca3af")
                    .set("stroke-width", 2)
                    .set("stroke-dasharray", "12 8"),
            )
            .add(
                rectangle(self.config.protected_zone().bounds())
                    .set("fill", "#ef4444")
                    .set("fill-opacity", 0.12)
                    .set("stroke", "#ef4444")
                    .set("stroke-width", 2),
            );

        for placement in layout.placements() {
            doc = doc.add(self.render_placement(placement));
        }
        debug!(placements = layout.len(); "SVG document rendered");

        doc
    }

    fn render_placement(&self, placement: &Placement) -> Group {
        let position = placement.position();
        let thumbnail = Bounds::new_from_center(position, self.config.item_size());
        let halo = inflated(position, &self.config);
        let stroke = if placement.outcome().is_clear() {
            "#2563eb"
        } else {
            "#f97316"
        };

        let label = Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", "Arial")
            .set("font-size", FONT_SIZE)
            .add(svg::node::Text::new(placement.id()));

        Group::new()
            .set("data-outcome", placement.outcome().kind())
            .add(
                rectangle(halo)
                    .set("fill", "none")
                    .set("stroke", stroke)
                    .set("stroke-opacity", 0.4)
                    .set("stroke-dasharray", "6 6"),
            )
            .add(
                rectangle(thumbnail)
                    .set("fill", "#dbeafe")
                    .set("stroke", stroke)
                    .set("stroke-width", 2)
                    .set("rx", 8),
            )
            .add(label)
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, doc: &Document) -> Result<(), export::Error> {
        let Some(file_name) = &self.file_name else {
            return Err(export::Error::Render("No output file configured".to_string()));
        };
        info!(file_name:?; "Creating SVG file");

        let mut file = File::create(file_name).map_err(|err| {
            error!(file_name:?, err:err; "Failed to create SVG file");
            export::Error::Io(err)
        })?;

        write!(file, "{doc}").map_err(|err| {
            error!(file_name:?, err:err; "Failed to write SVG content");
            export::Error::Io(err)
        })
    }
}

impl export::Exporter for Svg {
    fn export_layout(&self, layout: &Layout) -> Result<(), export::Error> {
        let doc = self.render_layout(layout);
        self.write_document(&doc)
    }
}

fn rectangle(bounds: Bounds) -> Rectangle {
    Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
}
