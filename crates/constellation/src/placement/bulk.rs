//! Bulk regeneration: place every item from scratch.

use log::{debug, info, warn};
use rand::Rng;

use constellation_core::geometry::{Bounds, Point};

use super::{
    Item,
    search::{Outcome, Probe, find_position},
};
use crate::config::{CanvasConfig, PlacementConfig};

/// A single item's regenerated position.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    id: String,
    outcome: Outcome,
}

impl Placement {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Point {
        self.outcome.position()
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

/// The result of a bulk regeneration.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    placements: Vec<Placement>,
    canvas_bounds: Bounds,
}

impl Layout {
    /// Returns placements in input order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns the canvas extent covering every thumbnail.
    pub fn canvas_bounds(&self) -> Bounds {
        self.canvas_bounds
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns the position assigned to `id`.
    pub fn position(&self, id: &str) -> Option<Point> {
        self.placements
            .iter()
            .find(|placement| placement.id == id)
            .map(Placement::position)
    }

    /// Returns the placements as engine items.
    pub fn items(&self) -> Vec<Item> {
        self.placements
            .iter()
            .map(|placement| Item::new(placement.id.clone(), placement.position()))
            .collect()
    }

    /// Returns how many placements gave up on collision avoidance.
    pub fn degenerate_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|placement| !placement.outcome.is_clear())
            .count()
    }
}

/// Assigns a position to every id, in order.
///
/// Item `i` starts its search at spiral slot `i` and is checked against the
/// positions assigned to items `0..i`. Existing positions are ignored.
pub fn regenerate<I, S>(
    ids: I,
    config: &PlacementConfig,
    canvas: &CanvasConfig,
    rng: &mut impl Rng,
) -> Layout
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut occupied: Vec<Point> = Vec::new();
    let mut placements = Vec::new();

    for (index, id) in ids.into_iter().enumerate() {
        let id = id.into();
        let outcome = find_position(Probe::Spiral { index }, &occupied, config, rng);
        let position = outcome.position();

        match outcome {
            Outcome::Found { attempts, .. } => {
                debug!(index, id, x = position.x(), y = position.y(), attempts; "Item positioned");
            }
            Outcome::Fallback { attempts, .. } => {
                info!(index, id, x = position.x(), y = position.y(), attempts; "Item positioned on fallback ring");
            }
            Outcome::Degenerate { .. } => {
                warn!(index, id; "Item may overlap its neighbours");
            }
        }

        occupied.push(position);
        placements.push(Placement { id, outcome });
    }

    let canvas_bounds = canvas_bounds(&occupied, config, canvas);
    info!(count = placements.len(); "Golden spiral distribution complete");

    Layout {
        placements,
        canvas_bounds,
    }
}

/// Computes the canvas extent for a set of positions.
///
/// The extent covers every thumbnail (positions grown by half the item size)
/// and is never smaller than the minimum viewport centered on the origin.
pub fn canvas_bounds(positions: &[Point], config: &PlacementConfig, canvas: &CanvasConfig) -> Bounds {
    let size = config.item_size();
    positions
        .iter()
        .map(|position| Bounds::new_from_center(*position, size))
        .fold(canvas.min_viewport(), |acc, bounds| acc.merge(&bounds))
}
