//! The placement engine.
//!
//! Thumbnails are placed on a golden-angle spiral growing outward from the
//! canvas center. Every candidate is checked against the inflated boxes of
//! the items placed so far and against the protected zone; colliding
//! candidates are retried, and exhausted searches fall back to random outer
//! rings.
//!
//! Two entry points drive the engine:
//!
//! - [`regenerate`] assigns fresh positions to every item, in input order.
//! - [`repair`] keeps existing positions and relocates only the offenders.
//!
//! All randomness comes from the caller's RNG, so a seeded
//! [`rand::rngs::StdRng`] gives reproducible layouts.

mod bulk;
mod collision;
mod diagnostics;
mod repair;
mod search;
pub mod spiral;

pub use bulk::{Layout, Placement, canvas_bounds, regenerate};
pub use collision::{collides, inflated, is_clear};
pub use diagnostics::{
    CheckReport, Overlap, ZoneViolation, find_overlaps, find_zone_violations,
};
pub use repair::{Relocation, RelocationReason, RepairReport, repair};
pub use search::{Outcome, Probe, find_position};

use constellation_core::geometry::Point;

/// An item as the engine sees it: an id and a center position.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: String,
    position: Point,
}

impl Item {
    pub fn new(id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}
