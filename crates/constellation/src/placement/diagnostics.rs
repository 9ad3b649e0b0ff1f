//! Post-hoc checks over a set of placed items.

use constellation_core::geometry::Point;

use super::{Item, collision::collides};
use crate::config::PlacementConfig;

/// Two items whose inflated boxes overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub first: String,
    pub second: String,
    /// Distance between the two centers.
    pub distance: f32,
}

/// An item whose inflated box reaches into the protected zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneViolation {
    pub id: String,
    pub position: Point,
}

/// The result of checking a set of placed items against both constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    item_count: usize,
    overlaps: Vec<Overlap>,
    zone_violations: Vec<ZoneViolation>,
}

impl CheckReport {
    /// Checks `items` for overlapping pairs and protected-zone intrusions.
    pub fn new(items: &[Item], config: &PlacementConfig) -> Self {
        Self {
            item_count: items.len(),
            overlaps: find_overlaps(items, config),
            zone_violations: find_zone_violations(items, config),
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn overlaps(&self) -> &[Overlap] {
        &self.overlaps
    }

    pub fn zone_violations(&self) -> &[ZoneViolation] {
        &self.zone_violations
    }

    /// Returns `true` if no constraint is violated.
    pub fn is_valid(&self) -> bool {
        self.overlaps.is_empty() && self.zone_violations.is_empty()
    }
}

/// Returns every overlapping pair, closest pairs first.
///
/// Pairs at equal distance keep scan order (`first` precedes `second` in
/// `items`).
pub fn find_overlaps(items: &[Item], config: &PlacementConfig) -> Vec<Overlap> {
    let positions: Vec<Point> = items.iter().map(Item::position).collect();
    overlapping_pairs(&positions, config)
        .into_iter()
        .map(|(i, j, distance)| Overlap {
            first: items[i].id.clone(),
            second: items[j].id.clone(),
            distance,
        })
        .collect()
}

/// Returns every item that intrudes into the protected zone, in input order.
pub fn find_zone_violations(items: &[Item], config: &PlacementConfig) -> Vec<ZoneViolation> {
    let zone = config.protected_zone();
    items
        .iter()
        .filter(|item| zone.intrudes(item.position, config))
        .map(|item| ZoneViolation {
            id: item.id.clone(),
            position: item.position,
        })
        .collect()
}

/// Index pairs `(i, j)` with `i < j` whose boxes overlap, sorted stably by
/// center distance.
pub(crate) fn overlapping_pairs(
    positions: &[Point],
    config: &PlacementConfig,
) -> Vec<(usize, usize, f32)> {
    let mut pairs = Vec::new();
    for (i, a) in positions.iter().enumerate() {
        for (j, b) in positions.iter().enumerate().skip(i + 1) {
            if collides(*a, *b, config) {
                pairs.push((i, j, a.distance_to(*b)));
            }
        }
    }
    pairs.sort_by(|a, b| a.2.total_cmp(&b.2));
    pairs
}
