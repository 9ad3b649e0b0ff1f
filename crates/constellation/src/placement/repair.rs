//! Incremental repair: keep existing positions and move only the offenders.

use std::fmt;

use log::{debug, info};
use rand::Rng;

use constellation_core::geometry::Point;

use super::{
    Item,
    collision::collides,
    diagnostics::overlapping_pairs,
    search::{Outcome, Probe, find_position},
    spiral,
};
use crate::config::PlacementConfig;

/// Why an item was moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationReason {
    /// The item overlapped another item.
    Overlap,
    /// The item reached into the protected zone.
    ProtectedZone,
}

impl fmt::Display for RelocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelocationReason::Overlap => write!(f, "overlap"),
            RelocationReason::ProtectedZone => write!(f, "protected zone"),
        }
    }
}

/// A single move made during repair.
#[derive(Debug, Clone, PartialEq)]
pub struct Relocation {
    pub id: String,
    pub from: Point,
    pub to: Point,
    pub reason: RelocationReason,
    pub outcome: Outcome,
}

/// Every move made by a [`repair`] run, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairReport {
    relocations: Vec<Relocation>,
    overlaps_found: usize,
}

impl RepairReport {
    pub fn relocations(&self) -> &[Relocation] {
        &self.relocations
    }

    /// Number of overlapping pairs found before any item moved.
    pub fn overlaps_found(&self) -> usize {
        self.overlaps_found
    }

    pub fn is_clean(&self) -> bool {
        self.relocations.is_empty()
    }

    /// Returns how many moves gave up on collision avoidance.
    pub fn degenerate_count(&self) -> usize {
        self.relocations
            .iter()
            .filter(|relocation| !relocation.outcome.is_clear())
            .count()
    }
}

/// Relocates overlapping items, then protected-zone intruders, in place.
///
/// Overlapping pairs are handled closest first. For each pair still
/// overlapping, the first item not yet moved in this run is relocated; a pair
/// whose items have both moved is left alone. A relocated item searches
/// outward from the spiral slot after the other items, against all of their
/// current positions.
///
/// A set that already satisfies both constraints is returned untouched.
pub fn repair(items: &mut [Item], config: &PlacementConfig, rng: &mut impl Rng) -> RepairReport {
    let positions: Vec<Point> = items.iter().map(Item::position).collect();
    let pairs = overlapping_pairs(&positions, config);
    info!(items = items.len(), overlaps = pairs.len(); "Checking for overlaps");

    let mut report = RepairReport {
        relocations: Vec::new(),
        overlaps_found: pairs.len(),
    };
    let mut moved = vec![false; items.len()];

    for (first, second, _) in pairs {
        if !collides(items[first].position, items[second].position, config) {
            continue;
        }
        let target = if !moved[first] {
            first
        } else if !moved[second] {
            second
        } else {
            continue;
        };

        report
            .relocations
            .push(relocate(items, target, RelocationReason::Overlap, config, rng));
        moved[target] = true;
    }

    let zone = config.protected_zone();
    for index in 0..items.len() {
        if zone.intrudes(items[index].position, config) {
            report.relocations.push(relocate(
                items,
                index,
                RelocationReason::ProtectedZone,
                config,
                rng,
            ));
        }
    }

    info!(relocated = report.relocations.len(); "Repair complete");
    report
}

fn relocate(
    items: &mut [Item],
    index: usize,
    reason: RelocationReason,
    config: &PlacementConfig,
    rng: &mut impl Rng,
) -> Relocation {
    let others: Vec<Point> = items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.position)
        .collect();

    let from = spiral::candidate(others.len(), config, rng);
    let outcome = find_position(Probe::Nudge { from }, &others, config, rng);

    let item = &mut items[index];
    let relocation = Relocation {
        id: item.id.clone(),
        from: item.position,
        to: outcome.position(),
        reason,
        outcome,
    };
    debug!(
        id = relocation.id,
        reason:% = reason,
        from:? = relocation.from,
        to:? = relocation.to;
        "Relocated item"
    );
    item.set_position(outcome.position());
    relocation
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        config::CanvasConfig,
        placement::{
            bulk::regenerate,
            diagnostics::{find_overlaps, find_zone_violations},
        },
    };

    // =====================================================================
    // Strategies
    // =====================================================================

    fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec((-2500.0f32..2500.0, -2500.0f32..2500.0), 0..16).prop_map(|coords| {
            coords
                .into_iter()
                .enumerate()
                .map(|(i, (x, y))| Item::new(format!("item-{i}"), Point::new(x, y).round()))
                .collect()
        })
    }

    // =====================================================================
    // Property Test Functions
    // =====================================================================

    /// Repairing a regenerated layout moves nothing.
    fn check_idempotent_on_valid(count: usize, seed: u64) -> Result<(), TestCaseError> {
        let config = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = regenerate(
            (0..count).map(|i| format!("item-{i}")),
            &config,
            &CanvasConfig::default(),
            &mut rng,
        );
        prop_assume!(layout.degenerate_count() == 0);

        let mut items = layout.items();
        let report = repair(&mut items, &config, &mut rng);

        prop_assert!(report.is_clean());
        prop_assert_eq!(items, layout.items());
        Ok(())
    }

    /// Every item moves at most once per pass.
    fn check_repair_bounds(mut items: Vec<Item>, seed: u64) -> Result<(), TestCaseError> {
        let config = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);

        let report = repair(&mut items, &config, &mut rng);

        prop_assert!(report.relocations().len() <= 2 * items.len());
        for relocation in report.relocations() {
            prop_assert!(relocation.outcome.attempts() <= config.attempt_budget());
        }
        Ok(())
    }

    /// A repair that never degenerated leaves a valid set behind.
    fn check_repair_resolves(mut items: Vec<Item>, seed: u64) -> Result<(), TestCaseError> {
        let config = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);

        let report = repair(&mut items, &config, &mut rng);
        prop_assume!(report.degenerate_count() == 0);

        prop_assert!(find_overlaps(&items, &config).is_empty());
        prop_assert!(find_zone_violations(&items, &config).is_empty());
        Ok(())
    }

    // =====================================================================
    // Proptest Wrappers
    // =====================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn idempotent_on_valid(count in 0usize..30, seed in any::<u64>()) {
            check_idempotent_on_valid(count, seed)?;
        }

        #[test]
        fn repair_bounds(items in items_strategy(), seed in any::<u64>()) {
            check_repair_bounds(items, seed)?;
        }

        #[test]
        fn repair_resolves(items in items_strategy(), seed in any::<u64>()) {
            check_repair_resolves(items, seed)?;
        }
    }
}
