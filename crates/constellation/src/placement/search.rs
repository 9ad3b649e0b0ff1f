//! Collision-retry search for a single free position.

use std::f32::consts::TAU;

use log::{trace, warn};
use rand::Rng;

use constellation_core::geometry::Point;

use super::{collision::is_clear, spiral};
use crate::config::PlacementConfig;

/// Where the primary phase of a search draws its candidates from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe {
    /// Walk the spiral: attempt `k` tests slot `index + k`.
    Spiral { index: usize },

    /// Circle outward from a point: attempt `k` rotates `from` by
    /// `k * nudge_angle` and grows its radius by `k * nudge_step`.
    Nudge { from: Point },
}

impl Probe {
    fn candidate(&self, attempt: usize, config: &PlacementConfig, rng: &mut impl Rng) -> Point {
        match *self {
            Probe::Spiral { index } => spiral::candidate(index + attempt, config, rng),
            Probe::Nudge { from } => {
                let angle = from.angle() + (attempt as f32 * config.nudge_angle()).to_radians();
                let radius = from.hypot() + attempt as f32 * config.nudge_step();
                Point::from_polar(radius, angle).round()
            }
        }
    }
}

/// The result of a position search.
///
/// `attempts` counts candidate tests, including the one that succeeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// A primary candidate was clear.
    Found { position: Point, attempts: usize },

    /// The primary phase failed; an outer-ring fallback candidate was clear.
    Fallback { position: Point, attempts: usize },

    /// Every candidate collided. The position is random and may overlap.
    Degenerate { position: Point, attempts: usize },
}

impl Outcome {
    pub fn position(&self) -> Point {
        match *self {
            Outcome::Found { position, .. }
            | Outcome::Fallback { position, .. }
            | Outcome::Degenerate { position, .. } => position,
        }
    }

    pub fn attempts(&self) -> usize {
        match *self {
            Outcome::Found { attempts, .. }
            | Outcome::Fallback { attempts, .. }
            | Outcome::Degenerate { attempts, .. } => attempts,
        }
    }

    /// Returns `true` unless the search gave up.
    pub fn is_clear(&self) -> bool {
        !matches!(self, Outcome::Degenerate { .. })
    }

    /// Short lowercase name, used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Found { .. } => "found",
            Outcome::Fallback { .. } => "fallback",
            Outcome::Degenerate { .. } => "degenerate",
        }
    }
}

/// Searches for a position clear of `occupied` and of the protected zone.
///
/// Runs up to `max_attempts` candidates from `probe`, then up to
/// `fallback_attempts` candidates at a random angle on increasingly distant
/// rings past `base_radius + fallback_offset`. When everything collides the
/// result is a [`Outcome::Degenerate`] random point inside
/// `degenerate_radius`, which carries no collision guarantee.
pub fn find_position(
    probe: Probe,
    occupied: &[Point],
    config: &PlacementConfig,
    rng: &mut impl Rng,
) -> Outcome {
    for attempt in 0..config.max_attempts() {
        let position = probe.candidate(attempt, config, rng);
        if is_clear(position, occupied, config) {
            return Outcome::Found {
                position,
                attempts: attempt + 1,
            };
        }
    }
    trace!(probe:?, max_attempts = config.max_attempts(); "Primary candidates exhausted");

    let fallback_base = config.base_radius() + config.fallback_offset();
    for attempt in 0..config.fallback_attempts() {
        let radius = fallback_base + attempt as f32 * config.fallback_step();
        let angle = rng.random::<f32>() * TAU;
        let position = Point::from_polar(radius, angle).round();
        if is_clear(position, occupied, config) {
            return Outcome::Fallback {
                position,
                attempts: config.max_attempts() + attempt + 1,
            };
        }
    }

    let [min_radius, max_radius] = config.degenerate_radius();
    let angle = rng.random::<f32>() * TAU;
    let radius = min_radius + rng.random::<f32>() * (max_radius - min_radius);
    let position = Point::from_polar(radius, angle).round();
    warn!(
        x = position.x(),
        y = position.y(),
        occupied = occupied.len();
        "No collision-free position found, placing at random"
    );

    Outcome::Degenerate {
        position,
        attempts: config.attempt_budget(),
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    // =====================================================================
    // Strategies
    // =====================================================================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-3000.0f32..3000.0, -3000.0f32..3000.0).prop_map(|(x, y)| Point::new(x, y).round())
    }

    fn probe_strategy() -> impl Strategy<Value = Probe> {
        prop_oneof![
            (0usize..50).prop_map(|index| Probe::Spiral { index }),
            point_strategy().prop_map(|from| Probe::Nudge { from }),
        ]
    }

    // =====================================================================
    // Property Test Functions
    // =====================================================================

    /// The search never performs more than its attempt budget.
    fn check_attempts_bounded(
        probe: Probe,
        occupied: &[Point],
        seed: u64,
    ) -> Result<(), TestCaseError> {
        let config = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);

        let outcome = find_position(probe, occupied, &config, &mut rng);

        prop_assert!(outcome.attempts() >= 1);
        prop_assert!(outcome.attempts() <= config.attempt_budget());
        Ok(())
    }

    /// Non-degenerate outcomes honour both the occupied set and the zone.
    fn check_clear_outcome(
        probe: Probe,
        occupied: &[Point],
        seed: u64,
    ) -> Result<(), TestCaseError> {
        let config = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);

        let outcome = find_position(probe, occupied, &config, &mut rng);

        if outcome.is_clear() {
            prop_assert!(is_clear(outcome.position(), occupied, &config));
        }
        Ok(())
    }

    // =====================================================================
    // Proptest Wrappers
    // =====================================================================

    proptest! {
        #[test]
        fn attempts_bounded(
            probe in probe_strategy(),
            occupied in prop::collection::vec(point_strategy(), 0..40),
            seed in any::<u64>(),
        ) {
            check_attempts_bounded(probe, &occupied, seed)?;
        }

        #[test]
        fn clear_outcome(
            probe in probe_strategy(),
            occupied in prop::collection::vec(point_strategy(), 0..40),
            seed in any::<u64>(),
        ) {
            check_clear_outcome(probe, &occupied, seed)?;
        }
    }
}
