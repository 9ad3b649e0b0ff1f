//! Golden-angle spiral candidate generation.
//!
//! Slot `i` sits at angle `i * golden_angle` on ring `i / items_per_ring`.
//! Consecutive slots land far apart angularly, so each ring fills evenly and
//! later rings interleave with earlier ones instead of lining up behind them.

use rand::Rng;

use constellation_core::geometry::Point;

use crate::config::PlacementConfig;

/// The deterministic part of a spiral candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralSlot {
    pub index: usize,
    pub ring: usize,
    pub angle_degrees: f32,
    pub radius: f32,
}

impl SpiralSlot {
    /// Returns the slot position without jitter or rounding.
    pub fn point(&self) -> Point {
        Point::from_polar(self.radius, self.angle_degrees.to_radians())
    }
}

/// Computes the un-jittered slot for `index`.
///
/// An `items_per_ring` of zero is treated as one slot per ring.
pub fn slot(index: usize, config: &PlacementConfig) -> SpiralSlot {
    let ring = index / config.items_per_ring().max(1);
    SpiralSlot {
        index,
        ring,
        angle_degrees: index as f32 * config.golden_angle(),
        radius: config.base_radius() + ring as f32 * config.radius_increment(),
    }
}

/// Returns the spiral candidate for `index`, jittered and rounded to whole units.
///
/// Each non-zero jitter span draws one sample from `rng`; with jitter
/// disabled the RNG is not touched.
pub fn candidate(index: usize, config: &PlacementConfig, rng: &mut impl Rng) -> Point {
    let slot = slot(index, config);
    let jitter = config.jitter();

    let angle = slot.angle_degrees + spread(rng, jitter.angle_degrees());
    let radius = slot.radius + spread(rng, jitter.radius());

    Point::from_polar(radius, angle.to_radians()).round()
}

/// Samples a uniform offset in `[-span / 2, span / 2)`.
pub(crate) fn spread(rng: &mut impl Rng, span: f32) -> f32 {
    if span == 0.0 {
        return 0.0;
    }
    (rng.random::<f32>() - 0.5) * span
}
