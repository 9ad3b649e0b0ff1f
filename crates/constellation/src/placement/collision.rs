//! Collision predicates on inflated thumbnail boxes.

use constellation_core::geometry::{Bounds, Point};

use crate::config::{PlacementConfig, ProtectedZone};

/// Returns the box used for collision checks around a thumbnail center.
///
/// The box starts at the thumbnail's top-left corner and is `spacing` wider
/// and taller than the thumbnail, so the gap only extends towards +x and +y.
/// Two inflated boxes that merely touch do not collide.
pub fn inflated(position: Point, config: &PlacementConfig) -> Bounds {
    let size = config.item_size();
    let top_left = Point::new(
        position.x() - size.width() / 2.0,
        position.y() - size.height() / 2.0,
    );
    Bounds::new_from_top_left(top_left, size.grow(config.spacing()))
}

/// Returns `true` if thumbnails centered at `a` and `b` are too close.
pub fn collides(a: Point, b: Point, config: &PlacementConfig) -> bool {
    inflated(a, config).overlaps(&inflated(b, config))
}

impl ProtectedZone {
    /// Returns `true` if a thumbnail centered at `position` reaches into the zone.
    pub fn intrudes(&self, position: Point, config: &PlacementConfig) -> bool {
        inflated(position, config).overlaps(&self.bounds())
    }
}

/// Returns `true` if `candidate` collides with none of `occupied` and stays
/// out of the protected zone.
pub fn is_clear(candidate: Point, occupied: &[Point], config: &PlacementConfig) -> bool {
    if config.protected_zone().intrudes(candidate, config) {
        return false;
    }

    let bounds = inflated(candidate, config);
    !occupied
        .iter()
        .any(|other| bounds.overlaps(&inflated(*other, config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflated_extends_towards_positive_axes() {
        let config = PlacementConfig::default();
        let bounds = inflated(Point::new(0.0, 0.0), &config);

        assert_eq!(bounds, Bounds::new(-192.0, -128.0, 232.0, 168.0));
    }

    #[test]
    fn test_collides_is_strict() {
        let config = PlacementConfig::default();
        let origin = Point::new(1000.0, 1000.0);

        // Exactly width + spacing apart: edges touch, no collision.
        assert!(!collides(origin, Point::new(1424.0, 1000.0), &config));
        assert!(!collides(origin, Point::new(1000.0, 1296.0), &config));

        assert!(collides(origin, Point::new(1423.0, 1000.0), &config));
        assert!(collides(origin, Point::new(1000.0, 1295.0), &config));
        assert!(collides(origin, origin, &config));
    }

    #[test]
    fn test_protected_zone_intrusion() {
        let config = PlacementConfig::default();
        let zone = config.protected_zone();

        assert!(zone.intrudes(Point::new(0.0, 0.0), &config));
        assert!(zone.intrudes(Point::new(600.0, 0.0), &config));
        // Left edge of the box sits exactly on the zone's right edge.
        assert!(!zone.intrudes(Point::new(692.0, 0.0), &config));
        // Towards -x the spacing counts as well.
        assert!(zone.intrudes(Point::new(-731.0, 0.0), &config));
        assert!(!zone.intrudes(Point::new(-732.0, 0.0), &config));
        assert!(!zone.intrudes(Point::new(0.0, 428.0), &config));
        assert!(!zone.intrudes(Point::new(0.0, -468.0), &config));
    }

    #[test]
    fn test_is_clear() {
        let config = PlacementConfig::default();
        let occupied = [Point::new(900.0, 0.0)];

        assert!(is_clear(Point::new(-900.0, 0.0), &occupied, &config));
        assert!(!is_clear(Point::new(950.0, 50.0), &occupied, &config));
        assert!(!is_clear(Point::new(0.0, 0.0), &[], &config));
        assert!(is_clear(Point::new(0.0, 900.0), &[], &config));
    }
}
