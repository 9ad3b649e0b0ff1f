//! Geometric primitives for canvas placement.
//!
//! This module provides the fundamental geometric types used throughout
//! Constellation to describe where thumbnails sit on the canvas and how much
//! room they take.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate on the canvas
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! The canvas is unbounded and centered on the origin:
//!
//! ```text
//!              -Y
//!               ▲
//!               │
//!   -X ◄────── (0,0) ──────► +X
//!               │
//!               ▼
//!              +Y
//! ```
//!
//! - **Origin**: Canvas center at `(0, 0)`, where the protected heading area lives
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward, matching SVG and screen coordinates
//!
//! Item positions always refer to the *center* of a thumbnail.

use serde::{Deserialize, Serialize};

/// A 2D point representing a position on the canvas.
///
/// Points use `f32` coordinates and provide operations for basic vector math
/// and polar conversion.
///
/// # Examples
///
/// ```
/// # use constellation_core::geometry::Point;
/// let p1 = Point::new(1.0, 1.0);
/// let p2 = Point::new(4.0, 5.0);
///
/// assert_eq!(p1.distance_to(p2), 5.0);
/// assert_eq!(Point::new(3.0, 4.0).hypot(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a point from polar coordinates around the origin.
    ///
    /// `angle` is measured in radians from the positive X-axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use constellation_core::geometry::Point;
    /// let p = Point::from_polar(2.0, 0.0);
    /// assert_eq!(p, Point::new(2.0, 0.0));
    /// ```
    pub fn from_polar(radius: f32, angle: f32) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance_to(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Angle of the point around the origin, in radians.
    ///
    /// The origin itself reports an angle of zero.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Rounds both coordinates to the nearest whole unit.
    ///
    /// Halfway cases round away from zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use constellation_core::geometry::Point;
    /// let p = Point::new(10.4, -2.5).round();
    /// assert_eq!(p, Point::new(10.0, -3.0));
    /// ```
    pub fn round(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size grown by `amount` in both dimensions
    pub fn grow(self, amount: f32) -> Self {
        Self {
            width: self.width + amount,
            height: self.height + amount,
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds directly from its extremes.
    ///
    /// Inverted extremes are swapped so that `min <= max` always holds.
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: max_x.max(min_x),
            max_y: max_y.max(min_y),
        }
    }

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns `true` if the two areas intersect by a positive amount.
    ///
    /// This is the separating-axis test for axis-aligned boxes: two bounds are
    /// disjoint when one lies entirely left of, right of, above or below the
    /// other. Bounds that merely share an edge or a corner do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// # use constellation_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    /// let b = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
    /// let touching = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
    ///
    /// assert!(a.overlaps(&b));
    /// assert!(!a.overlaps(&touching));
    /// ```
    pub fn overlaps(&self, other: &Self) -> bool {
        let separated = self.max_x <= other.min_x
            || other.max_x <= self.min_x
            || self.max_y <= other.min_y
            || other.max_y <= self.min_y;
        !separated
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use constellation_core::geometry::{Bounds, Point, Size};
    /// let left = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let right = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = left.merge(&right);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_accessors() {
        let point = Point::new(3.0, -4.0);
        assert_eq!(point.x(), 3.0);
        assert_eq!(point.y(), -4.0);
        assert_eq!(Point::default(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_point_sub() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 5.0);

        assert_eq!(p2.sub_point(p1), Point::new(2.0, 3.0));
        assert_eq!(p1.sub_point(p2), Point::new(-2.0, -3.0));
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(1.0, 1.0);
        let p2 = Point::new(4.0, 5.0);

        assert_eq!(p1.distance_to(p2), 5.0);
        assert_eq!(p2.distance_to(p1), 5.0);
        assert_eq!(p1.distance_to(p1), 0.0);
    }

    #[test]
    fn test_point_polar() {
        let right = Point::from_polar(10.0, 0.0);
        assert!((right.x() - 10.0).abs() < 1e-5);
        assert!(right.y().abs() < 1e-5);

        let down = Point::from_polar(10.0, std::f32::consts::FRAC_PI_2);
        assert!(down.x().abs() < 1e-5);
        assert!((down.y() - 10.0).abs() < 1e-5);

        assert!((down.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(Point::default().angle(), 0.0);
    }

    #[test]
    fn test_point_round() {
        assert_eq!(Point::new(0.5, -0.5).round(), Point::new(1.0, -1.0));
        assert_eq!(Point::new(663.6, 608.2).round(), Point::new(664.0, 608.0));
    }

    #[test]
    fn test_size_grow() {
        let size = Size::new(384.0, 256.0);

        assert_eq!(size.grow(40.0), Size::new(424.0, 296.0));
        assert_eq!(size.grow(0.0), size);
    }

    #[test]
    fn test_bounds_new_normalizes() {
        let bounds = Bounds::new(5.0, 8.0, 1.0, 2.0);

        assert_eq!(bounds.min_x(), 1.0);
        assert_eq!(bounds.min_y(), 2.0);
        assert_eq!(bounds.max_x(), 5.0);
        assert_eq!(bounds.max_y(), 8.0);
    }

    #[test]
    fn test_bounds_from_center() {
        let bounds = Bounds::new_from_center(Point::new(10.0, 20.0), Size::new(4.0, 6.0));

        assert_eq!(bounds.min_x(), 8.0);
        assert_eq!(bounds.min_y(), 17.0);
        assert_eq!(bounds.max_x(), 12.0);
        assert_eq!(bounds.max_y(), 23.0);
        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.height(), 6.0);
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(-500.0, -300.0), Size::new(1000.0, 600.0));

        assert_eq!(bounds.min_x(), -500.0);
        assert_eq!(bounds.min_y(), -300.0);
        assert_eq!(bounds.max_x(), 500.0);
        assert_eq!(bounds.max_y(), 300.0);
        assert_eq!(bounds.width(), 1000.0);
        assert_eq!(bounds.height(), 600.0);
    }

    #[test]
    fn test_bounds_overlap() {
        let base = Bounds::new(0.0, 0.0, 10.0, 10.0);

        assert!(base.overlaps(&Bounds::new(5.0, 5.0, 15.0, 15.0)));
        assert!(base.overlaps(&Bounds::new(2.0, 2.0, 3.0, 3.0)));
        assert!(base.overlaps(&base));

        // Clearly separated along one axis
        assert!(!base.overlaps(&Bounds::new(20.0, 0.0, 30.0, 10.0)));
        assert!(!base.overlaps(&Bounds::new(0.0, -30.0, 10.0, -20.0)));
    }

    #[test]
    fn test_bounds_touching_edges_do_not_overlap() {
        let base = Bounds::new(0.0, 0.0, 10.0, 10.0);

        assert!(!base.overlaps(&Bounds::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!base.overlaps(&Bounds::new(-10.0, 0.0, 0.0, 10.0)));
        assert!(!base.overlaps(&Bounds::new(0.0, 10.0, 10.0, 20.0)));
        assert!(!base.overlaps(&Bounds::new(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn test_bounds_merge() {
        let bounds1 = Bounds::new(1.0, 2.0, 5.0, 6.0);
        let bounds2 = Bounds::new(3.0, 0.0, 8.0, 4.0);

        let merged = bounds1.merge(&bounds2);
        assert_eq!(merged, Bounds::new(1.0, 0.0, 8.0, 6.0));
    }

    #[test]
    fn test_bounds_serializes_camel_case() {
        let bounds = Bounds::new(-600.0, -400.0, 600.0, 400.0);
        let json = serde_json::to_string(&bounds).unwrap();

        assert_eq!(
            json,
            r#"{"minX":-600.0,"minY":-400.0,"maxX":600.0,"maxY":400.0}"#
        );
    }
}
