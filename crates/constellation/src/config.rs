//! Configuration types for Constellation placement.
//!
//! This module provides configuration structures that control where
//! thumbnails are placed and how the generated canvas is sized. All types
//! implement [`serde::Deserialize`] so they can be loaded from TOML, and every
//! field falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining placement, canvas and content settings.
//! - [`PlacementConfig`] - Thumbnail size, spacing, protected zone and search constants.
//! - [`CanvasConfig`] - Minimum viewport of the generated canvas.
//!
//! # Example
//!
//! ```
//! # use constellation::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.placement().item_width(), 384.0);
//! assert!(config.placement().validate().is_ok());
//! ```

use std::path::PathBuf;

use log::warn;
use serde::Deserialize;

use constellation_content::ContentConfig;
use constellation_core::geometry::{Bounds, Size};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Placement engine settings.
    #[serde(default)]
    placement: PlacementConfig,

    /// Generated canvas settings.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Content directory settings.
    #[serde(default)]
    content: ContentConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(placement: PlacementConfig, canvas: CanvasConfig, content: ContentConfig) -> Self {
        Self {
            placement,
            canvas,
            content,
        }
    }

    /// Returns the placement configuration.
    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the content configuration.
    pub fn content(&self) -> &ContentConfig {
        &self.content
    }

    /// Replaces the placement configuration.
    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    /// Points the content store at a different root directory.
    pub fn with_content_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.content = self.content.with_root(root);
        self
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.placement.validate()?;
        self.canvas.validate()
    }
}

/// The central region kept free of thumbnails, as `[min, max]` extents on
/// each axis around the origin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProtectedZone {
    x: [f32; 2],
    y: [f32; 2],
}

impl Default for ProtectedZone {
    fn default() -> Self {
        Self {
            x: [-500.0, 500.0],
            y: [-300.0, 300.0],
        }
    }
}

impl ProtectedZone {
    pub fn new(x: [f32; 2], y: [f32; 2]) -> Self {
        Self { x, y }
    }

    /// Returns the zone as bounds.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x[0], self.y[0], self.x[1], self.y[1])
    }
}

/// Random perturbation applied to spiral candidates.
///
/// Both values are full spans: an angle span of 10 degrees yields offsets in
/// `[-5, 5)`. A zero span disables that component.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct JitterConfig {
    angle_degrees: f32,
    radius: f32,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            angle_degrees: 10.0,
            radius: 20.0,
        }
    }
}

impl JitterConfig {
    pub fn new(angle_degrees: f32, radius: f32) -> Self {
        Self {
            angle_degrees,
            radius,
        }
    }

    /// Jitter with both spans set to zero.
    pub fn disabled() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_disabled(&self) -> bool {
        self.angle_degrees == 0.0 && self.radius == 0.0
    }
}

/// Placement engine configuration.
///
/// Thumbnails are `item_width x item_height` boxes centered on their
/// position. Collision checks grow every box by `spacing` towards +x and +y
/// (see [`crate::placement::inflated`]).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    item_width: f32,
    item_height: f32,
    spacing: f32,
    protected_zone: ProtectedZone,

    /// Radius of the first spiral ring.
    base_radius: f32,
    /// Radius added per ring.
    radius_increment: f32,
    items_per_ring: usize,
    /// Angle between consecutive spiral slots, in degrees.
    golden_angle: f32,

    /// Primary candidates tested before falling back.
    max_attempts: usize,
    fallback_attempts: usize,
    fallback_offset: f32,
    fallback_step: f32,
    /// Radius range of the last-resort placement.
    degenerate_radius: [f32; 2],

    /// Rotation per nudge attempt, in degrees.
    nudge_angle: f32,
    /// Radius growth per nudge attempt.
    nudge_step: f32,

    jitter: JitterConfig,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            item_width: 384.0,
            item_height: 256.0,
            spacing: 40.0,
            protected_zone: ProtectedZone::default(),
            base_radius: 900.0,
            radius_increment: 460.0,
            items_per_ring: 6,
            golden_angle: 137.508,
            max_attempts: 100,
            fallback_attempts: 10,
            fallback_offset: 400.0,
            fallback_step: 200.0,
            degenerate_radius: [1000.0, 1500.0],
            nudge_angle: 45.0,
            nudge_step: 80.0,
            jitter: JitterConfig::default(),
        }
    }
}

impl PlacementConfig {
    pub fn item_width(&self) -> f32 {
        self.item_width
    }

    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    /// Returns the thumbnail size without spacing.
    pub fn item_size(&self) -> Size {
        Size::new(self.item_width, self.item_height)
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn protected_zone(&self) -> &ProtectedZone {
        &self.protected_zone
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn radius_increment(&self) -> f32 {
        self.radius_increment
    }

    pub fn items_per_ring(&self) -> usize {
        self.items_per_ring
    }

    pub fn golden_angle(&self) -> f32 {
        self.golden_angle
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn fallback_attempts(&self) -> usize {
        self.fallback_attempts
    }

    pub fn fallback_offset(&self) -> f32 {
        self.fallback_offset
    }

    pub fn fallback_step(&self) -> f32 {
        self.fallback_step
    }

    pub fn degenerate_radius(&self) -> [f32; 2] {
        self.degenerate_radius
    }

    pub fn nudge_angle(&self) -> f32 {
        self.nudge_angle
    }

    pub fn nudge_step(&self) -> f32 {
        self.nudge_step
    }

    pub fn jitter(&self) -> &JitterConfig {
        &self.jitter
    }

    /// Returns the search budget: primary plus fallback attempts.
    pub fn attempt_budget(&self) -> usize {
        self.max_attempts + self.fallback_attempts
    }

    pub fn with_item_size(mut self, width: f32, height: f32) -> Self {
        self.item_width = width;
        self.item_height = height;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_protected_zone(mut self, zone: ProtectedZone) -> Self {
        self.protected_zone = zone;
        self
    }

    pub fn with_base_radius(mut self, base_radius: f32) -> Self {
        self.base_radius = base_radius;
        self
    }

    pub fn with_radius_increment(mut self, radius_increment: f32) -> Self {
        self.radius_increment = radius_increment;
        self
    }

    pub fn with_items_per_ring(mut self, items_per_ring: usize) -> Self {
        self.items_per_ring = items_per_ring;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_fallback_attempts(mut self, fallback_attempts: usize) -> Self {
        self.fallback_attempts = fallback_attempts;
        self
    }

    pub fn with_jitter(mut self, jitter: JitterConfig) -> Self {
        self.jitter = jitter;
        self
    }

    /// Returns the smallest spiral radius at which a candidate clears the
    /// protected zone at every angle.
    ///
    /// Inflated boxes extend `w/2` (`h/2`) towards negative coordinates and
    /// `w/2 + spacing` (`h/2 + spacing`) towards positive ones, so the
    /// requirement differs per side of the zone.
    pub fn clearance_radius(&self) -> f32 {
        let zone = self.protected_zone.bounds();
        let half_w = self.item_width / 2.0;
        let half_h = self.item_height / 2.0;

        let x_req = (zone.max_x().abs() + half_w).max(zone.min_x().abs() + half_w + self.spacing);
        let y_req = (zone.max_y().abs() + half_h).max(zone.min_y().abs() + half_h + self.spacing);
        x_req.hypot(y_req)
    }

    /// Checks that the configuration can drive a placement search.
    ///
    /// A `base_radius` below [`Self::clearance_radius`] is accepted with a
    /// warning: such rings rely on retries to leave the protected zone.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.item_width > 0.0 && self.item_height > 0.0) {
            return Err(format!(
                "item size must be positive, got {}x{}",
                self.item_width, self.item_height
            ));
        }
        if !(self.spacing >= 0.0) {
            return Err(format!("spacing must not be negative, got {}", self.spacing));
        }
        check_range("protected_zone.x", self.protected_zone.x)?;
        check_range("protected_zone.y", self.protected_zone.y)?;
        if !(self.base_radius >= 0.0) {
            return Err(format!(
                "base_radius must not be negative, got {}",
                self.base_radius
            ));
        }
        if !(self.radius_increment > 0.0) {
            return Err(format!(
                "radius_increment must be positive, got {}",
                self.radius_increment
            ));
        }
        if self.items_per_ring == 0 {
            return Err("items_per_ring must be at least 1".to_string());
        }
        if !self.golden_angle.is_finite() {
            return Err("golden_angle must be finite".to_string());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if !(self.fallback_offset >= 0.0 && self.fallback_step >= 0.0) {
            return Err("fallback_offset and fallback_step must not be negative".to_string());
        }
        check_range("degenerate_radius", self.degenerate_radius)?;
        if !(self.degenerate_radius[0] >= 0.0) {
            return Err("degenerate_radius must not be negative".to_string());
        }
        if !(self.nudge_angle.is_finite() && self.nudge_step >= 0.0) {
            return Err("nudge_angle must be finite and nudge_step must not be negative".to_string());
        }
        if !(self.jitter.angle_degrees >= 0.0 && self.jitter.radius >= 0.0) {
            return Err("jitter spans must not be negative".to_string());
        }

        let clearance = self.clearance_radius();
        if self.base_radius < clearance {
            warn!(
                base_radius = self.base_radius,
                clearance_radius = clearance;
                "Base radius does not clear the protected zone at every angle"
            );
        }

        Ok(())
    }
}

fn check_range(name: &str, range: [f32; 2]) -> Result<(), String> {
    if range[0].is_finite() && range[1].is_finite() && range[0] <= range[1] {
        Ok(())
    } else {
        Err(format!(
            "{name} must be an ordered [min, max] range, got [{}, {}]",
            range[0], range[1]
        ))
    }
}

/// Generated canvas configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Minimum canvas width, centered on the origin.
    min_width: f32,
    /// Minimum canvas height, centered on the origin.
    min_height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_width: 1200.0,
            min_height: 800.0,
        }
    }
}

impl CanvasConfig {
    pub fn new(min_width: f32, min_height: f32) -> Self {
        Self {
            min_width,
            min_height,
        }
    }

    pub fn min_width(&self) -> f32 {
        self.min_width
    }

    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    /// Returns the minimum viewport as bounds centered on the origin.
    pub fn min_viewport(&self) -> Bounds {
        Bounds::new(
            -self.min_width / 2.0,
            -self.min_height / 2.0,
            self.min_width / 2.0,
            self.min_height / 2.0,
        )
    }

    fn validate(&self) -> Result<(), String> {
        if self.min_width >= 0.0 && self.min_height >= 0.0 {
            Ok(())
        } else {
            Err(format!(
                "canvas minimum size must not be negative, got {}x{}",
                self.min_width, self.min_height
            ))
        }
    }
}
