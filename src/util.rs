//! Utility functions for colors and stroke geometry.
//!
//! This module provides:
//! - Name-to-color mapping used by the configuration system
//! - The [`Point`] type shared by the fusion engine and the renderer
//! - Quadratic-to-cubic curve conversion for smoothed strokes

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// A position in surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Converts a quadratic Bézier segment into the two control points of the
/// equivalent cubic segment.
///
/// Cairo only exposes cubic curves, so smoothed strokes are expressed as
/// `curve_to(c1, c2, end)` with the controls returned here.
///
/// # Arguments
/// * `start` - Current pen position
/// * `control` - Quadratic control point
/// * `end` - Segment end point
pub fn quad_to_cubic(start: Point, control: Point, end: Point) -> (Point, Point) {
    let c1 = Point::new(
        start.x + 2.0 / 3.0 * (control.x - start.x),
        start.y + 2.0 / 3.0 * (control.y - start.y),
    );
    let c2 = Point::new(
        end.x + 2.0 / 3.0 * (control.x - end.x),
        end.y + 2.0 / 3.0 * (control.y - end.y),
    );
    (c1, c2)
}
