//! The in-progress stroke.

use crate::draw::{Color, Primitive};
use crate::util::Point;

/// Stroke currently being drawn.
///
/// A stroke starts as a point-mark candidate and turns into a vector path as
/// soon as a second point arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSegment {
    points: Vec<Point>,
    is_point: bool,
}

impl StrokeSegment {
    pub fn new(start: Point) -> Self {
        Self {
            points: vec![start],
            is_point: true,
        }
    }

    /// Appends a point, promoting the stroke to a path.
    pub fn extend(&mut self, point: Point) {
        self.points.push(point);
        self.is_point = false;
    }

    pub fn is_point(&self) -> bool {
        self.is_point
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Last committed coordinate of the stroke.
    pub fn last(&self) -> Point {
        // Never empty: constructed with its start point
        self.points[self.points.len() - 1]
    }

    /// Converts the stroke into its final primitive in `color`.
    pub fn finish(self, color: Color) -> Primitive {
        if self.is_point {
            Primitive::PointMark {
                at: self.last(),
                color,
            }
        } else {
            Primitive::VectorPath {
                points: self.points,
                color,
            }
        }
    }
}
