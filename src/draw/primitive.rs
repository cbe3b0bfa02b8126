//! Finalized drawing primitives stored in the history.

use super::color::Color;
use crate::util::Point;

/// Discriminant of a [`Primitive`], handy for inspecting history order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// A smoothed vector path (stroke with at least two distinct points)
    Path,
    /// A single dot (stroke that never moved)
    Point,
}

/// A finalized, immutable shape appended to the drawing history.
///
/// Each variant carries the color that was current when its stroke was
/// committed, so later palette changes never repaint it.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Freehand stroke through the raw sample points (rendered smoothed)
    VectorPath {
        /// Raw stroke points in surface space, first to last
        points: Vec<Point>,
        /// Stroke color at commit time
        color: Color,
    },
    /// Single dot for a contact that lifted without moving
    PointMark {
        /// Dot center in surface space
        at: Point,
        /// Dot color at commit time
        color: Color,
    },
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::VectorPath { .. } => PrimitiveKind::Path,
            Primitive::PointMark { .. } => PrimitiveKind::Point,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Primitive::VectorPath { color, .. } | Primitive::PointMark { color, .. } => *color,
        }
    }
}
