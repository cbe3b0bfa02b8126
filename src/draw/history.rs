//! Ordered drawing history with LIFO undo.

use super::color::Color;
use super::primitive::{Primitive, PrimitiveKind};
use crate::util::Point;

/// Container for every committed primitive of the current drawing session.
///
/// Primitives are kept in one tagged sequence in global append order, so undo
/// always removes the most recently drawn primitive whatever its kind.
#[derive(Debug, Clone, Default)]
pub struct DrawingHistory {
    /// All primitives in draw order (first = oldest)
    primitives: Vec<Primitive>,
}

impl DrawingHistory {
    /// Creates a new empty history.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
        }
    }

    /// Removes all primitives.
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Appends a primitive on top of the existing ones.
    pub fn append(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Attempts to append a primitive, enforcing a maximum count when `max` > 0.
    ///
    /// Returns `true` if the primitive was appended, `false` if the limit would be exceeded.
    pub fn try_append(&mut self, primitive: Primitive, max: usize) -> bool {
        if max == 0 || self.primitives.len() < max {
            self.primitives.push(primitive);
            true
        } else {
            false
        }
    }

    /// Removes and returns the most recently appended primitive, if any.
    pub fn pop(&mut self) -> Option<Primitive> {
        self.primitives.pop()
    }

    /// Removes the most recent primitive. Returns `false` (and changes nothing)
    /// when the history is empty.
    pub fn undo(&mut self) -> bool {
        self.pop().is_some()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// All primitives in append order.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }

    /// Kind of each primitive in append order.
    pub fn kinds(&self) -> impl Iterator<Item = PrimitiveKind> + '_ {
        self.primitives.iter().map(Primitive::kind)
    }

    /// Committed vector paths in append order.
    pub fn paths(&self) -> impl Iterator<Item = (&[Point], Color)> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::VectorPath { points, color } => Some((points.as_slice(), *color)),
            Primitive::PointMark { .. } => None,
        })
    }

    /// Committed point marks in append order.
    pub fn point_marks(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::PointMark { at, color } => Some((*at, *color)),
            Primitive::VectorPath { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    fn path(x: f64) -> Primitive {
        Primitive::VectorPath {
            points: vec![Point::new(x, 0.0), Point::new(x + 5.0, 5.0)],
            color: RED,
        }
    }

    fn dot(x: f64) -> Primitive {
        Primitive::PointMark {
            at: Point::new(x, x),
            color: BLUE,
        }
    }

    #[test]
    fn undo_removes_in_reverse_append_order_across_kinds() {
        let mut history = DrawingHistory::new();
        history.append(path(1.0));
        history.append(dot(2.0));
        history.append(path(3.0));

        assert_eq!(history.pop(), Some(path(3.0)));
        assert_eq!(history.pop(), Some(dot(2.0)));
        assert_eq!(history.pop(), Some(path(1.0)));
        assert!(history.is_empty());
    }

    #[test]
    fn undo_on_empty_history_returns_false() {
        let mut history = DrawingHistory::new();
        assert!(!history.undo());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn paths_and_point_marks_are_partitioned() {
        let mut history = DrawingHistory::new();
        history.append(dot(1.0));
        history.append(path(2.0));
        history.append(dot(3.0));

        assert_eq!(history.paths().count(), 1);
        let marks: Vec<_> = history.point_marks().map(|(at, _)| at.x).collect();
        assert_eq!(marks, vec![1.0, 3.0]);
        assert_eq!(
            history.kinds().collect::<Vec<_>>(),
            vec![PrimitiveKind::Point, PrimitiveKind::Path, PrimitiveKind::Point]
        );
    }

    #[test]
    fn try_append_respects_limit() {
        let mut history = DrawingHistory::new();
        assert!(history.try_append(path(0.0), 1));
        assert!(!history.try_append(dot(1.0), 1));
        assert_eq!(history.len(), 1);
        assert!(history.try_append(dot(1.0), 0));
    }
}
