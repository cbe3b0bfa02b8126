//! Gesture detectors and the gesture shortcut table.
//!
//! Gesture recognition itself lives outside this crate; a [`GestureDetector`]
//! sees every raw record line and may report a recognised gesture. The
//! shortcut table then maps a small vocabulary of gestures onto history and
//! palette actions.

use super::events::{Direction, FingerCount, GestureEvent};

/// Sink for raw record lines that may recognise gestures.
pub trait GestureDetector: Send {
    /// Feeds one raw line; returns a gesture once one is recognised.
    fn feed(&mut self, line: &str) -> Option<GestureEvent>;
}

/// Detector that never reports anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGestures;

impl GestureDetector for NoGestures {
    fn feed(&mut self, _line: &str) -> Option<GestureEvent> {
        None
    }
}

/// Decodes gestures that the transport already recognised upstream.
///
/// Such records look like `G,<UP|DOWN|LEFT|RIGHT>,<1-4>,<0|1>` (using the
/// configured delimiter), the last field being the long-press flag. Sensor
/// records never start with `G`, so both kinds can share one stream.
#[derive(Debug, Clone)]
pub struct TaggedGestureDetector {
    delimiter: char,
}

impl TaggedGestureDetector {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl GestureDetector for TaggedGestureDetector {
    fn feed(&mut self, line: &str) -> Option<GestureEvent> {
        let mut fields = line.trim().split(self.delimiter).map(str::trim);
        if !fields.next()?.eq_ignore_ascii_case("g") {
            return None;
        }
        let direction = fields.next()?.parse::<Direction>().ok()?;
        let fingers = FingerCount::from_count(fields.next()?.parse().ok()?)?;
        let long_press = match fields.next() {
            Some("1") => true,
            Some("0") | None => false,
            Some(_) => return None,
        };
        if fields.next().is_some() {
            return None;
        }
        Some(GestureEvent {
            long_press,
            direction,
            fingers,
        })
    }
}

/// History/palette action bound to a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureShortcut {
    /// Next palette color, then undo the last primitive
    CycleForwardAndUndo,
    /// Previous palette color, then undo the last primitive
    CycleBackwardAndUndo,
    /// Undo the last primitive
    Undo,
}

/// Looks up the shortcut bound to `event`.
///
/// Three-finger vertical swipes re-color ("retry") the last stroke. Horizontal
/// swipes with any finger count undo when `horizontal_undo` is enabled.
pub fn shortcut_for(event: &GestureEvent, horizontal_undo: bool) -> Option<GestureShortcut> {
    match (event.direction, event.fingers) {
        (Direction::Up, FingerCount::Three) => Some(GestureShortcut::CycleForwardAndUndo),
        (Direction::Down, FingerCount::Three) => Some(GestureShortcut::CycleBackwardAndUndo),
        (Direction::Left | Direction::Right, _) if horizontal_undo => Some(GestureShortcut::Undo),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_finger_vertical_swipes_cycle_and_undo() {
        let up = GestureEvent::swipe(Direction::Up, FingerCount::Three);
        let down = GestureEvent::swipe(Direction::Down, FingerCount::Three);
        assert_eq!(
            shortcut_for(&up, true),
            Some(GestureShortcut::CycleForwardAndUndo)
        );
        assert_eq!(
            shortcut_for(&down, false),
            Some(GestureShortcut::CycleBackwardAndUndo)
        );
    }

    #[test]
    fn other_vertical_swipes_do_nothing() {
        let up_two = GestureEvent::swipe(Direction::Up, FingerCount::Two);
        let down_four = GestureEvent::swipe(Direction::Down, FingerCount::Four);
        assert_eq!(shortcut_for(&up_two, true), None);
        assert_eq!(shortcut_for(&down_four, true), None);
    }

    #[test]
    fn horizontal_swipes_undo_only_when_enabled() {
        for fingers in [FingerCount::One, FingerCount::Three] {
            let left = GestureEvent::swipe(Direction::Left, fingers);
            let right = GestureEvent::swipe(Direction::Right, fingers);
            assert_eq!(shortcut_for(&left, true), Some(GestureShortcut::Undo));
            assert_eq!(shortcut_for(&right, true), Some(GestureShortcut::Undo));
            assert_eq!(shortcut_for(&left, false), None);
        }
    }

    #[test]
    fn tagged_detector_decodes_gesture_records() {
        let mut detector = TaggedGestureDetector::new(',');
        assert_eq!(
            detector.feed("G,UP,3,0"),
            Some(GestureEvent::swipe(Direction::Up, FingerCount::Three))
        );
        assert_eq!(
            detector.feed("g, left, 2, 1"),
            Some(GestureEvent {
                long_press: true,
                direction: Direction::Left,
                fingers: FingerCount::Two,
            })
        );
    }

    #[test]
    fn tagged_detector_ignores_sensor_records_and_garbage() {
        let mut detector = TaggedGestureDetector::new(',');
        assert_eq!(detector.feed("1,10,20,600,0,1"), None);
        assert_eq!(detector.feed("G,SIDEWAYS,3,0"), None);
        assert_eq!(detector.feed("G,UP,7,0"), None);
        assert_eq!(detector.feed("G,UP,3,2"), None);
        assert_eq!(detector.feed("G,UP,3,0,extra"), None);
        assert_eq!(detector.feed(""), None);
    }
}
