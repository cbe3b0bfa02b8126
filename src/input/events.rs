//! Input event types shared by the record parser, the fusion engine and the
//! gesture dispatcher.

use std::fmt;
use std::str::FromStr;

/// Contact phase reported by the sensor for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    /// Contact touched down
    Start,
    /// Contact moved while down
    Move,
    /// Contact lifted
    End,
    /// Record could not be decoded; never forwarded to fusion
    Invalid,
}

impl TouchEvent {
    /// Maps a wire event code to a touch event.
    ///
    /// Codes follow the sensor's contact-state numbering: `1` start, `2` move,
    /// `3` end. Anything else (including `0`, the sensor's own invalid state) is
    /// [`TouchEvent::Invalid`].
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => TouchEvent::Start,
            "2" => TouchEvent::Move,
            "3" => TouchEvent::End,
            _ => TouchEvent::Invalid,
        }
    }

    pub fn is_valid(self) -> bool {
        self != TouchEvent::Invalid
    }
}

/// Swipe direction reported by the gesture detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Number of fingers involved in a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerCount {
    One,
    Two,
    Three,
    Four,
}

impl FingerCount {
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(FingerCount::One),
            2 => Some(FingerCount::Two),
            3 => Some(FingerCount::Three),
            4 => Some(FingerCount::Four),
            _ => None,
        }
    }
}

/// A recognised gesture as delivered by the (external) gesture detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    /// Whether the gesture began with a long press
    pub long_press: bool,
    pub direction: Direction,
    pub fingers: FingerCount,
}

impl GestureEvent {
    pub fn swipe(direction: Direction, fingers: FingerCount) -> Self {
        Self {
            long_press: false,
            direction,
            fingers,
        }
    }
}
