//! Sensor input handling and the stroke state machine.
//!
//! This module turns raw transport records into drawing actions. Records are
//! parsed into samples, fused into begin/extend/commit commands, and applied
//! to the canvas state which owns the history, the palette and the stroke in
//! progress. Gestures arrive alongside and map onto palette and undo actions.

pub mod events;
pub mod fusion;
pub mod gesture;
pub mod record;
pub mod state;
pub mod stroke;

// Re-export commonly used types at module level
pub use events::{Direction, FingerCount, GestureEvent, TouchEvent};
pub use fusion::{DrawingCommand, FusionEngine, SurfaceMapping};
pub use gesture::{GestureDetector, GestureShortcut, NoGestures, TaggedGestureDetector};
pub use record::{InputSample, ParseError, RecordParser};
pub use state::{CanvasState, DrawingState};
pub use stroke::StrokeSegment;
