//! Canvas state: committed history, palette and the in-progress stroke.

use crate::config::Config;
use crate::draw::{ColorPalette, DrawingHistory};
use crate::input::stroke::StrokeSegment;

/// Current drawing mode state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// No contact on the pad
    Idle,
    /// A stroke is open and receiving points
    Stroking(StrokeSegment),
}

/// Main canvas state containing everything that gets drawn.
///
/// Owned by the surface context; mutated by fusion commands, gestures and
/// explicit clear requests. Every visible mutation sets `needs_redraw`.
pub struct CanvasState {
    /// Committed primitives in draw order
    pub history: DrawingHistory,
    /// Pen palette; its current color tags each primitive at commit time
    pub palette: ColorPalette,
    /// Pen width in pixels
    pub stroke_width: f64,
    /// In-progress stroke state machine
    pub state: DrawingState,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Maximum number of primitives kept in history (0 = unlimited)
    pub max_primitives: usize,
    /// Whether left/right swipes undo
    pub horizontal_swipe_undo: bool,
}

impl CanvasState {
    /// Creates an empty canvas with the given settings.
    ///
    /// # Arguments
    /// * `palette` - Pen colors, starting at the first one
    /// * `stroke_width` - Pen width in pixels
    /// * `max_primitives` - History cap (0 = unlimited)
    /// * `horizontal_swipe_undo` - Whether left/right swipes undo
    pub fn with_defaults(
        palette: ColorPalette,
        stroke_width: f64,
        max_primitives: usize,
        horizontal_swipe_undo: bool,
    ) -> Self {
        Self {
            history: DrawingHistory::new(),
            palette,
            stroke_width,
            state: DrawingState::Idle,
            needs_redraw: true,
            max_primitives,
            horizontal_swipe_undo,
        }
    }

    /// Builds the canvas from the drawing and gesture sections of `config`.
    pub fn from_config(config: &Config) -> Self {
        let colors = config
            .drawing
            .palette
            .iter()
            .map(|spec| spec.to_color())
            .collect();
        Self::with_defaults(
            ColorPalette::new(colors),
            config.drawing.stroke_width,
            config.drawing.max_primitives,
            config.gestures.horizontal_swipe_undo,
        )
    }

    /// The stroke currently being drawn, if any.
    pub fn active_stroke(&self) -> Option<&StrokeSegment> {
        match &self.state {
            DrawingState::Stroking(stroke) => Some(stroke),
            DrawingState::Idle => None,
        }
    }
}
