use crate::input::events::GestureEvent;
use crate::input::gesture::{GestureShortcut, shortcut_for};
use log::{debug, info};

use super::{CanvasState, DrawingState};

impl CanvasState {
    /// Removes the most recent primitive.
    ///
    /// Returns `false` and changes nothing when the history is empty.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo();
        if undone {
            self.needs_redraw = true;
        }
        undone
    }

    /// Wipes the history and any in-progress stroke.
    pub fn clear(&mut self) {
        self.history.clear();
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
        info!("Canvas cleared");
    }

    pub fn cycle_color_forward(&mut self) {
        let color = self.palette.cycle_forward();
        debug!("Pen color -> {:?} (index {})", color, self.palette.index());
        self.needs_redraw = true;
    }

    pub fn cycle_color_backward(&mut self) {
        let color = self.palette.cycle_backward();
        debug!("Pen color -> {:?} (index {})", color, self.palette.index());
        self.needs_redraw = true;
    }

    /// Runs the shortcut bound to a gesture.
    ///
    /// Returns `true` when the gesture was bound to something.
    pub fn on_gesture(&mut self, event: &GestureEvent) -> bool {
        debug!(
            "Gesture: {} with {:?} (long press: {})",
            event.direction, event.fingers, event.long_press
        );

        match shortcut_for(event, self.horizontal_swipe_undo) {
            Some(GestureShortcut::CycleForwardAndUndo) => {
                self.cycle_color_forward();
                self.undo();
                true
            }
            Some(GestureShortcut::CycleBackwardAndUndo) => {
                self.cycle_color_backward();
                self.undo();
                true
            }
            Some(GestureShortcut::Undo) => {
                self.undo();
                true
            }
            None => false,
        }
    }
}
