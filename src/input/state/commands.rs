use crate::input::fusion::DrawingCommand;
use crate::input::stroke::StrokeSegment;
use log::warn;

use super::{CanvasState, DrawingState};

impl CanvasState {
    /// Applies one fusion command.
    ///
    /// # Behavior
    /// - `Begin`: opens a new point-mark candidate at the position
    /// - `Extend`: adds a point, promoting the stroke to a vector path
    /// - `Commit`: finalizes the stroke in the palette's current color and
    ///   returns to Idle
    pub fn apply(&mut self, command: DrawingCommand) {
        match command {
            DrawingCommand::Begin(point) => {
                if matches!(self.state, DrawingState::Stroking(_)) {
                    warn!("Stroke begun while another was open; finalizing the old one");
                    self.commit_stroke();
                }
                self.state = DrawingState::Stroking(StrokeSegment::new(point));
                self.needs_redraw = true;
            }
            DrawingCommand::Extend(point) => {
                match &mut self.state {
                    DrawingState::Stroking(stroke) => stroke.extend(point),
                    DrawingState::Idle => {
                        self.state = DrawingState::Stroking(StrokeSegment::new(point));
                    }
                }
                self.needs_redraw = true;
            }
            DrawingCommand::Commit => self.commit_stroke(),
        }
    }

    /// Finalizes the open stroke, if any, into the history.
    fn commit_stroke(&mut self) {
        let DrawingState::Stroking(stroke) = std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return;
        };

        let primitive = stroke.finish(self.palette.current());
        log::debug!("Committing {:?}", primitive.kind());
        if !self.history.try_append(primitive, self.max_primitives) {
            warn!(
                "Primitive limit ({}) reached; discarding new stroke",
                self.max_primitives
            );
        }
        self.needs_redraw = true;
    }
}
