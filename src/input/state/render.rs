use crate::draw::{Color, render_background, render_history, render_point_mark, render_vector_path};

use super::{CanvasState, DrawingState};

impl CanvasState {
    /// Renders the in-progress stroke directly to a Cairo context.
    ///
    /// Uses the palette's current color. A stroke with a single point is
    /// shown as a point mark; longer strokes are drawn from a borrow of their
    /// points, without cloning.
    ///
    /// # Returns
    /// `true` if a stroke was rendered, `false` when idle
    pub fn render_provisional_stroke(&self, ctx: &cairo::Context) -> bool {
        let DrawingState::Stroking(stroke) = &self.state else {
            return false;
        };

        let color = self.palette.current();
        if stroke.is_point() {
            render_point_mark(ctx, stroke.last(), color, self.stroke_width);
        } else {
            render_vector_path(ctx, stroke.points(), color, self.stroke_width);
        }
        true
    }

    /// Draws the full frame: background, committed history, then the open
    /// stroke on top. Clears `needs_redraw`.
    pub fn render_frame(&mut self, ctx: &cairo::Context, background: Color) {
        render_background(ctx, background);
        render_history(ctx, &self.history, self.stroke_width);
        self.render_provisional_stroke(ctx);
        self.needs_redraw = false;
    }
}
