//! Cairo-based rendering functions for primitives.

use super::color::Color;
use super::history::DrawingHistory;
use crate::util::{self, Point};

/// Fills the entire canvas with a solid background color.
///
/// Should be called before rendering primitives. Uses the `Source` operator so
/// any previous content (including alpha) is replaced.
pub fn render_background(ctx: &cairo::Context, color: Color) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Source);
    color.apply(ctx);
    let _ = ctx.paint(); // Ignore errors - a failed paint leaves the old background
    let _ = ctx.restore();
}

/// Renders every committed primitive of the history.
///
/// Vector paths are drawn first, then point marks, each in the color recorded
/// when it was committed.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `history` - Committed primitives
/// * `thick` - Pen width in pixels (also the point-mark diameter)
pub fn render_history(ctx: &cairo::Context, history: &DrawingHistory, thick: f64) {
    for (points, color) in history.paths() {
        render_vector_path(ctx, points, color, thick);
    }
    for (at, color) in history.point_marks() {
        render_point_mark(ctx, at, color, thick);
    }
}

/// Render a freehand stroke smoothed with quadratic segments.
///
/// Each raw point acts as the control point of a curve that ends halfway to
/// the next point; the stroke then finishes with a straight segment to the
/// last raw point. Accepts a borrowed slice so the in-progress stroke can be
/// drawn without cloning.
pub fn render_vector_path(ctx: &cairo::Context, points: &[Point], color: Color, thick: f64) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };

    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    let mut pen = first;
    let mut control = first;
    for &next in rest {
        let end = control.midpoint(next);
        let (c1, c2) = util::quad_to_cubic(pen, control, end);
        ctx.curve_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
        pen = end;
        control = next;
    }
    ctx.line_to(control.x, control.y);

    let _ = ctx.stroke();
}

/// Render a round dot with the pen width as its diameter.
pub fn render_point_mark(ctx: &cairo::Context, at: Point, color: Color, thick: f64) {
    color.apply(ctx);
    ctx.new_sub_path();
    ctx.arc(at.x, at.y, (thick / 2.0).max(0.5), 0.0, std::f64::consts::PI * 2.0);
    let _ = ctx.fill();
}
