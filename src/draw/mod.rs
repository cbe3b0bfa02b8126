//! Rendering primitives and drawing history (Cairo-based).
//!
//! This module defines the core drawing types of the surface:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`ColorPalette`]: the cyclable pen palette
//! - [`Primitive`]: finalized vector paths and point marks
//! - [`DrawingHistory`]: ordered log of committed primitives with undo
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod history;
pub mod palette;
pub mod primitive;
pub mod render;

// Re-export commonly used types at module level
pub use color::Color;
pub use history::DrawingHistory;
pub use palette::ColorPalette;
pub use primitive::{Primitive, PrimitiveKind};
pub use render::{render_background, render_history, render_point_mark, render_vector_path};
