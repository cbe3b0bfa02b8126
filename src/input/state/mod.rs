mod actions;
mod commands;
mod core;
mod render;

pub use core::{CanvasState, DrawingState};
