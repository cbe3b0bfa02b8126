//! The surface context: single owner of all drawing state.
//!
//! Transport batches, watchdog expiries, gestures and signal requests all
//! arrive as [`SurfaceCommand`]s on one queue. [`FusionSession`] drains that
//! queue, drives parsing, fusion and the canvas, and re-renders the backing
//! surface once per drained burst.

mod backing;
mod command;
mod session;
#[cfg(test)]
mod tests;

pub use backing::BackingSurface;
pub use command::SurfaceCommand;
pub use session::FusionSession;
