//! Messages accepted by the surface context.

use crate::input::GestureEvent;
use crate::transport::TransportState;

/// Everything that mutates drawing state arrives as one of these.
///
/// The transport reader thread, the watchdog timer task and the signal thread
/// all send into the same unbounded queue; the surface context is the only
/// receiver.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    /// Lines delivered by one transport read
    Batch(Vec<String>),
    /// End-of-stroke deadline fired for the given watchdog generation
    WatchdogExpired(u64),
    /// Gesture recognised outside the record stream
    Gesture(GestureEvent),
    /// Transport session status change
    TransportState(TransportState),
    /// Wipe the canvas
    Clear,
    /// Rasterize the history to the next JPEG
    Export,
    SetGestureMode(bool),
    ToggleGestureMode,
    /// Close any open stroke, run the exit export if configured and stop
    Shutdown,
}
