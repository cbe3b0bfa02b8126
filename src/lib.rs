//! Drawing core for a Sensel-style pressure pad.
//!
//! Raw sensor records come in over a byte transport, get parsed into samples,
//! fused into strokes with an end-of-stroke watchdog, and end up as vector
//! paths and point marks in an undoable drawing history that can be rendered
//! and exported as JPEG. The binary wires these pieces to a device node and
//! OS signals; the library is shared with the schema dump tool and tests.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod signals;
pub mod surface;
pub mod transport;
pub mod util;
pub mod watchdog;

pub use config::Config;
