//! JPEG export of the committed drawing.
//!
//! Exports rasterize the history over a forced background color and write
//! `<n>.jpg` files numbered from 0 into the export directory. Failures are
//! reported to the caller, which logs them; nothing here panics.

pub mod file;
pub mod types;

mod exporter;

pub use exporter::Exporter;
pub use types::ExportError;
