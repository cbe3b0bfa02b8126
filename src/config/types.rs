//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Wire format of the sensor record stream.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProtocolConfig {
    /// Field separator inside one record line
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Number of trailing diagnostic fields after event, x, y and force (valid range: 0 - 8)
    #[serde(default = "default_diagnostic_fields")]
    pub diagnostic_fields: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            diagnostic_fields: default_diagnostic_fields(),
        }
    }
}

/// Stroke fusion tuning.
///
/// Extents describe the sensor's active area in device units; they drive the
/// linear mapping onto the drawing surface.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FusionConfig {
    /// Samples lighter than this are ignored unless they end a stroke
    #[serde(default = "default_force_threshold")]
    pub force_threshold: f64,

    /// Jumps longer than this (surface units) split the stroke in two
    #[serde(default = "default_gap_threshold")]
    pub gap_threshold: f64,

    /// Minimum per-axis movement (surface units) before a move extends the stroke
    #[serde(default = "default_touch_tolerance")]
    pub touch_tolerance: f64,

    /// Device x extent; device x maps onto the surface height, inverted
    #[serde(default = "default_device_x_extent")]
    pub device_x_extent: f64,

    /// Device y extent; device y maps onto the surface width
    #[serde(default = "default_device_y_extent")]
    pub device_y_extent: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            force_threshold: default_force_threshold(),
            gap_threshold: default_gap_threshold(),
            touch_tolerance: default_touch_tolerance(),
            device_x_extent: default_device_x_extent(),
            device_y_extent: default_device_y_extent(),
        }
    }
}

/// End-of-stroke watchdog settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WatchdogConfig {
    /// Silence (ms) after which an open stroke is ended (valid range: 10 - 5000)
    #[serde(default = "default_watchdog_delay_ms")]
    pub delay_ms: u64,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_watchdog_delay_ms(),
        }
    }
}

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    #[serde(default = "default_surface_width")]
    pub width: u32,

    #[serde(default = "default_surface_height")]
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
        }
    }
}

/// Drawing-related settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Pen colors in cycling order; the first one is active at startup
    #[serde(default = "default_palette")]
    pub palette: Vec<ColorSpec>,

    /// Pen width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Maximum number of primitives kept in history (0 = unlimited)
    #[serde(default)]
    pub max_primitives: usize,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            stroke_width: default_stroke_width(),
            max_primitives: 0,
        }
    }
}

/// Gesture shortcut settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GestureConfig {
    /// Undo on a left or right swipe with any number of fingers
    #[serde(default = "default_horizontal_swipe_undo")]
    pub horizontal_swipe_undo: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            horizontal_swipe_undo: default_horizontal_swipe_undo(),
        }
    }
}

/// Raster export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Target directory (`~` expanded); defaults to `<Pictures>/senselpad`
    #[serde(default)]
    pub directory: Option<String>,

    /// Background painted behind the strokes
    #[serde(default = "default_export_background")]
    pub background_color: ColorSpec,

    /// JPEG quality (valid range: 1 - 100)
    #[serde(default = "default_export_quality")]
    pub quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            background_color: default_export_background(),
            quality: default_export_quality(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_delimiter() -> char {
    ','
}

fn default_diagnostic_fields() -> usize {
    2
}

fn default_force_threshold() -> f64 {
    500.0
}

fn default_gap_threshold() -> f64 {
    20.0
}

fn default_touch_tolerance() -> f64 {
    1.0
}

fn default_device_x_extent() -> f64 {
    230.0
}

fn default_device_y_extent() -> f64 {
    120.0
}

fn default_watchdog_delay_ms() -> u64 {
    100
}

fn default_surface_width() -> u32 {
    1080
}

fn default_surface_height() -> u32 {
    1920
}

fn default_palette() -> Vec<ColorSpec> {
    ["black", "red", "blue", "green"]
        .into_iter()
        .map(|name| ColorSpec::Name(name.to_string()))
        .collect()
}

fn default_stroke_width() -> f64 {
    20.0
}

fn default_horizontal_swipe_undo() -> bool {
    true
}

fn default_export_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_export_quality() -> u8 {
    100
}
