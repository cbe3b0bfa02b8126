//! Configuration file support for senselpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/senselpad/config.toml`. Settings include the record wire format,
//! fusion thresholds, watchdog timing, palette and export preferences.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{
    DrawingConfig, ExportConfig, FusionConfig, GestureConfig, ProtocolConfig, SurfaceConfig,
    WatchdogConfig,
};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [protocol]
/// delimiter = ","
/// diagnostic_fields = 2
///
/// [fusion]
/// force_threshold = 500.0
/// gap_threshold = 20.0
///
/// [watchdog]
/// delay_ms = 100
///
/// [drawing]
/// palette = ["black", "red", "blue", "green"]
/// stroke_width = 20.0
///
/// [export]
/// directory = "~/Pictures/senselpad"
/// quality = 90
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Sensor record wire format
    #[serde(default)]
    pub protocol: ProtocolConfig,

    /// Stroke fusion thresholds and device mapping
    #[serde(default)]
    pub fusion: FusionConfig,

    /// End-of-stroke watchdog timing
    #[serde(default)]
    pub watchdog: WatchdogConfig,

    /// Drawing surface dimensions
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Palette and pen settings
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Gesture shortcut settings
    #[serde(default)]
    pub gestures: GestureConfig,

    /// Raster export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `diagnostic_fields`: 0 - 8
    /// - fusion thresholds and extents: positive
    /// - `watchdog.delay_ms`: 10 - 5000
    /// - `surface.width`/`height`: 16 - 8192
    /// - `stroke_width`: 1.0 - 100.0
    /// - `export.quality`: 1 - 100
    pub fn validate_and_clamp(&mut self) {
        if self.protocol.diagnostic_fields > 8 {
            log::warn!(
                "Invalid diagnostic_fields {}, clamping to 0-8 range",
                self.protocol.diagnostic_fields
            );
            self.protocol.diagnostic_fields = 8;
        }

        if self.protocol.delimiter == '\n' || self.protocol.delimiter == '\r' {
            log::warn!("Line terminators cannot delimit fields, falling back to ','");
            self.protocol.delimiter = ',';
        }

        if !(self.fusion.force_threshold >= 0.0) {
            log::warn!(
                "Invalid force_threshold {:.1}, falling back to 0.0",
                self.fusion.force_threshold
            );
            self.fusion.force_threshold = 0.0;
        }

        if !(self.fusion.gap_threshold > 0.0) {
            log::warn!(
                "Invalid gap_threshold {:.1}, falling back to 20.0",
                self.fusion.gap_threshold
            );
            self.fusion.gap_threshold = 20.0;
        }

        if !(self.fusion.touch_tolerance >= 0.0) {
            log::warn!(
                "Invalid touch_tolerance {:.1}, falling back to 1.0",
                self.fusion.touch_tolerance
            );
            self.fusion.touch_tolerance = 1.0;
        }

        if !(self.fusion.device_x_extent > 0.0) {
            log::warn!(
                "Invalid device_x_extent {:.1}, falling back to 230.0",
                self.fusion.device_x_extent
            );
            self.fusion.device_x_extent = 230.0;
        }

        if !(self.fusion.device_y_extent > 0.0) {
            log::warn!(
                "Invalid device_y_extent {:.1}, falling back to 120.0",
                self.fusion.device_y_extent
            );
            self.fusion.device_y_extent = 120.0;
        }

        // Watchdog delay: 10 - 5000 ms
        if !(10..=5000).contains(&self.watchdog.delay_ms) {
            log::warn!(
                "Invalid watchdog delay_ms {}, clamping to 10-5000 range",
                self.watchdog.delay_ms
            );
            self.watchdog.delay_ms = self.watchdog.delay_ms.clamp(10, 5000);
        }

        if !(16..=8192).contains(&self.surface.width) {
            log::warn!(
                "Invalid surface width {}, clamping to 16-8192 range",
                self.surface.width
            );
            self.surface.width = self.surface.width.clamp(16, 8192);
        }

        if !(16..=8192).contains(&self.surface.height) {
            log::warn!(
                "Invalid surface height {}, clamping to 16-8192 range",
                self.surface.height
            );
            self.surface.height = self.surface.height.clamp(16, 8192);
        }

        // Stroke width: 1.0 - 100.0
        if !(1.0..=100.0).contains(&self.drawing.stroke_width) {
            log::warn!(
                "Invalid stroke_width {:.1}, clamping to 1.0-100.0 range",
                self.drawing.stroke_width
            );
            self.drawing.stroke_width = if self.drawing.stroke_width.is_nan() {
                20.0
            } else {
                self.drawing.stroke_width.clamp(1.0, 100.0)
            };
        }

        // JPEG quality: 1 - 100
        if !(1..=100).contains(&self.export.quality) {
            log::warn!(
                "Invalid export quality {}, clamping to 1-100 range",
                self.export.quality
            );
            self.export.quality = self.export.quality.clamp(1, 100);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/senselpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("senselpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, falling back to defaults when
    /// the file does not exist. All loaded values are validated and clamped.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        config.validate_and_clamp();
        Ok(config)
    }

    /// Parses a TOML document without validation.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = Config::default();
        assert_eq!(config.protocol.delimiter, ',');
        assert_eq!(config.fusion.force_threshold, 500.0);
        assert_eq!(config.fusion.gap_threshold, 20.0);
        assert_eq!(config.watchdog.delay_ms, 100);
        assert_eq!(config.drawing.palette.len(), 4);
        assert!(config.gestures.horizontal_swipe_undo);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            [fusion]
            force_threshold = 250.0

            [drawing]
            palette = ["red", [0, 0, 255]]
            "#,
        )
        .unwrap();
        assert_eq!(config.fusion.force_threshold, 250.0);
        assert_eq!(config.fusion.gap_threshold, 20.0);
        assert_eq!(config.drawing.palette[1], ColorSpec::Rgb([0, 0, 255]));
        assert_eq!(config.surface.width, 1080);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.watchdog.delay_ms = 0;
        config.drawing.stroke_width = 500.0;
        config.export.quality = 0;
        config.protocol.diagnostic_fields = 40;
        config.fusion.gap_threshold = -3.0;

        config.validate_and_clamp();

        assert_eq!(config.watchdog.delay_ms, 10);
        assert_eq!(config.drawing.stroke_width, 100.0);
        assert_eq!(config.export.quality, 1);
        assert_eq!(config.protocol.diagnostic_fields, 8);
        assert_eq!(config.fusion.gap_threshold, 20.0);
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.surface.height, 1920);
    }

    #[test]
    fn load_from_validates_file_contents() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[watchdog]\ndelay_ms = 99999").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.watchdog.delay_ms, 5000);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[watchdog\ndelay_ms = ").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }
}
