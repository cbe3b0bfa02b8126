use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, RgbImage};

use super::file::{default_export_dir, ensure_directory_exists, expand_tilde, export_filename};
use super::types::ExportError;
use crate::config::ExportConfig;
use crate::draw::{Color, DrawingHistory, render_background, render_history};

/// Writes numbered JPEG snapshots of the drawing history.
///
/// The counter starts at 0 and only advances after a file was written, so a
/// failed export is retried under the same name. Existing files are
/// overwritten.
#[derive(Debug, Clone)]
pub struct Exporter {
    directory: PathBuf,
    background: Color,
    quality: u8,
    next_index: u64,
}

impl Exporter {
    pub fn new(directory: PathBuf, background: Color, quality: u8) -> Self {
        Self {
            directory,
            background,
            quality: quality.clamp(1, 100),
            next_index: 0,
        }
    }

    /// Builds an exporter from the `[export]` config section.
    pub fn from_config(config: &ExportConfig) -> Self {
        let directory = config
            .directory
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(default_export_dir);
        Self::new(directory, config.background_color.to_color(), config.quality)
    }

    /// Replaces the target directory (e.g. from the command line).
    pub fn with_directory(mut self, directory: PathBuf) -> Self {
        self.directory = directory;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Counter value the next successful export will use.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Rasterizes `history` at `width`x`height` and writes the next JPEG.
    ///
    /// # Returns
    /// Path of the written file
    pub fn export(
        &mut self,
        history: &DrawingHistory,
        thick: f64,
        width: u32,
        height: u32,
    ) -> Result<PathBuf, ExportError> {
        let image = rasterize(history, thick, width, height, self.background)?;

        let directory = ensure_directory_exists(&self.directory)?;
        let path = directory.join(export_filename(self.next_index));
        log::info!(
            "Exporting {} primitives to {} ({}x{})",
            history.len(),
            path.display(),
            width,
            height
        );

        let mut writer = BufWriter::new(File::create(&path)?);
        let mut encoder = JpegEncoder::new_with_quality(&mut writer, self.quality);
        encoder.encode(image.as_raw(), width, height, ColorType::Rgb8)?;
        writer.flush()?;

        self.next_index += 1;
        log::info!("Export saved: {}", path.display());
        Ok(path)
    }
}

/// Renders the history over `background` and converts it to packed RGB.
pub(crate) fn rasterize(
    history: &DrawingHistory,
    thick: f64,
    width: u32,
    height: u32,
    background: Color,
) -> Result<RgbImage, ExportError> {
    let invalid = || ExportError::InvalidSize { width, height };
    let w = i32::try_from(width).map_err(|_| invalid())?;
    let h = i32::try_from(height).map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }

    let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        // Background is forced opaque so the JPEG never sees transparency
        render_background(&ctx, Color { a: 1.0, ..background });
        render_history(&ctx, history, thick);
    }
    surface.flush();

    let stride = surface.stride() as usize;
    let data = surface
        .data()
        .map_err(|e| ExportError::Surface(e.to_string()))?;

    let mut image = RgbImage::new(width, height);
    for (y, row) in data.chunks(stride).take(height as usize).enumerate() {
        for x in 0..width as usize {
            let px = &row[x * 4..x * 4 + 4];
            let argb = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
            image.put_pixel(x as u32, y as u32, image::Rgb(unpremultiply(argb)));
        }
    }
    Ok(image)
}

/// Converts one premultiplied ARGB32 pixel to straight RGB.
fn unpremultiply(argb: u32) -> [u8; 3] {
    let a = (argb >> 24) & 0xFF;
    let channel = |shift: u32| {
        let c = (argb >> shift) & 0xFF;
        if a == 0 || a == 255 {
            c as u8
        } else {
            ((c * 255 + a / 2) / a).min(255) as u8
        }
    };
    [channel(16), channel(8), channel(0)]
}
