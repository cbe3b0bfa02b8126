//! Off-screen raster the canvas is drawn into.

use crate::draw::Color;
use crate::input::CanvasState;

/// ARGB32 image surface holding the latest rendered frame.
pub struct BackingSurface {
    surface: cairo::ImageSurface,
    width: u32,
    height: u32,
}

impl BackingSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, cairo::Error> {
        let w = i32::try_from(width).map_err(|_| cairo::Error::InvalidSize)?;
        let h = i32::try_from(height).map_err(|_| cairo::Error::InvalidSize)?;
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
        Ok(Self {
            surface,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Redraws the whole frame from `canvas`.
    pub fn render(&mut self, canvas: &mut CanvasState, background: Color) -> Result<(), cairo::Error> {
        let ctx = cairo::Context::new(&self.surface)?;
        canvas.render_frame(&ctx, background);
        drop(ctx);
        self.surface.flush();
        Ok(())
    }

    /// Reads one premultiplied ARGB32 pixel of the last frame.
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let stride = self.surface.stride() as usize;
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let bytes = data.get(offset..offset + 4)?;
        Some(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
