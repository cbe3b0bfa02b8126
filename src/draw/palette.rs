//! Fixed, cyclable color palette.

use super::color::{BLACK, BLUE, Color, GREEN, RED};

/// Ordered set of pen colors with a current index.
///
/// Cycling wraps in both directions: stepping back from the first color lands
/// on the last one and stepping forward from the last lands on the first.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    colors: Vec<Color>,
    index: usize,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(vec![BLACK, RED, BLUE, GREEN])
    }
}

impl ColorPalette {
    /// Creates a palette starting at its first color.
    ///
    /// An empty color list falls back to the default palette.
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            log::warn!("Empty palette supplied, using default colors");
            return Self::default();
        }
        Self { colors, index: 0 }
    }

    pub fn current(&self) -> Color {
        self.colors[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Advances to the next color, wrapping to the first.
    pub fn cycle_forward(&mut self) -> Color {
        self.index = (self.index + 1) % self.colors.len();
        self.current()
    }

    /// Steps back to the previous color, wrapping to the last.
    pub fn cycle_backward(&mut self) -> Color {
        self.index = self
            .index
            .checked_sub(1)
            .unwrap_or(self.colors.len() - 1);
        self.current()
    }
}
