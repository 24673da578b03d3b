//! Monochrome pixel surface for the LED matrix.

use crate::{MATRIX_HEIGHT, MATRIX_WIDTH, MODULE_SIZE};

/// Monochrome framebuffer covering the whole module chain.
///
/// Coordinates are signed so callers can draw partly off-panel content;
/// anything outside the surface is clipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    /// Pixel data, row-major, `true` = lit.
    data: Vec<bool>,
    /// Width of the surface.
    width: u16,
    /// Height of the surface.
    height: u16,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// Creates a new surface for the default four-module chain, all dark.
    pub fn new() -> Self {
        Self::with_dimensions(MATRIX_WIDTH, MATRIX_HEIGHT)
    }

    /// Creates a surface sized for `modules` chained 8x8 modules.
    pub fn for_modules(modules: u8) -> Self {
        Self::with_dimensions(MODULE_SIZE * modules as u16, MODULE_SIZE)
    }

    /// Creates a surface with custom dimensions.
    pub fn with_dimensions(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            data: vec![false; size],
            width,
            height,
        }
    }

    /// Returns the width of the surface.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Returns the height of the surface.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns the number of whole modules the surface spans.
    pub fn modules(&self) -> u16 {
        self.width / MODULE_SIZE
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.data.fill(false);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Sets a pixel at the given coordinates. Off-surface writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx] = on;
        }
    }

    /// Gets a pixel at the given coordinates.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<bool> {
        self.index(x, y).map(|idx| self.data[idx])
    }

    /// Counts lit pixels.
    pub fn lit_count(&self) -> usize {
        self.data.iter().filter(|&&on| on).count()
    }

    /// Packs one 8-pixel row slice of a module into a byte, MSB = leftmost column.
    pub fn module_row(&self, module: u16, row: u16) -> u8 {
        let x0 = (module * MODULE_SIZE) as i32;
        (0..MODULE_SIZE as i32).fold(0u8, |acc, col| {
            let bit = self.get_pixel(x0 + col, row as i32).unwrap_or(false);
            (acc << 1) | bit as u8
        })
    }

    /// Converts the surface to 8-bit grayscale bytes for PNG encoding.
    pub fn to_luma8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&on| if on { 255 } else { 0 })
            .collect()
    }
}

impl std::fmt::Display for Surface {
    /// Renders the surface as text, `#` for lit pixels.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.data.chunks(self.width as usize) {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_ops() {
        let mut surface = Surface::new();
        assert_eq!(surface.width(), 32);
        assert_eq!(surface.height(), 8);
        assert_eq!(surface.modules(), 4);

        surface.set_pixel(10, 3, true);
        assert_eq!(surface.get_pixel(10, 3), Some(true));
        assert_eq!(surface.lit_count(), 1);

        surface.clear();
        assert_eq!(surface.get_pixel(10, 3), Some(false));
    }

    #[test]
    fn test_clipping() {
        let mut surface = Surface::new();
        surface.set_pixel(-1, 0, true);
        surface.set_pixel(32, 0, true);
        surface.set_pixel(0, 8, true);
        surface.set_pixel(0, -3, true);
        assert_eq!(surface.lit_count(), 0);
        assert_eq!(surface.get_pixel(-1, 0), None);
    }

    #[test]
    fn test_module_row_packing() {
        let mut surface = Surface::new();
        // Leftmost and rightmost columns of the second module
        surface.set_pixel(8, 2, true);
        surface.set_pixel(15, 2, true);
        assert_eq!(surface.module_row(1, 2), 0b1000_0001);
        assert_eq!(surface.module_row(0, 2), 0);
    }

    #[test]
    fn test_for_modules() {
        let surface = Surface::for_modules(2);
        assert_eq!(surface.width(), 16);
        assert_eq!(surface.to_luma8().len(), 16 * 8);
    }
}
