//! Glyph compositing onto the matrix surface.

use subcount_hw::Surface;

use super::font::Glyph;

/// Rows in every glyph.
pub const GLYPH_HEIGHT: u16 = 8;

/// Draws `width` x `height` pixels of `glyph` with its top-left at (`x`, `y`).
///
/// Both lit and dark bits are written, so a glyph fully covers its cell.
/// Columns past the eighth and rows past the last glyph row draw dark.
/// Pixels outside the surface are clipped.
pub fn draw_glyph(surface: &mut Surface, glyph: &Glyph, x: i32, y: i32, width: u16, height: u16) {
    for iy in 0..height {
        let bits = glyph.row(iy as usize);
        let mut mask: u8 = 0b1000_0000;

        for ix in 0..width {
            surface.set_pixel(x + ix as i32, y + iy as i32, bits & mask != 0);
            mask >>= 1;
        }
    }
}
