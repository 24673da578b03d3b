//! Fixed 8x8 bitmap font.
//!
//! Covers space through uppercase `Z` (0x20..=0x5A). Digits and the comma are
//! narrowed so a digit fits a 5-pixel cell with one column of spacing.

/// An 8x8 monochrome glyph, one byte per row, MSB = leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph(pub [u8; 8]);

impl Glyph {
    /// The all-dark glyph.
    pub const BLANK: Glyph = Glyph([0; 8]);

    /// Returns the bit pattern of `row`, or 0 past the last row.
    pub fn row(&self, row: usize) -> u8 {
        self.0.get(row).copied().unwrap_or(0)
    }

    /// Returns true if no pixel is lit.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&row| row == 0)
    }
}

/// First character in the table.
const FIRST: char = ' ';

/// Last character in the table.
const LAST: char = 'Z';

#[rustfmt::skip]
static FONT: [Glyph; 59] = [
    Glyph([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]), // space
    Glyph([0x10, 0x18, 0x18, 0x18, 0x18, 0x00, 0x18, 0x18]), // !
    Glyph([0x28, 0x28, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00]), // "
    Glyph([0x00, 0x0a, 0x7f, 0x14, 0x28, 0xfe, 0x50, 0x00]), // #
    Glyph([0x10, 0x38, 0x54, 0x70, 0x1c, 0x54, 0x38, 0x10]), // $
    Glyph([0x00, 0x60, 0x66, 0x08, 0x10, 0x66, 0x06, 0x00]), // %
    Glyph([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]), // &
    Glyph([0x00, 0x10, 0x18, 0x18, 0x08, 0x00, 0x00, 0x00]), // '
    Glyph([0x02, 0x04, 0x08, 0x08, 0x08, 0x08, 0x08, 0x04]), // (
    Glyph([0x40, 0x20, 0x10, 0x10, 0x10, 0x10, 0x10, 0x20]), // )
    Glyph([0x00, 0x10, 0x54, 0x38, 0x10, 0x38, 0x54, 0x10]), // *
    Glyph([0x00, 0x08, 0x08, 0x08, 0x7f, 0x08, 0x08, 0x08]), // +
    Glyph([0x00, 0x00, 0x00, 0x00, 0x00, 0xc0, 0x40, 0x80]), // ,
    Glyph([0x00, 0x00, 0x00, 0x00, 0x7e, 0x00, 0x00, 0x00]), // -
    Glyph([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x06, 0x06]), // .
    Glyph([0x00, 0x04, 0x04, 0x08, 0x10, 0x20, 0x40, 0x40]), // /
    Glyph([0x60, 0x90, 0x90, 0x90, 0x90, 0x90, 0x60, 0x00]), // 0
    Glyph([0x20, 0x60, 0x20, 0x20, 0x20, 0x20, 0x70, 0x00]), // 1
    Glyph([0x60, 0x90, 0x10, 0x20, 0x40, 0x80, 0xf0, 0x00]), // 2
    Glyph([0x60, 0x90, 0x10, 0x60, 0x10, 0x90, 0x60, 0x00]), // 3
    Glyph([0x80, 0xa0, 0xa0, 0xf0, 0x20, 0x20, 0x20, 0x00]), // 4
    Glyph([0xf0, 0x80, 0xe0, 0x10, 0x10, 0x90, 0x60, 0x00]), // 5
    Glyph([0x60, 0x90, 0x80, 0xe0, 0x90, 0x90, 0x60, 0x00]), // 6
    Glyph([0xf0, 0x10, 0x20, 0x40, 0x40, 0x40, 0x40, 0x00]), // 7
    Glyph([0x60, 0x90, 0x90, 0x60, 0x90, 0x90, 0x60, 0x00]), // 8
    Glyph([0x60, 0x90, 0x90, 0x70, 0x10, 0x90, 0x60, 0x00]), // 9
    Glyph([0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00]), // :
    Glyph([0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x08]), // ;
    Glyph([0x00, 0x10, 0x20, 0x40, 0x80, 0x40, 0x20, 0x10]), // <
    Glyph([0x00, 0x00, 0x7e, 0x00, 0x00, 0xfc, 0x00, 0x00]), // =
    Glyph([0x00, 0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08]), // >
    Glyph([0x00, 0x38, 0x44, 0x04, 0x08, 0x10, 0x00, 0x10]), // ?
    Glyph([0x00, 0x30, 0x48, 0xba, 0xba, 0x84, 0x78, 0x00]), // @
    Glyph([0x00, 0x1c, 0x22, 0x42, 0x42, 0x7e, 0x42, 0x42]), // A
    Glyph([0x00, 0x78, 0x44, 0x44, 0x78, 0x44, 0x44, 0x7c]), // B
    Glyph([0x00, 0x3c, 0x44, 0x40, 0x40, 0x40, 0x44, 0x7c]), // C
    Glyph([0x00, 0x7c, 0x42, 0x42, 0x42, 0x42, 0x44, 0x78]), // D
    Glyph([0x00, 0x78, 0x40, 0x40, 0x70, 0x40, 0x40, 0x7c]), // E
    Glyph([0x00, 0x7c, 0x40, 0x40, 0x78, 0x40, 0x40, 0x40]), // F
    Glyph([0x00, 0x3c, 0x40, 0x40, 0x5c, 0x44, 0x44, 0x78]), // G
    Glyph([0x00, 0x42, 0x42, 0x42, 0x7e, 0x42, 0x42, 0x42]), // H
    Glyph([0x00, 0x7c, 0x10, 0x10, 0x10, 0x10, 0x10, 0x7e]), // I
    Glyph([0x00, 0x7e, 0x02, 0x02, 0x02, 0x02, 0x04, 0x38]), // J
    Glyph([0x00, 0x44, 0x48, 0x50, 0x60, 0x50, 0x48, 0x44]), // K
    Glyph([0x00, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x7c]), // L
    Glyph([0x00, 0x82, 0xc6, 0xaa, 0x92, 0x82, 0x82, 0x82]), // M
    Glyph([0x00, 0x42, 0x42, 0x62, 0x52, 0x4a, 0x46, 0x42]), // N
    Glyph([0x00, 0x3c, 0x42, 0x42, 0x42, 0x42, 0x44, 0x38]), // O
    Glyph([0x00, 0x78, 0x44, 0x44, 0x48, 0x70, 0x40, 0x40]), // P
    Glyph([0x00, 0x3c, 0x42, 0x42, 0x52, 0x4a, 0x44, 0x3a]), // Q
    Glyph([0x00, 0x78, 0x44, 0x44, 0x78, 0x50, 0x48, 0x44]), // R
    Glyph([0x00, 0x38, 0x40, 0x40, 0x38, 0x04, 0x04, 0x78]), // S
    Glyph([0x00, 0x7e, 0x90, 0x10, 0x10, 0x10, 0x10, 0x10]), // T
    Glyph([0x00, 0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x3e]), // U
    Glyph([0x00, 0x42, 0x42, 0x42, 0x42, 0x44, 0x28, 0x10]), // V
    Glyph([0x80, 0x82, 0x82, 0x92, 0x92, 0x92, 0x94, 0x78]), // W
    Glyph([0x00, 0x42, 0x42, 0x24, 0x18, 0x24, 0x42, 0x42]), // X
    Glyph([0x00, 0x44, 0x44, 0x28, 0x10, 0x10, 0x10, 0x10]), // Y
    Glyph([0x00, 0x7c, 0x04, 0x08, 0x7c, 0x20, 0x40, 0xfe]), // Z
];

/// Returns true if `c` has an entry in the font table.
pub fn is_supported(c: char) -> bool {
    (FIRST..=LAST).contains(&c)
}

/// Returns the glyph for `c`, or [`Glyph::BLANK`] for anything the font lacks.
pub fn glyph_for(c: char) -> &'static Glyph {
    if is_supported(c) {
        &FONT[(c as u32 - FIRST as u32) as usize]
    } else {
        &Glyph::BLANK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_range() {
        assert_eq!(FONT.len(), (LAST as usize) - (FIRST as usize) + 1);
    }

    #[test]
    fn test_digits_are_populated() {
        for c in '0'..='9' {
            assert!(!glyph_for(c).is_blank(), "digit {} is blank", c);
        }
    }

    #[test]
    fn test_known_glyphs() {
        assert_eq!(glyph_for(' '), &Glyph::BLANK);
        assert_eq!(glyph_for(',').0[5], 0xc0);
        assert_eq!(glyph_for('0').0[0], 0x60);
        assert_eq!(glyph_for('Z').0[7], 0xfe);
    }

    #[test]
    fn test_unsupported_fall_back_to_blank() {
        for c in ['a', 'z', '[', '~', '\n', '\u{e9}', '\u{1F600}'] {
            assert!(!is_supported(c));
            assert_eq!(glyph_for(c), &Glyph::BLANK);
        }
    }

    #[test]
    fn test_row_past_end_is_dark() {
        assert_eq!(glyph_for('8').row(8), 0);
        assert_eq!(glyph_for('8').row(3), 0x60);
    }
}
