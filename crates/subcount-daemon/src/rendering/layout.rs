//! Six-digit counter layout with a thousands separator.
//!
//! The layout is fixed: six digit cells on a 5-pixel pitch, with the comma
//! wedged between the thousands and hundreds digits and the lower three
//! digits shifted right to make room for it.
//!
//! ```text
//! x:   0    5    10   15  18   23   28
//!      1    2    3    ,   4    5    6
//! ```
//!
//! Each higher-order cell lights up only once the value is large enough to
//! need it, so small numbers are right-aligned with blank padding. Values of
//! a million or more show their low six digits.

use subcount_hw::Surface;

use super::font::{glyph_for, Glyph};
use super::sprite::{draw_glyph, GLYPH_HEIGHT};

/// Columns drawn per cell.
pub const CELL_WIDTH: u16 = 5;

/// Number of cells in a layout (six digits and the comma).
pub const CELL_COUNT: usize = 7;

/// What a cell shows when it is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    /// The digit `place` positions from the right (1 = units).
    Digit(usize),
    Comma,
}

/// A fixed cell position and the threshold the value must exceed to light it.
struct Slot {
    x: i32,
    source: Source,
    threshold: Option<u64>,
}

#[rustfmt::skip]
const SLOTS: [Slot; CELL_COUNT] = [
    Slot { x: 0, source: Source::Digit(6), threshold: Some(99_999) },
    Slot { x: 5, source: Source::Digit(5), threshold: Some(9_999) },
    Slot { x: 10, source: Source::Digit(4), threshold: Some(999) },
    Slot { x: 15, source: Source::Comma, threshold: Some(999) },
    Slot { x: 18, source: Source::Digit(3), threshold: Some(99) },
    Slot { x: 23, source: Source::Digit(2), threshold: Some(9) },
    Slot { x: 28, source: Source::Digit(1), threshold: None },
];

/// One positioned glyph of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Glyph to draw.
    pub glyph: &'static Glyph,
    /// Left edge relative to the layout origin.
    pub x: i32,
    /// The character shown, or `None` for a blank cell.
    pub ch: Option<char>,
}

impl Cell {
    fn blank(x: i32) -> Self {
        Self {
            glyph: glyph_for(' '),
            x,
            ch: None,
        }
    }

    fn showing(ch: char, x: i32) -> Self {
        Self {
            glyph: glyph_for(ch),
            x,
            ch: Some(ch),
        }
    }
}

/// Returns the length of the decimal representation of `value`.
pub fn digit_len(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Lays out `value` as seven cells, left to right.
pub fn layout(value: u64) -> [Cell; CELL_COUNT] {
    let text = value.to_string();
    let digits = text.as_bytes();
    let len = digits.len();

    SLOTS.map(|slot| {
        let lit = slot.threshold.map_or(true, |threshold| value > threshold);
        if !lit {
            return Cell::blank(slot.x);
        }
        match slot.source {
            Source::Digit(place) => Cell::showing(digits[len - place] as char, slot.x),
            Source::Comma => Cell::showing(',', slot.x),
        }
    })
}

/// Returns the lit characters of a layout as a string, blanks as spaces.
pub fn layout_text(cells: &[Cell]) -> String {
    cells.iter().map(|cell| cell.ch.unwrap_or(' ')).collect()
}

/// Clears `surface` and draws `cells` with the layout origin at `origin_x`.
pub fn compose(surface: &mut Surface, cells: &[Cell], origin_x: i32) {
    surface.clear();
    for cell in cells {
        draw_glyph(
            surface,
            cell.glyph,
            origin_x + cell.x,
            0,
            CELL_WIDTH,
            GLYPH_HEIGHT,
        );
    }
}
