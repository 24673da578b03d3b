//! Horizontal scroll state.

/// Offset past which content of `text_len` characters has left the panel.
///
/// Uses the length of the decimal string, not the fixed cell count of the
/// layout, so short values wrap sooner than long ones.
pub fn wrap_threshold(text_len: usize, cell_width: i32) -> i32 {
    -(text_len as i32 * cell_width)
}

/// Scroll offset that moves left by `step` every tick and re-enters from
/// `reset_x` once the content is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scroller {
    x: i32,
    reset_x: i32,
    step: i32,
    cell_width: i32,
}

impl Scroller {
    /// Creates a scroller starting at offset 0.
    pub fn new(reset_x: i32, step: i32, cell_width: i32) -> Self {
        Self {
            x: 0,
            reset_x,
            step,
            cell_width,
        }
    }

    /// Returns the current offset.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Advances one tick for content `text_len` characters long.
    ///
    /// Returns true if the offset wrapped back to the start value.
    pub fn advance(&mut self, text_len: usize) -> bool {
        self.x -= self.step;
        if self.x < wrap_threshold(text_len, self.cell_width) {
            self.x = self.reset_x;
            return true;
        }
        false
    }
}
