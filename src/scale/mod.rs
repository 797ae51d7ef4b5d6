//! Scale writers: render a progress fraction into a fixed run of cells.
//!
//! Every writer emits exactly `width` terminal cells, measured with
//! [`display_width`](crate::display_width) rather than byte length, and
//! clamps its input to the valid range first.
//!
//! ```rust,ignore
//! let scale = LinearScale::new(40.0, 20).glyphs("=", ">", " ");
//! write!(f, "[{scale}]")?;
//! // => [========>           ]
//!
//! let scale = BlockScale::new(40.0, 20);
//! // => ████████
//!
//! let scale = IndeterminateScale::new(3, 10).glyphs(".", "<==>");
//! // => ...<==>...
//! ```

mod block;
mod indeterminate;
mod linear;

use std::fmt;

pub use block::*;
pub use indeterminate::*;
pub use linear::*;

use crate::width::display_width;

/// Maps a percentage onto `[0, 1]`. NaN maps to 0.
pub fn fraction(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    (percentage / 100.0).clamp(0.0, 1.0)
}

/// Cell-counting glyph sink shared by the writers.
struct Cells<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    used: usize,
    width: usize,
}

impl<'a, 'b> Cells<'a, 'b> {
    fn new(f: &'a mut fmt::Formatter<'b>, width: usize) -> Self {
        Self { f, used: 0, width }
    }

    fn used(&self) -> usize {
        self.used
    }

    fn is_full(&self) -> bool {
        self.used >= self.width
    }

    /// Writes one glyph. A zero-width glyph is drawn as a space, a glyph
    /// that would overflow is replaced by spaces up to the width.
    fn push(&mut self, glyph: &str) -> fmt::Result {
        if self.is_full() {
            return Ok(());
        }
        match display_width(glyph) {
            0 => {
                self.used += 1;
                self.f.write_str(" ")
            }
            w if self.used + w > self.width => self.pad(),
            w => {
                self.used += w;
                self.f.write_str(glyph)
            }
        }
    }

    fn pad(&mut self) -> fmt::Result {
        let rest = self.width.saturating_sub(self.used);
        self.used = self.width;
        write!(self.f, "{:rest$}", "")
    }
}
