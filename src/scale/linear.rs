use std::fmt;

use super::{Cells, fraction};

/// Fill glyphs up to the progress edge, one lead glyph, then remainder glyphs.
///
/// ```rust,ignore
/// let scale = LinearScale::new(30.0, 10).glyphs("#", "", ".");
/// assert_eq!(scale.to_string(), "###.......");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LinearScale<'a> {
    value: f64,
    width: usize,
    fill: &'a str,
    lead: &'a str,
    remainder: &'a str,
}

impl<'a> LinearScale<'a> {
    /// A scale at `percentage` (0 to 100, clamped) that is `width` cells wide.
    pub fn new(percentage: f64, width: usize) -> Self {
        Self {
            value: fraction(percentage),
            width,
            fill: "=",
            lead: ">",
            remainder: " ",
        }
    }

    pub fn glyphs(mut self, fill: &'a str, lead: &'a str, remainder: &'a str) -> Self {
        self.fill = fill;
        self.lead = lead;
        self.remainder = remainder;
        self
    }

    /// Number of cells covered by the fill glyph.
    pub fn filled(&self) -> usize {
        ((self.value * self.width as f64).round() as usize).min(self.width)
    }
}

impl fmt::Display for LinearScale<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = self.filled();
        let mut cells = Cells::new(f, self.width);
        while cells.used() < filled {
            cells.push(self.fill)?;
        }
        if filled < self.width && !self.lead.is_empty() {
            cells.push(self.lead)?;
        }
        while !cells.is_full() {
            cells.push(self.remainder)?;
        }
        Ok(())
    }
}
