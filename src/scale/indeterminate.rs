use std::fmt;

use super::Cells;

/// A lead glyph run at a fixed cell position inside a track of fill glyphs.
#[derive(Debug, Clone, Copy)]
pub struct IndeterminateScale<'a> {
    position: usize,
    width: usize,
    fill: &'a str,
    lead: &'a str,
}

impl<'a> IndeterminateScale<'a> {
    pub fn new(position: usize, width: usize) -> Self {
        Self {
            position,
            width,
            fill: ".",
            lead: "<==>",
        }
    }

    pub fn glyphs(mut self, fill: &'a str, lead: &'a str) -> Self {
        self.fill = fill;
        self.lead = lead;
        self
    }
}

impl fmt::Display for IndeterminateScale<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = Cells::new(f, self.width);
        let mut lead_drawn = self.lead.is_empty();
        while !cells.is_full() {
            if !lead_drawn && cells.used() >= self.position {
                cells.push(self.lead)?;
                lead_drawn = true;
            } else {
                cells.push(self.fill)?;
            }
        }
        Ok(())
    }
}
