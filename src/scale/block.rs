use std::fmt;

use super::fraction;

const FULL: char = '█';

/// Partial cells from 0/8 to 7/8.
const PARTIALS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Solid blocks with an eighth-of-a-cell partial glyph at the edge.
///
/// ```rust,ignore
/// let scale = BlockScale::new(45.0, 10);
/// assert_eq!(scale.to_string(), "████▌     ");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlockScale {
    value: f64,
    width: usize,
}

impl BlockScale {
    pub fn new(percentage: f64, width: usize) -> Self {
        Self { value: fraction(percentage), width }
    }
}

impl fmt::Display for BlockScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scaled = self.value * self.width as f64;
        let whole = (scaled.floor() as usize).min(self.width);
        for _ in 0..whole {
            write!(f, "{FULL}")?;
        }
        if whole < self.width {
            let part = (((scaled - whole as f64) * 8.0).floor() as usize).min(7);
            write!(f, "{}", PARTIALS[part])?;
            let rest = self.width - whole - 1;
            write!(f, "{:rest$}", "")?;
        }
        Ok(())
    }
}
