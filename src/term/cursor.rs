//! Relative cursor movement.
//!
//! A count of zero writes nothing, since `ESC[0A` still moves one line on
//! most terminals.

use std::io::{self, Write};

fn move_by<W: Write + ?Sized>(out: &mut W, n: usize, code: char) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(out, "\x1b[{n}{code}")
}

/// Moves the cursor up `lines` lines.
pub fn move_up<W: Write + ?Sized>(out: &mut W, lines: usize) -> io::Result<()> {
    move_by(out, lines, 'A')
}

/// Moves the cursor down `lines` lines.
pub fn move_down<W: Write + ?Sized>(out: &mut W, lines: usize) -> io::Result<()> {
    move_by(out, lines, 'B')
}

/// Moves the cursor right `cols` columns.
pub fn move_right<W: Write + ?Sized>(out: &mut W, cols: usize) -> io::Result<()> {
    move_by(out, cols, 'C')
}

/// Moves the cursor left `cols` columns.
pub fn move_left<W: Write + ?Sized>(out: &mut W, cols: usize) -> io::Result<()> {
    move_by(out, cols, 'D')
}

/// Erases from the cursor to the end of the line.
pub fn erase_line<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x1b[K")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_sequences() {
        let mut out = Vec::new();
        move_up(&mut out, 3).unwrap();
        move_down(&mut out, 1).unwrap();
        move_right(&mut out, 12).unwrap();
        move_left(&mut out, 2).unwrap();
        erase_line(&mut out).unwrap();
        assert_eq!(out, b"\x1b[3A\x1b[1B\x1b[12C\x1b[2D\x1b[K");
    }

    #[test]
    fn zero_moves_write_nothing() {
        let mut out = Vec::new();
        move_up(&mut out, 0).unwrap();
        move_left(&mut out, 0).unwrap();
        assert!(out.is_empty());
    }
}
