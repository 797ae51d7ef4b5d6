use std::io::Write;

use crate::setting::{Color, FontStyle};
use crate::term::{Stream, color, cursor};

/// Render target for one frame.
///
/// Wraps an [`std::io::Write`] target, counts the line breaks written through
/// it so a composition knows how far to move the cursor up next time, and
/// carries the colorize flag and padding width of the destination stream.
pub struct FrameWriter<'a> {
    target: &'a mut dyn Write,
    frame_lines: usize,
    colorized: bool,
    columns: usize,
}

impl<'a> FrameWriter<'a> {
    pub(crate) fn new(target: &'a mut dyn Write, stream: &Stream) -> Self {
        Self {
            target,
            frame_lines: 0,
            colorized: stream.is_colorized(),
            columns: stream.columns(),
        }
    }

    /// Number of line breaks written so far.
    pub(crate) fn frame_lines(&self) -> usize {
        self.frame_lines
    }

    /// Applies a foreground color and font styles, if the stream is colorized.
    pub(crate) fn set_style(&mut self, fg: Color, styles: &[FontStyle]) -> std::io::Result<()> {
        if !self.colorized {
            return Ok(());
        }
        color::set_color(self, fg)?;
        for style in styles {
            color::set_font_style(self, *style)?;
        }
        Ok(())
    }

    /// Restores default attributes, if the stream is colorized.
    pub(crate) fn reset_style(&mut self) -> std::io::Result<()> {
        if self.colorized {
            color::reset(self)?;
        }
        Ok(())
    }

    /// Fills the rest of the line with spaces and returns the cursor to its
    /// start, so the next paint overwrites this one.
    ///
    /// `used` is the display width already written. A line that already
    /// fills the terminal only gets the carriage return.
    pub(crate) fn pad_line(&mut self, used: usize) -> std::io::Result<()> {
        let remaining = self.columns.saturating_sub(used);
        write!(self, "{:remaining$}\r", "")
    }

    pub(crate) fn move_up(&mut self, lines: usize) -> std::io::Result<()> {
        cursor::move_up(self, lines)
    }

    /// Moves up one line, back to its start, and erases it.
    pub(crate) fn erase_previous_line(&mut self) -> std::io::Result<()> {
        cursor::move_up(self, 1)?;
        self.write_all(b"\r")?;
        cursor::erase_line(self)
    }
}

impl<'a> Write for FrameWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.target.write(buf)?;
        self.frame_lines += buf[..written].iter().filter(|&&b| b == b'\n').count();
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.target.flush()
    }
}
