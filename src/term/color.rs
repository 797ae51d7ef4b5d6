//! SGR escape sequences for colors and font styles.
//!
//! These functions always write; deciding whether a stream should receive
//! escapes at all is up to [`crate::Stream::is_colorized`].

use std::io::{self, Write};

use crate::setting::{Color, FontStyle};

/// Escape sequence restoring the default attributes.
pub const RESET: &str = "\x1b[00m";

impl Color {
    /// SGR parameter for this foreground color, `None` for [`Color::Unspecified`].
    pub fn sgr(self) -> Option<u8> {
        match self {
            Color::Grey => Some(30),
            Color::Red => Some(31),
            Color::Green => Some(32),
            Color::Yellow => Some(33),
            Color::Blue => Some(34),
            Color::Magenta => Some(35),
            Color::Cyan => Some(36),
            Color::White => Some(37),
            Color::Unspecified => None,
        }
    }
}

impl FontStyle {
    /// SGR parameter for this font style.
    pub fn sgr(self) -> u8 {
        match self {
            FontStyle::Bold => 1,
            FontStyle::Dark => 2,
            FontStyle::Italic => 3,
            FontStyle::Underline => 4,
            FontStyle::Blink => 5,
            FontStyle::Reverse => 7,
            FontStyle::Concealed => 8,
            FontStyle::Crossed => 9,
        }
    }
}

/// Switches the foreground color. Does nothing for [`Color::Unspecified`].
pub fn set_color<W: Write + ?Sized>(out: &mut W, color: Color) -> io::Result<()> {
    match color.sgr() {
        Some(code) => write!(out, "\x1b[{code}m"),
        None => Ok(()),
    }
}

/// Turns on a font style.
pub fn set_font_style<W: Write + ?Sized>(out: &mut W, style: FontStyle) -> io::Result<()> {
    write!(out, "\x1b[{}m", style.sgr())
}

/// Restores the default colors and styles.
pub fn reset<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    out.write_all(RESET.as_bytes())
}
