use unicode_width::UnicodeWidthChar;

/// Returns the number of terminal cells `text` occupies.
///
/// Follows the East-Asian-width classification: wide and fullwidth
/// characters take two cells, combining and format characters take none,
/// everything else takes one. Control characters and ANSI escape sequences
/// (`ESC [ ... final`) measure zero, so pre-colored text pads correctly.
///
/// ```
/// use term_indicators::display_width;
///
/// assert_eq!(display_width("abc"), 3);
/// assert_eq!(display_width("中文"), 4);
/// assert_eq!(display_width("\x1b[31mred\x1b[0m"), 3);
/// ```
pub fn display_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // Parameters and intermediates run until the final byte.
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        if c.is_control() {
            continue;
        }
        width += c.width().unwrap_or(0);
    }

    width
}

#[cfg(test)]
mod tests {
    use super::display_width;

    #[test]
    fn ascii_is_one_cell_per_char() {
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("hello, world"), 12);
    }

    #[test]
    fn wide_characters_take_two_cells() {
        assert_eq!(display_width("中"), 2);
        assert_eq!(display_width("進捗"), 4);
        assert_eq!(display_width("ｆ"), 2);
    }

    #[test]
    fn combining_characters_take_no_cells() {
        assert_eq!(display_width("\u{301}"), 0);
        assert_eq!(display_width("e\u{301}"), 1);
        assert_eq!(display_width("\u{200b}"), 0);
    }

    #[test]
    fn control_characters_take_no_cells() {
        assert_eq!(display_width("\r\n\t"), 0);
        assert_eq!(display_width("a\u{7f}b"), 2);
    }

    #[test]
    fn escape_sequences_are_skipped() {
        assert_eq!(display_width("\x1b[1;32mok\x1b[00m"), 2);
        assert_eq!(display_width("\x1b[3A"), 0);
    }

    #[test]
    fn block_glyphs_are_narrow() {
        assert_eq!(display_width("█▏▎▍▌▋▊▉"), 8);
        assert_eq!(display_width("⠋"), 1);
    }
}
