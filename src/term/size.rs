use tracing::trace;

/// `(rows, columns)` assumed when the terminal size cannot be queried.
pub const FALLBACK_SIZE: (usize, usize) = (24, 80);

/// Returns the current terminal size as `(rows, columns)`.
///
/// Falls back to [`FALLBACK_SIZE`] when no terminal is attached or the
/// query fails.
pub fn terminal_size() -> (usize, usize) {
    match crossterm::terminal::size() {
        Ok((columns, rows)) if columns > 0 && rows > 0 => (rows as usize, columns as usize),
        Ok(_) => {
            trace!("terminal reported an empty size, using fallback");
            FALLBACK_SIZE
        }
        Err(err) => {
            trace!(%err, "terminal size unavailable, using fallback");
            FALLBACK_SIZE
        }
    }
}

/// Returns the current terminal width in columns.
pub fn terminal_width() -> usize {
    terminal_size().1
}
