use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::size::terminal_width;

type Sink = Box<dyn Write + Send>;

/// A shared handle to the output an indicator paints on.
///
/// Cloning is cheap and every clone writes to the same sink. Besides the
/// sink, a stream carries its own rendering state:
///
/// * whether color escapes are emitted: automatically when the sink is a
///   terminal, or forced either way with [`Stream::colorize`];
/// * the width used for right padding: the live terminal width unless pinned
///   with [`Stream::with_columns`].
///
/// ```rust,ignore
/// let stream = Stream::stderr().colorize(false);
/// let bar = ProgressBar::new([Setting::Stream(stream)]);
/// ```
#[derive(Clone)]
pub struct Stream {
    sink: Arc<Mutex<Sink>>,
    label: &'static str,
    terminal: bool,
    colorize: Option<bool>,
    columns: Option<usize>,
}

impl Stream {
    fn new(sink: Sink, label: &'static str, terminal: bool) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
            label,
            terminal,
            colorize: None,
            columns: None,
        }
    }

    /// A stream writing to the process's standard output.
    pub fn stdout() -> Self {
        let terminal = io::stdout().is_terminal();
        Self::new(Box::new(io::stdout()), "stdout", terminal)
    }

    /// A stream writing to the process's standard error.
    pub fn stderr() -> Self {
        let terminal = io::stderr().is_terminal();
        Self::new(Box::new(io::stderr()), "stderr", terminal)
    }

    /// A stream writing to an arbitrary sink, treated as a non-terminal.
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self::new(Box::new(writer), "writer", false)
    }

    /// Forces color escapes on or off regardless of terminal detection.
    pub fn colorize(mut self, enabled: bool) -> Self {
        self.colorize = Some(enabled);
        self
    }

    /// Pins the width used for padding instead of querying the terminal.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Returns `true` if the sink is an interactive terminal.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Returns `true` if color and style escapes should be written.
    pub fn is_colorized(&self) -> bool {
        self.colorize.unwrap_or(self.terminal)
    }

    /// Width in columns that a line should be padded to.
    pub fn columns(&self) -> usize {
        self.columns.unwrap_or_else(terminal_width)
    }

    /// Returns `true` if both handles write to the same sink.
    pub fn same_sink(&self, other: &Stream) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink)
    }

    /// Writes one complete frame and flushes it while holding the sink.
    pub(crate) fn write_frame(&self, frame: &[u8]) -> io::Result<()> {
        let mut sink = self.sink.lock();
        sink.write_all(frame)?;
        sink.flush()
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("sink", &self.label)
            .field("terminal", &self.terminal)
            .field("colorize", &self.colorize)
            .field("columns", &self.columns)
            .finish()
    }
}
