//! Paint driver and line helpers shared by every indicator.
//!
//! An indicator keeps its state in a [`Line`] behind its own mutex. A
//! standalone paint renders the line into an in-memory frame and hands the
//! frame to the [`Stream`] in one write. Inside a composition the member only
//! updates state; the composition calls [`paint_composed`] with its own frame.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::setting::{Setting, Settings};
use crate::term::Stream;
use crate::width::display_width;
use crate::writer::FrameWriter;

/// Printed for elapsed and remaining time before the clock was started.
pub(crate) const UNSTARTED: &str = "00:00s";

/// State every indicator carries besides its own progress counter.
#[derive(Debug)]
pub(crate) struct Core {
    pub(crate) settings: Settings,
    start: Option<Instant>,
    pub(crate) elapsed: Duration,
    /// Set while a composition owns painting.
    pub(crate) multi_mode: bool,
    /// Set once the completion line break was written.
    pub(crate) line_closed: bool,
}

impl Core {
    pub(crate) fn new(settings: Settings) -> Self {
        Self {
            settings,
            start: None,
            elapsed: Duration::ZERO,
            multi_mode: false,
            line_closed: false,
        }
    }

    /// Starts the clock on the first progress change, if any time is shown.
    pub(crate) fn save_start_time(&mut self) {
        let shows_time =
            self.settings.show_elapsed_time() || self.settings.show_remaining_time();
        if shows_time && !self.settings.saved_start_time() {
            self.start = Some(Instant::now());
            self.settings.set(Setting::SavedStartTime(true));
        }
    }

    /// Elapsed time freezes once the indicator completes.
    fn refresh_elapsed(&mut self) {
        if !self.is_completed()
            && let Some(start) = self.start
        {
            self.elapsed = start.elapsed();
        }
    }

    pub(crate) fn is_completed(&self) -> bool {
        self.settings.completed()
    }

    pub(crate) fn mark_completed(&mut self) {
        self.settings.set(Setting::Completed(true));
    }

    fn clock_started(&self) -> bool {
        self.settings.saved_start_time() && self.start.is_some()
    }
}

/// The per-variant part of painting.
pub(crate) trait Line {
    fn core(&self) -> &Core;

    fn core_mut(&mut self) -> &mut Core;

    /// Writes one line of output without a line break.
    fn write_line(&mut self, frame: &mut FrameWriter<'_>) -> io::Result<()>;

    /// Sets the completed flag if progress reached its bound.
    fn check_completion(&mut self);
}

/// Paints a standalone indicator whose lock the caller holds.
///
/// In multi-progress mode only the completion flag is updated. After the
/// completion line break has been written further paints are no-ops.
pub(crate) fn paint<L: Line>(line: &mut L) {
    if line.core().multi_mode {
        line.check_completion();
        return;
    }
    if line.core().line_closed {
        return;
    }

    let stream = line.core().settings.stream();
    let mut buf = Vec::new();
    let result = render_frame(line, &stream, &mut buf).and_then(|()| stream.write_frame(&buf));
    if let Err(err) = result {
        debug!(%err, "dropping indicator frame");
    }
}

fn render_frame<L: Line>(line: &mut L, stream: &Stream, buf: &mut Vec<u8>) -> io::Result<()> {
    let mut frame = FrameWriter::new(buf, stream);
    line.core_mut().refresh_elapsed();
    line.write_line(&mut frame)?;
    line.check_completion();
    if line.core().is_completed() {
        line.core_mut().line_closed = true;
        frame.reset_style()?;
        writeln!(frame)?;
    }
    Ok(())
}

/// Paints a member into a composition's frame. Never ends the line.
pub(crate) fn paint_composed<L: Line>(line: &mut L, frame: &mut FrameWriter<'_>) -> io::Result<()> {
    line.core_mut().refresh_elapsed();
    line.write_line(frame)?;
    line.check_completion();
    Ok(())
}

/// Applies the configured color and font styles.
pub(crate) fn write_style(frame: &mut FrameWriter<'_>, settings: &Settings) -> io::Result<()> {
    frame.set_style(settings.foreground_color(), settings.font_styles())
}

/// Writes a visible line and pads it to the stream width.
pub(crate) fn finish_line(frame: &mut FrameWriter<'_>, line: &str) -> io::Result<()> {
    frame.write_all(line.as_bytes())?;
    frame.pad_line(display_width(line))
}

/// Whole percent of `max` reached by `progress`, capped at 100.
pub(crate) fn percent(progress: f64, max: usize) -> usize {
    ((progress / max as f64 * 100.0) as usize).min(100)
}

/// Appends the ` N%` and ` [elapsed<remaining]` blocks the settings ask for.
pub(crate) fn write_status(out: &mut String, core: &Core, progress: f64) {
    let settings = &core.settings;
    let max = settings.max_progress();
    let show_elapsed = settings.show_elapsed_time();
    let show_remaining = settings.show_remaining_time();

    if settings.show_percentage() {
        let _ = write!(out, " {}%", percent(progress, max));
    }

    if show_elapsed {
        out.push_str(" [");
        if core.clock_started() {
            out.push_str(&format_duration(core.elapsed));
        } else {
            out.push_str(UNSTARTED);
        }
    }

    if show_remaining {
        out.push_str(if show_elapsed { "<" } else { " [" });
        if core.clock_started() {
            out.push_str(&format_duration(remaining(core.elapsed, progress, max)));
        } else {
            out.push_str(UNSTARTED);
        }
    }

    if show_elapsed || show_remaining {
        out.push(']');
    }
}

/// Distance between elapsed time and the projected total.
pub(crate) fn remaining(elapsed: Duration, progress: f64, max: usize) -> Duration {
    let eta = if progress > 0.0 {
        let nanos = (elapsed.as_nanos() as f64 * max as f64 / progress).ceil();
        Duration::from_nanos(nanos as u64)
    } else {
        Duration::ZERO
    };
    eta.abs_diff(elapsed)
}

/// Formats a duration as `[DDd:][HHh:]MMm:SSs`.
pub(crate) fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;

    let mut out = String::new();
    if days > 0 {
        let _ = write!(out, "{days:02}d:");
    }
    if hours > 0 {
        let _ = write!(out, "{hours:02}h:");
    }
    let _ = write!(out, "{minutes:02}m:{seconds:02}s");
    out
}
