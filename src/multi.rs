use std::io::{self, Write};

use parking_lot::Mutex;
use tracing::debug;

use crate::term::Stream;
use crate::writer::FrameWriter;
use crate::{Determinate, Indicator};

/// A fixed set of indicators painted as one block of lines.
///
/// Members are borrowed, so the composition cannot outlive them. While it
/// exists, the members' own mutators only update state and every
/// composition call repaints all `N` lines in slot order, moving the cursor
/// back over the previous block first.
///
/// Slot indices are const generics: an index `>= N` fails to compile.
///
/// ```rust,ignore
/// let first = ProgressBar::new([Setting::PrefixText("first  ".into())]);
/// let second = ProgressBar::new([Setting::PrefixText("second ".into())]);
/// let bars = MultiProgress::new([&first, &second]);
///
/// while !bars.is_all_completed() {
///     bars.tick::<0>();
///     bars.set_progress::<1>(second.current() + 2.0);
/// }
/// ```
pub struct MultiProgress<'a, I: Indicator + ?Sized, const N: usize> {
    bars: [&'a I; N],
    stream: Stream,
    frame: Mutex<FrameState>,
}

#[derive(Debug, Default)]
struct FrameState {
    started: bool,
    lines: usize,
}

impl<'a, I: Indicator + ?Sized, const N: usize> MultiProgress<'a, I, N> {
    /// Registers the members. Paints nothing until the first mutation.
    pub fn new(bars: [&'a I; N]) -> Self {
        for bar in &bars {
            bar.attach();
        }
        debug!(members = N, "multi progress registered");
        Self {
            bars,
            stream: Stream::stdout(),
            frame: Mutex::new(FrameState::default()),
        }
    }

    /// Paints on `stream` instead of standard output.
    pub fn with_stream(mut self, stream: Stream) -> Self {
        self.stream = stream;
        self
    }

    /// Ticks member `IDX` unless it is completed, then repaints.
    pub fn tick<const IDX: usize>(&self) {
        const { assert!(IDX < N, "slot index out of range") };
        let bar = self.bars[IDX];
        if !bar.is_completed() {
            bar.tick();
        }
        self.print_progress();
    }

    pub fn is_completed<const IDX: usize>(&self) -> bool {
        const { assert!(IDX < N, "slot index out of range") };
        self.bars[IDX].is_completed()
    }

    /// Completes member `IDX`, then repaints.
    pub fn mark_as_completed<const IDX: usize>(&self) {
        const { assert!(IDX < N, "slot index out of range") };
        self.bars[IDX].mark_as_completed();
        self.print_progress();
    }

    pub fn is_all_completed(&self) -> bool {
        self.bars.iter().all(|bar| bar.is_completed())
    }

    /// Repaints every member.
    pub fn print_progress(&self) {
        let mut state = self.frame.lock();
        let mut buf = Vec::new();
        let result = self
            .render(&mut state, &mut buf)
            .and_then(|()| self.stream.write_frame(&buf));
        if let Err(err) = result {
            debug!(%err, "dropping multi progress frame");
        }
    }

    fn render(&self, state: &mut FrameState, buf: &mut Vec<u8>) -> io::Result<()> {
        let mut frame = FrameWriter::new(buf, &self.stream);
        if state.started {
            frame.move_up(state.lines)?;
        }
        for bar in &self.bars {
            bar.paint_composed(&mut frame)?;
            writeln!(frame)?;
        }
        frame.reset_style()?;

        state.started = true;
        state.lines = frame.frame_lines();
        Ok(())
    }
}

impl<'a, I: Determinate + ?Sized, const N: usize> MultiProgress<'a, I, N> {
    /// Sets the progress of member `IDX` unless it is completed, then repaints.
    pub fn set_progress<const IDX: usize>(&self, value: I::Value) {
        const { assert!(IDX < N, "slot index out of range") };
        let bar = self.bars[IDX];
        if !bar.is_completed() {
            bar.set_progress(value);
        }
        self.print_progress();
    }
}

impl<'a, I: Indicator + ?Sized, const N: usize> Drop for MultiProgress<'a, I, N> {
    fn drop(&mut self) {
        for bar in &self.bars {
            bar.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setting::Setting;
    use crate::test::Capture;
    use crate::{ProgressBar, ProgressSpinner};

    fn bar(prefix: &str) -> ProgressBar {
        ProgressBar::new([
            Setting::BarWidth(10),
            Setting::PrefixText(prefix.into()),
            Setting::MaxProgress(10),
        ])
    }

    #[test]
    fn members_do_not_paint_on_their_own() {
        let capture = Capture::default();
        let a = bar("a ");
        a.set_option(Setting::Stream(capture.stream(30)));
        let multi = MultiProgress::new([&a]).with_stream(Stream::from_writer(Vec::new()));
        a.tick();
        assert!(capture.text().is_empty());
        drop(multi);
        a.tick();
        assert!(!capture.text().is_empty());
    }

    #[test]
    fn completed_members_are_not_advanced() {
        let capture = Capture::default();
        let a = bar("a ");
        let multi = MultiProgress::new([&a]).with_stream(capture.stream(30));
        multi.set_progress::<0>(10.0);
        assert!(multi.is_completed::<0>());
        multi.set_progress::<0>(3.0);
        assert_eq!(a.current(), 10.0);
        assert!(multi.is_all_completed());
    }

    #[test]
    fn mixed_members_through_trait_objects() {
        let capture = Capture::default();
        let a = bar("a ");
        let s = ProgressSpinner::new([Setting::spinner_states(&["*"])]);
        let members: [&dyn Indicator; 2] = [&a, &s];
        let multi = MultiProgress::new(members).with_stream(capture.stream(30));
        multi.tick::<0>();
        multi.tick::<1>();
        assert_eq!(capture.screen(), vec!["a [=>        ]", "* 1%", ""]);
    }

    #[test]
    fn mark_as_completed_repaints_without_own_newline() {
        let capture = Capture::default();
        let a = bar("a ");
        let multi = MultiProgress::new([&a]).with_stream(capture.stream(30));
        multi.mark_as_completed::<0>();
        assert!(a.is_completed());
        assert_eq!(capture.text().matches('\n').count(), 1);
    }
}
