use std::io::{self, Write};
use std::ops::Index;

use parking_lot::Mutex;
use tracing::debug;

use crate::Indicator;
use crate::setting::{Setting, Settings};
use crate::term::Stream;
use crate::writer::FrameWriter;

/// A growable set of indicators painted as one block of lines.
///
/// Members can be added from any thread with [`DynamicProgress::push_back`].
/// With [`Setting::HideBarWhenComplete`] enabled only unfinished members are
/// printed, and the lines of the previous pass are erased first.
///
/// ```rust,ignore
/// let bars = DynamicProgress::new([&first]);
/// bars.set_option(Setting::HideBarWhenComplete(true));
/// let idx = bars.push_back(&second);
/// bars[idx].tick();
/// bars.print_progress();
/// ```
pub struct DynamicProgress<'a, I: Indicator + ?Sized> {
    state: Mutex<DynamicState<'a, I>>,
}

struct DynamicState<'a, I: ?Sized> {
    bars: Vec<&'a I>,
    settings: Settings,
    started: bool,
    /// Lines printed by the previous pass, in either mode.
    lines: usize,
}

fn defaults() -> Vec<Setting> {
    vec![Setting::HideBarWhenComplete(false), Setting::Stream(Stream::stdout())]
}

impl<'a, I: Indicator + ?Sized> DynamicProgress<'a, I> {
    pub fn new(bars: impl IntoIterator<Item = &'a I>) -> Self {
        let bars: Vec<&'a I> = bars.into_iter().collect();
        for bar in &bars {
            bar.attach();
        }
        debug!(members = bars.len(), "dynamic progress registered");
        Self {
            state: Mutex::new(DynamicState {
                bars,
                settings: Settings::new("DynamicProgress", defaults(), []),
                started: false,
                lines: 0,
            }),
        }
    }

    /// Registers another member and returns its index. Does not repaint.
    pub fn push_back(&self, bar: &'a I) -> usize {
        let mut state = self.state.lock();
        bar.attach();
        state.bars.push(bar);
        debug!(index = state.bars.len() - 1, "dynamic progress member added");
        state.bars.len() - 1
    }

    /// Repaints, then returns the member at `index`.
    ///
    /// The repaint happens even when `index` is out of range.
    pub fn get(&self, index: usize) -> Option<&'a I> {
        self.print_progress();
        self.state.lock().bars.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.state.lock().bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().bars.is_empty()
    }

    /// Supports [`Setting::HideBarWhenComplete`] and [`Setting::Stream`].
    pub fn set_option(&self, setting: Setting) {
        self.state.lock().settings.set(setting);
    }

    pub fn set_option_ref(&self, setting: &Setting) {
        self.set_option(setting.clone());
    }

    /// Repaints every member, or every unfinished one in hiding mode.
    pub fn print_progress(&self) {
        let mut state = self.state.lock();
        let stream = state.settings.stream();
        let mut buf = Vec::new();
        let result = render(&mut *state, &stream, &mut buf).and_then(|()| stream.write_frame(&buf));
        if let Err(err) = result {
            debug!(%err, "dropping dynamic progress frame");
        }
    }
}

fn render<I: Indicator + ?Sized>(
    state: &mut DynamicState<'_, I>, stream: &Stream, buf: &mut Vec<u8>,
) -> io::Result<()> {
    let mut frame = FrameWriter::new(buf, stream);
    let hide = state.settings.hide_bar_when_complete();

    if state.started {
        if hide {
            for _ in 0..state.lines {
                frame.erase_previous_line()?;
            }
        } else {
            frame.move_up(state.lines)?;
        }
    }
    for bar in &state.bars {
        if hide && bar.is_completed() {
            continue;
        }
        bar.paint_composed(&mut frame)?;
        writeln!(frame)?;
    }
    frame.reset_style()?;

    state.started = true;
    state.lines = frame.frame_lines();
    Ok(())
}

impl<'a, I: Indicator + ?Sized> Index<usize> for DynamicProgress<'a, I> {
    type Output = I;

    /// Repaints, then returns the member at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    fn index(&self, index: usize) -> &I {
        match self.get(index) {
            Some(bar) => bar,
            None => panic!("index {index} out of range for {} indicators", self.len()),
        }
    }
}

impl<'a, I: Indicator + ?Sized> Drop for DynamicProgress<'a, I> {
    fn drop(&mut self) {
        for bar in &self.state.get_mut().bars {
            bar.detach();
        }
    }
}
