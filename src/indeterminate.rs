use parking_lot::Mutex;

use crate::render::{self, Core, Line};
use crate::scale::IndeterminateScale;
use crate::setting::{Setting, Settings};
use crate::term::Stream;
use crate::width::display_width;
use crate::writer::FrameWriter;

/// A bar with no known length: a lead glyph run bounces inside the track.
///
/// It only completes through [`IndeterminateProgressBar::mark_as_completed`].
///
/// ```rust,ignore
/// let bar = IndeterminateProgressBar::new([
///     Setting::BarWidth(40),
///     Setting::PostfixText("Compiling".into()),
/// ]);
/// while !work.is_done() {
///     bar.tick();
///     thread::sleep(Duration::from_millis(50));
/// }
/// bar.mark_as_completed();
/// ```
pub struct IndeterminateProgressBar {
    state: Mutex<BounceState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Debug)]
struct BounceState {
    core: Core,
    position: usize,
    direction: Direction,
    max_position: usize,
}

fn defaults() -> Vec<Setting> {
    vec![
        Setting::BarWidth(100),
        Setting::PrefixText(String::new()),
        Setting::PostfixText(String::new()),
        Setting::Start("[".into()),
        Setting::End("]".into()),
        Setting::Fill(".".into()),
        Setting::Lead("<==>".into()),
        Setting::MaxPostfixTextLen(0),
        Setting::Completed(false),
        Setting::ForegroundColor(Default::default()),
        Setting::FontStyles(Vec::new()),
        Setting::Stream(Stream::stdout()),
    ]
}

fn max_position(settings: &Settings) -> usize {
    (settings.bar_width() + display_width(settings.start()) + display_width(settings.end()))
        .saturating_sub(display_width(settings.lead()))
}

impl IndeterminateProgressBar {
    pub fn new(settings: impl IntoIterator<Item = Setting>) -> Self {
        let settings = Settings::new("IndeterminateProgressBar", defaults(), settings);
        let max_position = max_position(&settings);
        Self {
            state: Mutex::new(BounceState {
                core: Core::new(settings),
                position: 0,
                direction: Direction::Forward,
                max_position,
            }),
        }
    }

    /// Replaces one option. Does not repaint.
    ///
    /// Changing the width or any glyph recomputes the bounce bound.
    pub fn set_option(&self, setting: Setting) {
        let mut state = self.state.lock();
        state.core.settings.set(setting);
        state.max_position = max_position(&state.core.settings);
        state.position = state.position.min(state.max_position);
        if state.max_position > 0 && state.position >= state.max_position {
            state.direction = Direction::Backward;
        }
    }

    pub fn set_option_ref(&self, setting: &Setting) {
        self.set_option(setting.clone());
    }

    /// Moves the lead one cell and repaints. Ignored once completed.
    pub fn tick(&self) {
        let mut state = self.state.lock();
        if state.core.is_completed() {
            return;
        }
        state.advance();
        render::paint(&mut *state);
    }

    /// Cell offset of the lead inside the track.
    pub fn position(&self) -> usize {
        self.state.lock().position
    }

    pub fn is_completed(&self) -> bool {
        self.state.lock().core.is_completed()
    }

    pub fn mark_as_completed(&self) {
        let mut state = self.state.lock();
        state.core.mark_completed();
        render::paint(&mut *state);
    }
}

impl Default for IndeterminateProgressBar {
    fn default() -> Self {
        Self::new([])
    }
}

crate::impl_indicator!(IndeterminateProgressBar);

impl BounceState {
    fn advance(&mut self) {
        if self.max_position == 0 {
            return;
        }
        match self.direction {
            Direction::Forward => {
                self.position += 1;
                if self.position >= self.max_position {
                    self.direction = Direction::Backward;
                }
            }
            Direction::Backward => {
                self.position = self.position.saturating_sub(1);
                if self.position == 0 {
                    self.direction = Direction::Forward;
                }
            }
        }
    }
}

impl Line for BounceState {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write_line(&mut self, frame: &mut FrameWriter<'_>) -> std::io::Result<()> {
        let settings = &self.core.settings;
        render::write_style(frame, settings)?;

        let scale = IndeterminateScale::new(self.position, settings.bar_width())
            .glyphs(settings.fill(), settings.lead());
        let line = format!(
            "{}{}{scale}{} {}",
            settings.prefix_text(),
            settings.start(),
            settings.end(),
            settings.postfix_text(),
        );
        render::finish_line(frame, &line)
    }

    fn check_completion(&mut self) {}
}
