use std::io::Write;

use parking_lot::Mutex;

use crate::render::{self, Core, Line};
use crate::setting::{Setting, Settings};
use crate::term::Stream;
use crate::width::display_width;
use crate::writer::FrameWriter;

/// Postfix width reserved when no postfix was ever set.
const DEFAULT_POSTFIX_RESERVE: usize = 10;

/// Ready-made frame sets for [`Setting::SpinnerStates`].
///
/// ```rust,ignore
/// let spinner = ProgressSpinner::new([Setting::spinner_states(presets::LINE)]);
/// ```
pub mod presets {
    /// Braille dots, the default.
    pub const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

    pub const LINE: &[&str] = &["|", "/", "-", "\\"];

    pub const ARROW: &[&str] = &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"];
}

/// A spinner that advances one frame per paint.
///
/// There is no internal timer: the animation moves as fast as the caller
/// ticks.
///
/// ```rust,ignore
/// let spinner = ProgressSpinner::new([
///     Setting::PostfixText("Checking credentials".into()),
///     Setting::ForegroundColor(Color::Yellow),
/// ]);
/// while !spinner.is_completed() {
///     spinner.tick();
///     thread::sleep(Duration::from_millis(40));
/// }
/// // => ⠼ 42% Checking credentials
/// ```
pub struct ProgressSpinner {
    state: Mutex<SpinnerState>,
}

#[derive(Debug)]
struct SpinnerState {
    core: Core,
    progress: usize,
    index: usize,
}

fn defaults() -> Vec<Setting> {
    vec![
        Setting::PrefixText(String::new()),
        Setting::PostfixText(String::new()),
        Setting::MaxPostfixTextLen(0),
        Setting::Completed(false),
        Setting::ShowPercentage(true),
        Setting::ShowElapsedTime(false),
        Setting::ShowRemainingTime(false),
        Setting::SavedStartTime(false),
        Setting::ForegroundColor(Default::default()),
        Setting::FontStyles(Vec::new()),
        Setting::ShowSpinner(true),
        Setting::spinner_states(presets::DOTS),
        Setting::MaxProgress(100),
        Setting::Stream(Stream::stdout()),
    ]
}

impl ProgressSpinner {
    pub fn new(settings: impl IntoIterator<Item = Setting>) -> Self {
        let settings = Settings::new("ProgressSpinner", defaults(), settings);
        Self {
            state: Mutex::new(SpinnerState {
                core: Core::new(settings),
                progress: 0,
                index: 0,
            }),
        }
    }

    pub fn set_option(&self, setting: Setting) {
        self.state.lock().core.settings.set(setting);
    }

    pub fn set_option_ref(&self, setting: &Setting) {
        self.set_option(setting.clone());
    }

    pub fn set_progress(&self, value: usize) {
        let mut state = self.state.lock();
        state.progress = value;
        state.core.save_start_time();
        render::paint(&mut *state);
    }

    pub fn tick(&self) {
        let mut state = self.state.lock();
        state.progress = state.progress.saturating_add(1);
        state.core.save_start_time();
        render::paint(&mut *state);
    }

    pub fn current(&self) -> usize {
        let state = self.state.lock();
        state.progress.min(state.core.settings.max_progress())
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

impl Default for ProgressSpinner {
    fn default() -> Self {
        Self::new([])
    }
}

crate::impl_indicator!(ProgressSpinner);

impl crate::Determinate for ProgressSpinner {
    type Value = usize;

    fn set_progress(&self, value: usize) {
        ProgressSpinner::set_progress(self, value)
    }

    fn current(&self) -> usize {
        ProgressSpinner::current(self)
    }
}

impl Line for SpinnerState {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write_line(&mut self, frame: &mut FrameWriter<'_>) -> std::io::Result<()> {
        let settings = &self.core.settings;
        render::write_style(frame, settings)?;

        let mut line = settings.prefix_text().to_owned();
        let states = settings.spinner_states();
        if settings.show_spinner() && !states.is_empty() {
            line.push_str(&states[self.index % states.len()]);
        }
        render::write_status(&mut line, &self.core, self.progress as f64);

        // Reserve the widest postfix seen so a shorter one leaves no ghost.
        let postfix = settings.postfix_text();
        let reserve = match settings.max_postfix_text_len() {
            0 => DEFAULT_POSTFIX_RESERVE,
            n => n,
        };
        let pad = reserve.saturating_sub(display_width(postfix));
        line.push(' ');
        line.push_str(postfix);
        line.extend(std::iter::repeat_n(' ', pad));
        line.push('\r');

        frame.write_all(line.as_bytes())?;
        self.index = self.index.wrapping_add(1);
        Ok(())
    }

    fn check_completion(&mut self) {
        if self.progress >= self.core.settings.max_progress() {
            self.core.mark_completed();
        }
    }
}
