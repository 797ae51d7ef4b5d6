use parking_lot::Mutex;

use crate::render::{self, Core, Line};
use crate::scale::LinearScale;
use crate::setting::{ProgressType, Setting, Settings};
use crate::term::Stream;
use crate::writer::FrameWriter;

/// A determinate bar drawn with configurable fill, lead and remainder glyphs.
///
/// ```rust,ignore
/// let bar = ProgressBar::new([
///     Setting::BarWidth(30),
///     Setting::PrefixText("Downloading ".into()),
///     Setting::ShowPercentage(true),
/// ]);
/// for _ in 0..100 {
///     bar.tick();
/// }
/// // => Downloading [==============================] 100%
/// ```
///
/// A [`ProgressType::Decremental`] bar starts at `MaxProgress`, moves down on
/// every tick and completes once it reaches `MinProgress`.
pub struct ProgressBar {
    state: Mutex<BarState>,
}

#[derive(Debug)]
struct BarState {
    core: Core,
    progress: f64,
}

fn defaults() -> Vec<Setting> {
    vec![
        Setting::BarWidth(100),
        Setting::PrefixText(String::new()),
        Setting::PostfixText(String::new()),
        Setting::Start("[".into()),
        Setting::End("]".into()),
        Setting::Fill("=".into()),
        Setting::Lead(">".into()),
        Setting::Remainder(" ".into()),
        Setting::MaxPostfixTextLen(0),
        Setting::Completed(false),
        Setting::ShowPercentage(false),
        Setting::ShowElapsedTime(false),
        Setting::ShowRemainingTime(false),
        Setting::SavedStartTime(false),
        Setting::ForegroundColor(Default::default()),
        Setting::FontStyles(Vec::new()),
        Setting::MinProgress(0),
        Setting::MaxProgress(100),
        Setting::ProgressType(ProgressType::Incremental),
        Setting::Stream(Stream::stdout()),
    ]
}

impl ProgressBar {
    pub fn new(settings: impl IntoIterator<Item = Setting>) -> Self {
        let settings = Settings::new("ProgressBar", defaults(), settings);
        let progress = match settings.progress_type() {
            ProgressType::Incremental => settings.min_progress(),
            ProgressType::Decremental => settings.max_progress(),
        } as f64;
        Self {
            state: Mutex::new(BarState { core: Core::new(settings), progress }),
        }
    }

    /// Replaces one option. Does not repaint.
    pub fn set_option(&self, setting: Setting) {
        self.state.lock().core.settings.set(setting);
    }

    pub fn set_option_ref(&self, setting: &Setting) {
        self.set_option(setting.clone());
    }

    pub fn set_progress(&self, value: f64) {
        let mut state = self.state.lock();
        state.progress = value;
        state.core.save_start_time();
        render::paint(&mut *state);
    }

    /// Moves one unit towards the end, up or down depending on the progress type.
    pub fn tick(&self) {
        let mut state = self.state.lock();
        state.progress += match state.core.settings.progress_type() {
            ProgressType::Incremental => 1.0,
            ProgressType::Decremental => -1.0,
        };
        state.core.save_start_time();
        render::paint(&mut *state);
    }

    /// Progress clamped to `[0, MaxProgress]`.
    pub fn current(&self) -> f64 {
        let state = self.state.lock();
        state.progress.clamp(0.0, state.core.settings.max_progress() as f64)
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

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new([])
    }
}

crate::impl_indicator!(ProgressBar);

impl crate::Determinate for ProgressBar {
    type Value = f64;

    fn set_progress(&self, value: f64) {
        ProgressBar::set_progress(self, value)
    }

    fn current(&self) -> f64 {
        ProgressBar::current(self)
    }
}

impl Line for BarState {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write_line(&mut self, frame: &mut FrameWriter<'_>) -> std::io::Result<()> {
        let settings = &self.core.settings;
        render::write_style(frame, settings)?;

        let percentage = self.progress / settings.max_progress() as f64 * 100.0;
        let scale = LinearScale::new(percentage, settings.bar_width()).glyphs(
            settings.fill(),
            settings.lead(),
            settings.remainder(),
        );

        let mut line = format!("{}{}{scale}{}", settings.prefix_text(), settings.start(), settings.end());
        render::write_status(&mut line, &self.core, self.progress);
        line.push(' ');
        line.push_str(settings.postfix_text());
        render::finish_line(frame, &line)
    }

    fn check_completion(&mut self) {
        let settings = &self.core.settings;
        let done = match settings.progress_type() {
            ProgressType::Incremental => self.progress >= settings.max_progress() as f64,
            ProgressType::Decremental => self.progress <= settings.min_progress() as f64,
        };
        if done {
            self.core.mark_completed();
        }
    }
}
