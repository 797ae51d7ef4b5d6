use parking_lot::Mutex;

use crate::render::{self, Core, Line};
use crate::scale::BlockScale;
use crate::setting::{Setting, Settings};
use crate::term::Stream;
use crate::writer::FrameWriter;

/// A determinate bar drawn with solid blocks at eighth-of-a-cell resolution.
///
/// ```rust,ignore
/// let bar = BlockProgressBar::new([Setting::BarWidth(20)]);
/// bar.set_progress(42.5);
/// // => [████████▌           ] 42%
/// ```
pub struct BlockProgressBar {
    state: Mutex<BlockState>,
}

#[derive(Debug)]
struct BlockState {
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
        Setting::MaxPostfixTextLen(0),
        Setting::Completed(false),
        Setting::ShowPercentage(true),
        Setting::ShowElapsedTime(false),
        Setting::ShowRemainingTime(false),
        Setting::SavedStartTime(false),
        Setting::ForegroundColor(Default::default()),
        Setting::FontStyles(Vec::new()),
        Setting::MaxProgress(100),
        Setting::Stream(Stream::stdout()),
    ]
}

impl BlockProgressBar {
    pub fn new(settings: impl IntoIterator<Item = Setting>) -> Self {
        let settings = Settings::new("BlockProgressBar", defaults(), settings);
        Self {
            state: Mutex::new(BlockState { core: Core::new(settings), progress: 0.0 }),
        }
    }

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

    pub fn tick(&self) {
        let mut state = self.state.lock();
        state.progress += 1.0;
        state.core.save_start_time();
        render::paint(&mut *state);
    }

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

impl Default for BlockProgressBar {
    fn default() -> Self {
        Self::new([])
    }
}

crate::impl_indicator!(BlockProgressBar);

impl crate::Determinate for BlockProgressBar {
    type Value = f64;

    fn set_progress(&self, value: f64) {
        BlockProgressBar::set_progress(self, value)
    }

    fn current(&self) -> f64 {
        BlockProgressBar::current(self)
    }
}

impl Line for BlockState {
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
        let scale = BlockScale::new(percentage, settings.bar_width());
        let mut line = format!("{}{}{scale}{}", settings.prefix_text(), settings.start(), settings.end());
        render::write_status(&mut line, &self.core, self.progress);
        line.push(' ');
        line.push_str(settings.postfix_text());
        render::finish_line(frame, &line)
    }

    fn check_completion(&mut self) {
        if self.progress >= self.core.settings.max_progress() as f64 {
            self.core.mark_completed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::Capture;

    fn block(capture: &Capture, width: usize) -> BlockProgressBar {
        BlockProgressBar::new([
            Setting::BarWidth(width),
            Setting::Stream(capture.stream(40)),
        ])
    }

    #[test]
    fn empty_body_is_blank() {
        let capture = Capture::default();
        let bar = block(&capture, 6);
        bar.set_progress(0.0);
        assert_eq!(capture.screen(), vec!["[      ] 0%"]);
    }

    #[test]
    fn full_body_is_solid() {
        let capture = Capture::default();
        let bar = block(&capture, 6);
        bar.set_progress(100.0);
        assert!(bar.is_completed());
        assert_eq!(capture.screen(), vec!["[██████] 100%", ""]);
    }

    #[test]
    fn partial_cells() {
        let capture = Capture::default();
        let bar = block(&capture, 10);
        bar.set_progress(45.0);
        assert_eq!(capture.screen(), vec!["[████▌     ] 45%"]);
    }

    #[test]
    fn overshoot_completes_without_clamping_storage() {
        let capture = Capture::default();
        let bar = block(&capture, 4);
        bar.set_progress(120.0);
        assert!(bar.is_completed());
        assert_eq!(bar.current(), 100.0);
        assert_eq!(capture.screen()[0], "[████] 100%");
    }

    #[test]
    fn unsupported_glyph_options_are_ignored() {
        let capture = Capture::default();
        let bar = BlockProgressBar::new([
            Setting::BarWidth(2),
            Setting::Fill("#".into()),
            Setting::ShowPercentage(false),
            Setting::Stream(capture.stream(20)),
        ]);
        bar.set_progress(100.0);
        assert_eq!(capture.screen()[0], "[██]");
    }
}
