use indexmap::IndexMap;
use tracing::debug;

use crate::term::Stream;
use crate::width::display_width;

/// Foreground color of an indicator line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    Grey,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// Leave the terminal's current color alone.
    #[default]
    Unspecified,
}

/// Font attribute applied to an indicator line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Bold,
    Dark,
    Italic,
    Underline,
    Blink,
    Reverse,
    Concealed,
    Crossed,
}

/// Direction a determinate bar moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgressType {
    /// Starts at `min_progress` and completes at `max_progress`.
    #[default]
    Incremental,
    /// Starts at `max_progress` and completes at `min_progress`.
    Decremental,
}

/// Name of a configuration option, without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    BarWidth,
    PrefixText,
    PostfixText,
    Start,
    End,
    Fill,
    Lead,
    Remainder,
    MaxPostfixTextLen,
    Completed,
    ShowPercentage,
    ShowElapsedTime,
    ShowRemainingTime,
    SavedStartTime,
    ForegroundColor,
    ShowSpinner,
    SpinnerStates,
    HideBarWhenComplete,
    FontStyles,
    MinProgress,
    MaxProgress,
    ProgressType,
    Stream,
}

/// A configuration option together with its typed value.
///
/// Indicators are built from an unordered list of settings; every option
/// left out takes the indicator's default. Each variant only accepts the
/// options it renders, anything else is ignored.
///
/// ```rust,ignore
/// let bar = ProgressBar::new([
///     Setting::BarWidth(50),
///     Setting::Fill("■".into()),
///     Setting::Lead("■".into()),
///     Setting::ShowPercentage(true),
/// ]);
/// ```
#[derive(Debug, Clone)]
pub enum Setting {
    /// Width of the bar body in terminal cells.
    BarWidth(usize),
    PrefixText(String),
    PostfixText(String),
    /// Opening delimiter of the bar body.
    Start(String),
    /// Closing delimiter of the bar body.
    End(String),
    Fill(String),
    /// Glyph marking the current edge of progress.
    Lead(String),
    Remainder(String),
    /// Widest postfix seen so far, in terminal cells.
    MaxPostfixTextLen(usize),
    Completed(bool),
    ShowPercentage(bool),
    ShowElapsedTime(bool),
    ShowRemainingTime(bool),
    /// Whether the start time has been captured.
    SavedStartTime(bool),
    ForegroundColor(Color),
    ShowSpinner(bool),
    /// Frames a spinner cycles through.
    SpinnerStates(Vec<String>),
    /// Only print unfinished members of a [`crate::DynamicProgress`].
    HideBarWhenComplete(bool),
    FontStyles(Vec<FontStyle>),
    MinProgress(usize),
    MaxProgress(usize),
    ProgressType(ProgressType),
    Stream(Stream),
}

impl Setting {
    /// Returns the option this setting assigns.
    pub fn kind(&self) -> OptionKind {
        match self {
            Setting::BarWidth(_) => OptionKind::BarWidth,
            Setting::PrefixText(_) => OptionKind::PrefixText,
            Setting::PostfixText(_) => OptionKind::PostfixText,
            Setting::Start(_) => OptionKind::Start,
            Setting::End(_) => OptionKind::End,
            Setting::Fill(_) => OptionKind::Fill,
            Setting::Lead(_) => OptionKind::Lead,
            Setting::Remainder(_) => OptionKind::Remainder,
            Setting::MaxPostfixTextLen(_) => OptionKind::MaxPostfixTextLen,
            Setting::Completed(_) => OptionKind::Completed,
            Setting::ShowPercentage(_) => OptionKind::ShowPercentage,
            Setting::ShowElapsedTime(_) => OptionKind::ShowElapsedTime,
            Setting::ShowRemainingTime(_) => OptionKind::ShowRemainingTime,
            Setting::SavedStartTime(_) => OptionKind::SavedStartTime,
            Setting::ForegroundColor(_) => OptionKind::ForegroundColor,
            Setting::ShowSpinner(_) => OptionKind::ShowSpinner,
            Setting::SpinnerStates(_) => OptionKind::SpinnerStates,
            Setting::HideBarWhenComplete(_) => OptionKind::HideBarWhenComplete,
            Setting::FontStyles(_) => OptionKind::FontStyles,
            Setting::MinProgress(_) => OptionKind::MinProgress,
            Setting::MaxProgress(_) => OptionKind::MaxProgress,
            Setting::ProgressType(_) => OptionKind::ProgressType,
            Setting::Stream(_) => OptionKind::Stream,
        }
    }

    /// Builds a [`Setting::SpinnerStates`] from borrowed frames.
    pub fn spinner_states(frames: &[&str]) -> Self {
        Setting::SpinnerStates(frames.iter().map(|f| f.to_string()).collect())
    }
}

/// The resolved configuration of one indicator or composition.
///
/// Holds exactly one value per supported option. The supported set is the
/// set of options the owner provides defaults for.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    owner: &'static str,
    values: IndexMap<OptionKind, Setting>,
}

impl Settings {
    /// Resolves `supplied` against `defaults`.
    ///
    /// When an option is supplied more than once the first occurrence wins.
    pub(crate) fn new(
        owner: &'static str, defaults: Vec<Setting>, supplied: impl IntoIterator<Item = Setting>,
    ) -> Self {
        let supported: Vec<OptionKind> = defaults.iter().map(Setting::kind).collect();
        let mut values = IndexMap::with_capacity(defaults.len());

        for setting in supplied {
            let kind = setting.kind();
            if !supported.contains(&kind) {
                debug!(owner, option = ?kind, "ignoring unsupported option");
                continue;
            }
            if values.contains_key(&kind) {
                debug!(owner, option = ?kind, "ignoring duplicate option, first occurrence wins");
                continue;
            }
            values.insert(kind, setting);
        }

        for default in defaults {
            values.entry(default.kind()).or_insert(default);
        }

        let mut settings = Self { owner, values };
        let postfix_width = display_width(settings.postfix_text());
        if postfix_width > settings.max_postfix_text_len() {
            settings.raise_max_postfix_text_len(postfix_width);
        }
        settings
    }

    /// Replaces the value of a supported option.
    ///
    /// Assigning the postfix text also raises the postfix high-water mark.
    /// Returns `false` if the owner does not support the option.
    pub(crate) fn set(&mut self, setting: Setting) -> bool {
        let kind = setting.kind();
        let Some(slot) = self.values.get_mut(&kind) else {
            debug!(owner = self.owner, option = ?kind, "ignoring unsupported option");
            return false;
        };

        let postfix_width = match &setting {
            Setting::PostfixText(text) => Some(display_width(text)),
            _ => None,
        };
        *slot = setting;

        if let Some(width) = postfix_width
            && width > self.max_postfix_text_len()
        {
            self.raise_max_postfix_text_len(width);
        }
        true
    }

    #[cfg(test)]
    pub(crate) fn supports(&self, kind: OptionKind) -> bool {
        self.values.contains_key(&kind)
    }

    pub(crate) fn get(&self, kind: OptionKind) -> Option<&Setting> {
        self.values.get(&kind)
    }

    fn raise_max_postfix_text_len(&mut self, width: usize) {
        if let Some(slot) = self.values.get_mut(&OptionKind::MaxPostfixTextLen) {
            *slot = Setting::MaxPostfixTextLen(width);
        }
    }

    fn text(&self, kind: OptionKind) -> &str {
        match self.get(kind) {
            Some(
                Setting::PrefixText(s)
                | Setting::PostfixText(s)
                | Setting::Start(s)
                | Setting::End(s)
                | Setting::Fill(s)
                | Setting::Lead(s)
                | Setting::Remainder(s),
            ) => s,
            _ => "",
        }
    }

    fn count(&self, kind: OptionKind) -> usize {
        match self.get(kind) {
            Some(
                Setting::BarWidth(n)
                | Setting::MaxPostfixTextLen(n)
                | Setting::MinProgress(n)
                | Setting::MaxProgress(n),
            ) => *n,
            _ => 0,
        }
    }

    fn flag(&self, kind: OptionKind) -> bool {
        match self.get(kind) {
            Some(
                Setting::Completed(b)
                | Setting::ShowPercentage(b)
                | Setting::ShowElapsedTime(b)
                | Setting::ShowRemainingTime(b)
                | Setting::SavedStartTime(b)
                | Setting::ShowSpinner(b)
                | Setting::HideBarWhenComplete(b),
            ) => *b,
            _ => false,
        }
    }

    pub(crate) fn bar_width(&self) -> usize {
        self.count(OptionKind::BarWidth)
    }

    pub(crate) fn prefix_text(&self) -> &str {
        self.text(OptionKind::PrefixText)
    }

    pub(crate) fn postfix_text(&self) -> &str {
        self.text(OptionKind::PostfixText)
    }

    pub(crate) fn start(&self) -> &str {
        self.text(OptionKind::Start)
    }

    pub(crate) fn end(&self) -> &str {
        self.text(OptionKind::End)
    }

    pub(crate) fn fill(&self) -> &str {
        self.text(OptionKind::Fill)
    }

    pub(crate) fn lead(&self) -> &str {
        self.text(OptionKind::Lead)
    }

    pub(crate) fn remainder(&self) -> &str {
        self.text(OptionKind::Remainder)
    }

    pub(crate) fn max_postfix_text_len(&self) -> usize {
        self.count(OptionKind::MaxPostfixTextLen)
    }

    pub(crate) fn min_progress(&self) -> usize {
        self.count(OptionKind::MinProgress)
    }

    pub(crate) fn max_progress(&self) -> usize {
        self.count(OptionKind::MaxProgress)
    }

    pub(crate) fn completed(&self) -> bool {
        self.flag(OptionKind::Completed)
    }

    pub(crate) fn show_percentage(&self) -> bool {
        self.flag(OptionKind::ShowPercentage)
    }

    pub(crate) fn show_elapsed_time(&self) -> bool {
        self.flag(OptionKind::ShowElapsedTime)
    }

    pub(crate) fn show_remaining_time(&self) -> bool {
        self.flag(OptionKind::ShowRemainingTime)
    }

    pub(crate) fn saved_start_time(&self) -> bool {
        self.flag(OptionKind::SavedStartTime)
    }

    pub(crate) fn show_spinner(&self) -> bool {
        self.flag(OptionKind::ShowSpinner)
    }

    pub(crate) fn hide_bar_when_complete(&self) -> bool {
        self.flag(OptionKind::HideBarWhenComplete)
    }

    pub(crate) fn foreground_color(&self) -> Color {
        match self.get(OptionKind::ForegroundColor) {
            Some(Setting::ForegroundColor(color)) => *color,
            _ => Color::Unspecified,
        }
    }

    pub(crate) fn font_styles(&self) -> &[FontStyle] {
        match self.get(OptionKind::FontStyles) {
            Some(Setting::FontStyles(styles)) => styles,
            _ => &[],
        }
    }

    pub(crate) fn spinner_states(&self) -> &[String] {
        match self.get(OptionKind::SpinnerStates) {
            Some(Setting::SpinnerStates(states)) => states,
            _ => &[],
        }
    }

    pub(crate) fn progress_type(&self) -> ProgressType {
        match self.get(OptionKind::ProgressType) {
            Some(Setting::ProgressType(kind)) => *kind,
            _ => ProgressType::Incremental,
        }
    }

    pub(crate) fn stream(&self) -> Stream {
        match self.get(OptionKind::Stream) {
            Some(Setting::Stream(stream)) => stream.clone(),
            _ => Stream::stdout(),
        }
    }
}
