//! A single determinate bar with elapsed and remaining time, then a
//! decremental one.
//!
//! Log events go to stderr so they do not tear the bars on stdout.

use std::thread;
use std::time::Duration;

use term_indicators::*;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let bar = ProgressBar::new([
        Setting::BarWidth(50),
        Setting::Start("[".into()),
        Setting::Fill("=".into()),
        Setting::Lead(">".into()),
        Setting::Remainder(" ".into()),
        Setting::End("]".into()),
        Setting::PostfixText("Extracting archive".into()),
        Setting::ForegroundColor(Color::Green),
        Setting::ShowPercentage(true),
        Setting::ShowElapsedTime(true),
        Setting::ShowRemainingTime(true),
        Setting::FontStyles(vec![FontStyle::Bold]),
    ]);

    while !bar.is_completed() {
        bar.tick();
        thread::sleep(Duration::from_millis(40));
    }

    // A decremental bar counts down and completes at its minimum.
    let countdown = ProgressBar::new([
        Setting::BarWidth(50),
        Setting::PrefixText("Cooling down ".into()),
        Setting::ProgressType(ProgressType::Decremental),
        Setting::ForegroundColor(Color::Cyan),
    ]);
    while !countdown.is_completed() {
        countdown.tick();
        thread::sleep(Duration::from_millis(20));
    }
}
