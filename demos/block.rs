//! A block bar moving in fractional steps, showing the eighth-cell glyphs.

use std::thread;
use std::time::Duration;

use owo_colors::OwoColorize;
use term_indicators::*;

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let bar = BlockProgressBar::new([
        Setting::BarWidth(60),
        Setting::PrefixText(format!("{} ", "Loading".bold())),
        Setting::ForegroundColor(Color::White),
        Setting::ShowElapsedTime(true),
    ]);

    let mut progress = 0.0;
    while !bar.is_completed() {
        progress += 0.25;
        bar.set_progress(progress);
        thread::sleep(Duration::from_millis(10));
    }
}
