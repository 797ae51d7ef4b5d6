//! A bouncing bar while a background job runs, completed by the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use term_indicators::*;

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let bar = IndeterminateProgressBar::new([
        Setting::BarWidth(40),
        Setting::Start("[".into()),
        Setting::Fill("·".into()),
        Setting::Lead("<==>".into()),
        Setting::End("]".into()),
        Setting::PostfixText("Checking for updates".into()),
        Setting::ForegroundColor(Color::Yellow),
    ]);

    let done = AtomicBool::new(false);
    thread::scope(|s| {
        s.spawn(|| {
            thread::sleep(Duration::from_secs(4));
            done.store(true, Ordering::Release);
        });
        while !done.load(Ordering::Acquire) {
            bar.tick();
            thread::sleep(Duration::from_millis(40));
        }
    });

    bar.set_option(Setting::ForegroundColor(Color::Green));
    bar.set_option(Setting::PrefixText("✔ ".into()));
    bar.set_option(Setting::PostfixText("Updated".into()));
    bar.mark_as_completed();
}
