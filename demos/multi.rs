//! Three bars updated from three threads through one `MultiProgress`.

use std::thread;
use std::time::Duration;

use term_indicators::*;

fn bar(name: &str, color: Color) -> ProgressBar {
    ProgressBar::new([
        Setting::BarWidth(40),
        Setting::PrefixText(format!("{name:<10}")),
        Setting::ForegroundColor(color),
        Setting::ShowElapsedTime(true),
        Setting::ShowRemainingTime(true),
    ])
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let first = bar("fetch", Color::Yellow);
    let second = bar("compile", Color::Cyan);
    let third = bar("link", Color::Green);
    let bars = MultiProgress::new([&first, &second, &third]);

    thread::scope(|s| {
        s.spawn(|| {
            while !bars.is_completed::<0>() {
                bars.tick::<0>();
                thread::sleep(Duration::from_millis(50));
            }
        });
        s.spawn(|| {
            while !bars.is_completed::<1>() {
                bars.tick::<1>();
                thread::sleep(Duration::from_millis(80));
            }
        });
        s.spawn(|| {
            let mut progress = 0.0;
            while !bars.is_completed::<2>() {
                progress += 0.5;
                bars.set_progress::<2>(progress);
                thread::sleep(Duration::from_millis(30));
            }
        });
    });
}
