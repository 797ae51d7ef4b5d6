//! A `DynamicProgress` that grows while running and hides finished bars.

use std::thread;
use std::time::Duration;

use term_indicators::*;

fn bar(name: &str) -> ProgressBar {
    ProgressBar::new([
        Setting::BarWidth(40),
        Setting::PrefixText(format!("{name:<12}")),
        Setting::ShowPercentage(true),
        Setting::ForegroundColor(Color::Cyan),
    ])
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let jobs = [bar("small.tar"), bar("medium.tar"), bar("large.tar")];
    let bars = DynamicProgress::new([&jobs[0]]);
    bars.set_option(Setting::HideBarWhenComplete(true));

    thread::scope(|s| {
        for (i, speed) in [(0, 4.0), (1, 2.0), (2, 1.0)] {
            let bars = &bars;
            let job = &jobs[i];
            s.spawn(move || {
                let idx = if i == 0 { 0 } else { bars.push_back(job) };
                let mut progress = 0.0;
                while !bars[idx].is_completed() {
                    progress += speed;
                    job.set_progress(progress);
                    thread::sleep(Duration::from_millis(60));
                }
            });
            thread::sleep(Duration::from_millis(500));
        }
    });
    bars.print_progress();
}
