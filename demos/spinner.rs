//! Spinners driven by a sleep loop, including a shrinking postfix.

use std::thread;
use std::time::Duration;

use term_indicators::*;

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let spinner = ProgressSpinner::new([
        Setting::PostfixText("Checking credentials".into()),
        Setting::ForegroundColor(Color::Yellow),
        Setting::spinner_states(presets::DOTS),
        Setting::FontStyles(vec![FontStyle::Bold]),
    ]);

    for i in 0..100 {
        if i == 50 {
            spinner.set_option(Setting::PostfixText("Almost".into()));
        }
        spinner.tick();
        thread::sleep(Duration::from_millis(40));
    }
    spinner.set_option(Setting::ForegroundColor(Color::Green));
    spinner.set_option(Setting::PrefixText("✔".into()));
    spinner.set_option(Setting::ShowSpinner(false));
    spinner.set_option(Setting::ShowPercentage(false));
    spinner.set_option(Setting::PostfixText("Authenticated!".into()));
    spinner.mark_as_completed();

    let arrows = ProgressSpinner::new([
        Setting::spinner_states(presets::ARROW),
        Setting::PostfixText("Turning".into()),
        Setting::MaxProgress(40),
    ]);
    while !arrows.is_completed() {
        arrows.tick();
        thread::sleep(Duration::from_millis(80));
    }
}
