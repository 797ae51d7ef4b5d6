//! Indicators shared with tokio tasks.
//!
//! The bars are leaked to get `'static` references, so the composition can
//! move into spawned tasks without scoped threads.

use std::time::Duration;

use owo_colors::OwoColorize;
use term_indicators::*;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let download: &'static ProgressBar = Box::leak(Box::new(ProgressBar::new([
        Setting::BarWidth(40),
        Setting::PrefixText(format!("{} ", "download".blue())),
        Setting::ShowPercentage(true),
    ])));
    let unpack: &'static ProgressBar = Box::leak(Box::new(ProgressBar::new([
        Setting::BarWidth(40),
        Setting::PrefixText(format!("{} ", "unpack  ".magenta())),
        Setting::ShowPercentage(true),
    ])));
    let bars: &'static MultiProgress<'static, ProgressBar, 2> =
        Box::leak(Box::new(MultiProgress::new([download, unpack])));

    let (tx, mut rx) = mpsc::unbounded_channel::<u64>();

    let producer = tokio::spawn(async move {
        for chunk in 1..=50 {
            bars.set_progress::<0>(chunk as f64 * 2.0);
            let _ = tx.send(chunk);
            sleep(40).await;
        }
    });

    let consumer = tokio::spawn(async move {
        while let Some(chunk) = rx.recv().await {
            sleep(60).await;
            bars.set_progress::<1>(chunk as f64 * 2.0);
        }
    });

    let _ = tokio::join!(producer, consumer);
}

async fn sleep(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
