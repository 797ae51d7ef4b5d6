use std::io::Write;
use std::sync::Arc;

use owo_colors::OwoColorize;
use parking_lot::Mutex;

use crate::prelude::*;

/// Interprets the subset of terminal output the indicators produce:
/// `\r`, `\n`, `ESC[nA/B/C/D`, `ESC[K`, and SGR sequences (skipped).
pub struct VirtualTerm {
    pub lines: Vec<Vec<char>>,
    pub cursor_row: usize,
    pub cursor_col: usize,
    buf: Vec<u8>,
}

impl VirtualTerm {
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            cursor_row: 0,
            cursor_col: 0,
            buf: Vec::new(),
        }
    }

    /// Visible lines with trailing blanks trimmed.
    pub fn screen(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    pub fn render(&self) -> String {
        self.screen().join("\n")
    }

    fn ensure_row(&mut self, row: usize) {
        while self.lines.len() <= row {
            self.lines.push(Vec::new());
        }
    }

    fn put(&mut self, c: char) {
        self.ensure_row(self.cursor_row);
        let line = &mut self.lines[self.cursor_row];
        while line.len() < self.cursor_col {
            line.push(' ');
        }
        if self.cursor_col < line.len() {
            line[self.cursor_col] = c;
        } else {
            line.push(c);
        }
        self.cursor_col += 1;
    }

    fn escape(&mut self, params: &str, code: char) {
        let n = params.parse::<usize>().unwrap_or(1);
        match code {
            'A' => self.cursor_row = self.cursor_row.saturating_sub(n),
            'B' => {
                self.cursor_row += n;
                self.ensure_row(self.cursor_row);
            }
            'C' => self.cursor_col += n,
            'D' => self.cursor_col = self.cursor_col.saturating_sub(n),
            'K' => {
                self.ensure_row(self.cursor_row);
                self.lines[self.cursor_row].truncate(self.cursor_col);
            }
            _ => {}
        }
    }

    fn process(&mut self, s: &str) {
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            match c {
                '\x1b' => {
                    // ESC [ params final
                    chars.next();
                    let mut params = String::new();
                    for c in chars.by_ref() {
                        if c.is_ascii_alphabetic() {
                            self.escape(&params, c);
                            break;
                        }
                        params.push(c);
                    }
                }
                '\n' => {
                    self.cursor_row += 1;
                    self.cursor_col = 0;
                    self.ensure_row(self.cursor_row);
                }
                '\r' => self.cursor_col = 0,
                _ => self.put(c),
            }
        }
    }
}

impl std::io::Write for VirtualTerm {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buf.is_empty() {
            let s = String::from_utf8(std::mem::take(&mut self.buf)).unwrap();
            self.process(&s);
        }
        Ok(())
    }
}

/// A sink whose bytes stay readable after it was moved into a [`Stream`].
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    /// Everything written so far, verbatim.
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }

    /// A plain stream into this capture, `columns` wide.
    pub fn stream(&self, columns: usize) -> Stream {
        Stream::from_writer(self.clone()).with_columns(columns)
    }

    /// What a terminal would show after receiving everything written so far.
    pub fn screen(&self) -> Vec<String> {
        let mut term = VirtualTerm::new();
        term.write_all(&self.0.lock()).unwrap();
        term.flush().unwrap();
        term.screen()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn bar(capture: &Capture, prefix: &str) -> ProgressBar {
    ProgressBar::new([
        Setting::BarWidth(10),
        Setting::PrefixText(prefix.into()),
        Setting::MaxProgress(10),
        Setting::Stream(capture.stream(30)),
    ])
}

#[test]
fn test_virtual_term() {
    let mut term = VirtualTerm::new();
    write!(term, "one\ntwo\x1b[1A\rONE\x1b[K\n\x1b[31mthree\x1b[00m").unwrap();
    term.flush().unwrap();
    assert_eq!(term.render(), "ONE\nthree");
}

#[test]
fn test_mark_as_completed_is_idempotent() {
    let capture = Capture::default();
    let bar = bar(&capture, "");
    bar.set_progress(4.0);
    bar.mark_as_completed();
    bar.mark_as_completed();
    assert_eq!(capture.text().matches('\n').count(), 1);
    assert_eq!(capture.screen(), vec!["[====>     ]", ""]);
}

#[test]
fn test_completion_then_more_ticks_stays_closed() {
    let capture = Capture::default();
    let bar = bar(&capture, "");
    bar.set_progress(10.0);
    bar.tick();
    bar.set_progress(3.0);
    assert_eq!(capture.text().matches('\n').count(), 1);
    assert_eq!(capture.screen(), vec!["[==========]", ""]);
}

#[test]
fn test_current_is_monotonic_under_tick() {
    let capture = Capture::default();
    let bar = bar(&capture, "");
    let mut last = bar.current();
    for _ in 0..15 {
        bar.tick();
        let now = bar.current();
        assert!(now >= last);
        assert!(now <= 10.0);
        last = now;
    }
    assert_eq!(last, 10.0);
}

#[test]
fn test_multi_progress_moves_up_by_previous_block() {
    let capture = Capture::default();
    let (a, b, c) = (bar(&capture, "a "), bar(&capture, "b "), bar(&capture, "c "));
    let multi = MultiProgress::new([&a, &b, &c]).with_stream(capture.stream(30));

    multi.tick::<0>();
    let first = capture.text();
    assert_eq!(first.matches('\n').count(), 3);
    assert!(!first.contains("\x1b["));

    multi.tick::<1>();
    multi.tick::<2>();
    let raw = capture.text();
    assert_eq!(raw.matches('\n').count(), 9);
    assert_eq!(raw.matches("\x1b[3A").count(), 2);
    assert_eq!(raw.matches("\x1b[").count(), 2);

    assert_eq!(
        capture.screen(),
        vec!["a [=>        ]", "b [=>        ]", "c [=>        ]", ""],
    );
}

#[test]
fn test_multi_progress_members_finish_independently() {
    let capture = Capture::default();
    let (a, b) = (bar(&capture, "a "), bar(&capture, "b "));
    let multi = MultiProgress::new([&a, &b]).with_stream(capture.stream(30));
    for _ in 0..10 {
        multi.tick::<0>();
    }
    assert!(multi.is_completed::<0>());
    assert!(!multi.is_completed::<1>());
    multi.set_progress::<1>(10.0);
    assert!(multi.is_all_completed());
    assert_eq!(
        capture.screen(),
        vec!["a [==========]", "b [==========]", ""],
    );
}

#[test]
fn test_dynamic_hide_erases_previous_visible_lines() {
    let capture = Capture::default();
    let (a, b, c) = (bar(&capture, "a "), bar(&capture, "b "), bar(&capture, "c "));
    let dynamic = DynamicProgress::new([&a, &b]);
    dynamic.set_option(Setting::HideBarWhenComplete(true));
    dynamic.set_option(Setting::Stream(capture.stream(30)));
    dynamic.push_back(&c);

    dynamic.print_progress();
    assert!(!capture.text().contains("\x1b["));
    assert_eq!(capture.screen().len(), 4);

    dynamic[1].set_progress(10.0);
    capture.clear();
    dynamic.print_progress();
    // three lines were visible before b completed
    assert_eq!(capture.text().matches("\x1b[1A\r\x1b[K").count(), 3);

    capture.clear();
    dynamic.print_progress();
    assert_eq!(capture.text().matches("\x1b[1A\r\x1b[K").count(), 2);
    assert_eq!(capture.text().matches('\n').count(), 2);
}

#[test]
fn test_dynamic_hide_leaves_only_unfinished_on_screen() {
    let capture = Capture::default();
    let (a, b) = (bar(&capture, "a "), bar(&capture, "b "));
    let dynamic = DynamicProgress::new([&a, &b]);
    dynamic.set_option(Setting::HideBarWhenComplete(true));
    dynamic.set_option(Setting::Stream(capture.stream(30)));

    dynamic.print_progress();
    a.set_progress(10.0);
    dynamic.print_progress();
    dynamic.print_progress();
    // erased rows stay blank below the block
    assert_eq!(capture.screen(), vec!["b [>         ]", "", ""]);
}

#[test]
fn test_dynamic_full_mode_repaints_all() {
    let capture = Capture::default();
    let (a, b) = (bar(&capture, "a "), bar(&capture, "b "));
    let dynamic = DynamicProgress::new([&a]);
    dynamic.set_option(Setting::Stream(capture.stream(30)));
    dynamic[0].tick();
    dynamic.push_back(&b);
    dynamic.print_progress();
    assert_eq!(capture.text().matches("\x1b[1A").count(), 1);
    assert_eq!(
        capture.screen(),
        vec!["a [=>        ]", "b [>         ]", ""],
    );
}

#[test]
fn test_dynamic_switching_to_hide_erases_full_block() {
    let capture = Capture::default();
    let (a, b, c) = (bar(&capture, "a "), bar(&capture, "b "), bar(&capture, "c "));
    let dynamic = DynamicProgress::new([&a]);
    dynamic.set_option(Setting::Stream(capture.stream(30)));
    dynamic.print_progress();
    dynamic.push_back(&b);
    dynamic.push_back(&c);
    dynamic.print_progress();

    dynamic.set_option(Setting::HideBarWhenComplete(true));
    dynamic.print_progress();
    assert_eq!(
        capture.screen(),
        vec!["a [>         ]", "b [>         ]", "c [>         ]", ""],
    );
}

#[test]
fn test_dynamic_switching_to_full_moves_up_visible_lines() {
    let capture = Capture::default();
    let (a, b, c) = (bar(&capture, "a "), bar(&capture, "b "), bar(&capture, "c "));
    capture.clone().write_all(b"header\n").unwrap();
    let dynamic = DynamicProgress::new([&a, &b, &c]);
    dynamic.set_option(Setting::HideBarWhenComplete(true));
    dynamic.set_option(Setting::Stream(capture.stream(30)));
    dynamic.print_progress();

    a.set_progress(10.0);
    b.set_progress(10.0);
    dynamic.print_progress();
    assert_eq!(capture.screen(), vec!["header", "c [>         ]", "", "", ""]);

    dynamic.set_option(Setting::HideBarWhenComplete(false));
    dynamic.print_progress();
    assert_eq!(
        capture.screen(),
        vec!["header", "a [==========]", "b [==========]", "c [>         ]", ""],
    );
}

#[test]
fn test_wide_prefix_is_padded_by_cells() {
    let capture = Capture::default();
    let bar = bar(&capture, "中文 ");
    bar.tick();
    let raw = capture.text();
    let line = raw.trim_end_matches('\r');
    assert_eq!(display_width(line), 30);
}

#[test]
fn test_colored_prefix_is_padded_by_visible_width() {
    let capture = Capture::default();
    let prefix = format!("{} ", "ok".green());
    let bar = bar(&capture, &prefix);
    bar.tick();
    let raw = capture.text();
    let line = raw.trim_end_matches('\r');
    assert_eq!(display_width(line), 30);
    assert_eq!(capture.screen(), vec!["ok [=>        ]"]);
}

#[test]
fn test_concurrent_ticks_complete_once() {
    let capture = Capture::default();
    let bar = ProgressBar::new([
        Setting::BarWidth(20),
        Setting::MaxProgress(100),
        Setting::Stream(capture.stream(40)),
    ]);
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..25 {
                    bar.tick();
                }
            });
        }
    });
    assert!(bar.is_completed());
    assert_eq!(bar.current(), 100.0);
    assert_eq!(capture.text().matches('\n').count(), 1);
}

#[test]
fn test_shared_stream_frames_never_interleave() {
    let capture = Capture::default();
    let stream = capture.stream(30);
    let make = |prefix: &str| {
        ProgressBar::new([
            Setting::BarWidth(10),
            Setting::PrefixText(prefix.into()),
            Setting::MaxProgress(1000),
            Setting::Stream(stream.clone()),
        ])
    };
    let (a, b) = (make("a "), make("b "));
    std::thread::scope(|s| {
        s.spawn(|| (0..200).for_each(|_| a.tick()));
        s.spawn(|| (0..200).for_each(|_| b.tick()));
    });
    for frame in capture.text().split_terminator('\r') {
        assert!(frame.starts_with("a [") || frame.starts_with("b ["), "{frame:?}");
        assert_eq!(display_width(frame), 30);
    }
}

#[test]
fn test_unsupported_option_is_logged() {
    let logs = Capture::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let _ = BlockProgressBar::new([
            Setting::Lead("<>".into()),
            Setting::Stream(Stream::from_writer(Vec::new())),
        ]);
    });
    let logs = logs.text();
    assert!(logs.contains("ignoring unsupported option"));
    assert!(logs.contains("BlockProgressBar"));
}
