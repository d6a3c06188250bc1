use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for a batch of `len` evaluations.
pub fn start(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    let template = "{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len}";
    let style = ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
        .progress_chars("━╸ ");

    bar.set_style(style);
    bar.set_message("Evaluating items");
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
