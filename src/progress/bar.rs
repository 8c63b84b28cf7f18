//! Terminal progress bar

use super::{ProgressEvent, ProgressHandler};
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{msg}: {percent:>3}%|{wide_bar}| {pos}/{len} [{elapsed_precise}<{eta_precise}]";

/// Draws an `indicatif` bar on stderr and prints one line per finished article.
#[derive(Debug)]
pub struct BarHandler {
    bar: ProgressBar,
}

impl Default for BarHandler {
    fn default() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }
}

impl BarHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bar(bar: ProgressBar) -> Self {
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            bar.set_style(style);
        }
        bar.set_message("Processing articles");
        Self { bar }
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl ProgressHandler for BarHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { total } => {
                self.bar.set_length(*total as u64);
                self.bar.set_position(0);
                if *total == 0 {
                    self.bar.finish();
                }
            }
            ProgressEvent::RecordStarted { .. } | ProgressEvent::BackendAnswered { .. } => {}
            ProgressEvent::RecordComplete {
                index, total, name, ..
            } => {
                self.bar.println(format!("Processed article: {}", name));
                self.bar.set_position(*index as u64);
                if index == total {
                    self.bar.finish();
                }
            }
        }
    }
}
