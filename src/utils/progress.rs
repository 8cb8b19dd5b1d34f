use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Terminal spinner standing in for a view's loading indicator.
pub struct LoadingIndicator {
    progress_bar: Option<ProgressBar>,
    label: String,
}

impl LoadingIndicator {
    pub fn new(enabled: bool, label: &str) -> Self {
        let progress_bar = enabled.then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        Self {
            progress_bar,
            label: label.to_string(),
        }
    }

    pub fn start(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("{}...", self.label));
        }
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        if let Some(pb) = &self.progress_bar {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}
