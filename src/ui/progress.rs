//! Progress indicators with plain fallback

use super::context::UiContext;
use super::theme::WagecastTheme;
use crate::predict::ProgressSink;
use console::style;
use indicatif::ProgressBar;
use std::time::Duration;

/// Bar length; fractions are scaled to this
const BAR_LEN: u64 = 100;

/// Progress of a pending salary estimate
///
/// Draws an indicatif bar in a terminal. Otherwise each new whole
/// percentage is written to stderr so piped stdout stays clean.
pub struct EstimateProgress {
    bar: Option<ProgressBar>,
    label: String,
    last_percent: Option<u64>,
}

impl EstimateProgress {
    pub fn new(ctx: &UiContext, label: &str) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(BAR_LEN);
            bar.set_style(WagecastTheme.estimate_style());
            bar.set_prefix(label.to_string());
            bar.enable_steady_tick(Duration::from_millis(120));
            Some(bar)
        } else {
            None
        };

        Self {
            bar,
            label: label.to_string(),
            last_percent: None,
        }
    }

    /// Last whole percentage shown
    pub fn percent(&self) -> Option<u64> {
        self.last_percent
    }

    fn show(&mut self, percent: u64) {
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);
        match self.bar {
            Some(ref bar) => bar.set_position(percent),
            None => eprintln!("{} {}%", style(&self.label).dim(), percent),
        }
    }
}

impl ProgressSink for EstimateProgress {
    fn set(&mut self, fraction: f64) {
        let percent = (fraction.clamp(0.0, 1.0) * BAR_LEN as f64).round() as u64;
        self.show(percent);
    }

    fn finish(&mut self) {
        self.show(BAR_LEN);
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }
}

impl Drop for EstimateProgress {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
