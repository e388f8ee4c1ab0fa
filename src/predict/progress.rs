//! Progress presentation while an estimate is computed
//!
//! Purely cosmetic: the presentation walks a fixed schedule of completion
//! fractions, checking for completion every poll interval, and holds below
//! 100% until the estimate actually arrives. Dropping the future stops it.

use crate::config::schema::ProgressConfig;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Receiver of completion fractions in `0.0..=1.0`
pub trait ProgressSink: Send {
    /// Show a completion fraction
    fn set(&mut self, fraction: f64);

    /// The estimate arrived
    fn finish(&mut self);

    /// The wait was given up
    fn abandon(&mut self) {}
}

/// Sink that shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn set(&mut self, _fraction: f64) {}

    fn finish(&mut self) {}
}

/// Fractions to show and how long to linger on each
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSchedule {
    steps: Vec<f64>,
    delays: Vec<Duration>,
    poll_interval: Duration,
}

impl ProgressSchedule {
    /// Steps are clamped to `0.0..=1.0` and sorted; the poll interval is at least 1ms
    pub fn new(steps: Vec<f64>, delays: Vec<Duration>, poll_interval: Duration) -> Self {
        let mut steps: Vec<f64> = steps
            .into_iter()
            .filter(|s| s.is_finite())
            .map(|s| s.clamp(0.0, 1.0))
            .collect();
        steps.sort_by(f64::total_cmp);

        Self {
            steps,
            delays,
            poll_interval: poll_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn from_config(config: &ProgressConfig) -> Self {
        Self::new(
            config.steps.clone(),
            config
                .delays_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
            Duration::from_millis(config.poll_interval_ms),
        )
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Sum of all scheduled delays
    pub fn total_delay(&self) -> Duration {
        self.delays.iter().sum()
    }
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        Self::from_config(&ProgressConfig::default())
    }
}

/// Walk the schedule until `is_done` reports completion
pub async fn present<F>(schedule: &ProgressSchedule, sink: &mut dyn ProgressSink, mut is_done: F)
where
    F: FnMut() -> bool,
{
    let mut shown = 0;
    let mut done = false;

    for (step, delay) in schedule.steps.iter().zip(&schedule.delays) {
        sink.set(*step);
        shown += 1;
        if wait_for(*delay, schedule.poll_interval, &mut is_done).await {
            done = true;
            break;
        }
    }

    if !done {
        // Out of schedule: hold on the next step short of 100%
        if let Some(hold) = schedule.steps[shown..].iter().find(|s| **s < 1.0) {
            sink.set(*hold);
        }
        while !is_done() {
            sleep(schedule.poll_interval).await;
        }
    }

    sink.set(1.0);
    sink.finish();
}

/// Poll for up to `delay`; true once complete
async fn wait_for<F>(delay: Duration, poll: Duration, is_done: &mut F) -> bool
where
    F: FnMut() -> bool,
{
    let start = Instant::now();
    loop {
        if is_done() {
            return true;
        }
        let elapsed = start.elapsed();
        if elapsed >= delay {
            return false;
        }
        sleep(poll.min(delay - elapsed)).await;
    }
}
