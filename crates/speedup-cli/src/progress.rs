//! Progress bar over the measurement grid.

use std::sync::atomic::{AtomicU32, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

use speedup_core::observer::MeasureObserver;
use speedup_core::sample::SampleError;
use speedup_core::MeasurementKey;

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg} (eta {eta})";

/// Observer that drives an `indicatif` progress bar, one tick per invocation.
pub struct ProgressBarObserver {
    bar: ProgressBar,
    failed: AtomicU32,
}

impl ProgressBarObserver {
    /// Create the observer. A hidden bar still counts failures.
    #[must_use]
    pub fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        bar.set_style(
            ProgressStyle::with_template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        Self {
            bar,
            failed: AtomicU32::new(0),
        }
    }

    /// Number of samples whose output could not be parsed.
    #[must_use]
    pub fn failed_samples(&self) -> u32 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Invocations recorded so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl MeasureObserver for ProgressBarObserver {
    fn on_start(&self, total_invocations: u64) {
        self.bar.set_length(total_invocations);
        self.bar.set_position(0);
    }

    fn on_sample(
        &self,
        key: &MeasurementKey,
        _repetition: u32,
        outcome: &Result<f64, SampleError>,
    ) {
        if outcome.is_err() {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        self.bar.set_message(key.to_string());
        self.bar.inc(1);
    }

    fn on_finish(&self) {
        self.bar.finish_and_clear();
    }
}
