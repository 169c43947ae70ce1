//! Progress callbacks emitted while measuring.

use crate::measurement::MeasurementKey;
use crate::sample::SampleError;
use crate::stats::SampleSummary;

/// Observer notified as the runner works through the grid.
///
/// All methods default to no-ops.
pub trait MeasureObserver {
    /// Called once before the first invocation.
    fn on_start(&self, _total_invocations: u64) {}

    /// Called after every invocation with its parse outcome.
    fn on_sample(
        &self,
        _key: &MeasurementKey,
        _repetition: u32,
        _outcome: &Result<f64, SampleError>,
    ) {
    }

    /// Called after the samples of a key have been averaged.
    fn on_key_complete(&self, _key: &MeasurementKey, _summary: &SampleSummary) {}

    /// Called once after the last key.
    fn on_finish(&self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl MeasureObserver for NoOpObserver {}
