//! Measurement keys and the averages mapping.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SpeedupError;
use crate::mode::ExecutionMode;
use crate::stats::SampleSummary;

/// Identifies one cell of the measurement grid.
///
/// Sequential keys carry no thread count; parallel keys always do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeasurementKey {
    /// Workload size passed to the program.
    pub size: u32,
    /// Execution mode passed to the program.
    pub mode: ExecutionMode,
    /// Thread count, present for parallel modes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
}

impl MeasurementKey {
    /// Key for the sequential baseline of a workload size.
    #[must_use]
    pub fn sequential(size: u32) -> Self {
        Self {
            size,
            mode: ExecutionMode::Sequential,
            threads: None,
        }
    }

    /// Key for a parallel run.
    #[must_use]
    pub fn parallel(size: u32, mode: ExecutionMode, threads: u32) -> Self {
        Self {
            size,
            mode,
            threads: Some(threads),
        }
    }

    /// Positional arguments for the program: `[size, mode]` or `[size, mode, threads]`.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.size.to_string(), self.mode.token().to_string()];
        if let Some(threads) = self.threads {
            args.push(threads.to_string());
        }
        args
    }
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.threads {
            Some(threads) => write!(f, "{} {} {}", self.size, threads, self.mode),
            None => write!(f, "{} {}", self.size, self.mode),
        }
    }
}

/// Mean durations keyed by measurement, with per-key sample statistics.
///
/// Built once by the runner (or loaded from a results file) and read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Averages {
    entries: BTreeMap<MeasurementKey, SampleSummary>,
}

impl Averages {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the summary for a key, replacing any previous one.
    pub fn insert(&mut self, key: MeasurementKey, summary: SampleSummary) {
        self.entries.insert(key, summary);
    }

    /// Remove a key, returning its summary.
    pub fn remove(&mut self, key: &MeasurementKey) -> Option<SampleSummary> {
        self.entries.remove(key)
    }

    /// Mean duration in seconds for a key.
    pub fn mean(&self, key: &MeasurementKey) -> Result<f64, SpeedupError> {
        self.entries
            .get(key)
            .map(|s| s.mean)
            .ok_or(SpeedupError::MissingKey(*key))
    }

    /// Full summary for a key.
    #[must_use]
    pub fn summary(&self, key: &MeasurementKey) -> Option<&SampleSummary> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &MeasurementKey) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&MeasurementKey, &SampleSummary)> {
        self.entries.iter()
    }
}

impl FromIterator<(MeasurementKey, SampleSummary)> for Averages {
    fn from_iter<I: IntoIterator<Item = (MeasurementKey, SampleSummary)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
