//! Aggregation of repeated samples into a mean duration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpeedupError;
use crate::sample::SampleError;

/// How unparseable samples contribute to a mean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkewPolicy {
    /// Failed samples are left out of both the sum and the divisor.
    #[default]
    Exclude,
    /// Failed samples add nothing to the sum but still count in the divisor,
    /// which skews the mean towards zero. Kept for comparison with old runs.
    Legacy,
}

impl fmt::Display for SkewPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exclude => "exclude",
            Self::Legacy => "legacy",
        })
    }
}

impl FromStr for SkewPolicy {
    type Err = SpeedupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclude" => Ok(Self::Exclude),
            "legacy" => Ok(Self::Legacy),
            other => Err(SpeedupError::Config(format!(
                "unknown skew policy '{other}' (expected exclude or legacy)"
            ))),
        }
    }
}

/// Mean and bookkeeping for one measurement key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Mean duration in seconds.
    pub mean: f64,
    /// Samples that parsed.
    pub valid: u32,
    /// Samples that did not parse.
    pub failed: u32,
    /// Fastest valid sample.
    pub min: Option<f64>,
    /// Slowest valid sample.
    pub max: Option<f64>,
}

impl SampleSummary {
    /// Summary of a single known mean, with no sample detail.
    #[must_use]
    pub fn from_mean(mean: f64) -> Self {
        Self {
            mean,
            valid: 1,
            failed: 0,
            min: Some(mean),
            max: Some(mean),
        }
    }

    /// Total samples taken.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.valid + self.failed
    }
}

/// Arithmetic mean of a slice, `None` when empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Aggregate per-sample outcomes under a skew policy.
///
/// Returns `None` when there is nothing to average: no samples at all, or,
/// under [`SkewPolicy::Exclude`], no sample that parsed.
#[must_use]
pub fn aggregate(
    samples: &[Result<f64, SampleError>],
    policy: SkewPolicy,
) -> Option<SampleSummary> {
    if samples.is_empty() {
        return None;
    }

    let valid: Vec<f64> = samples
        .iter()
        .filter_map(|s| s.as_ref().ok().copied())
        .collect();
    let valid_count = count(valid.len());
    let failed = count(samples.len()) - valid_count;

    let avg = match policy {
        SkewPolicy::Exclude => mean(&valid)?,
        SkewPolicy::Legacy => valid.iter().sum::<f64>() / f64::from(count(samples.len())),
    };

    Some(SampleSummary {
        mean: avg,
        valid: valid_count,
        failed,
        min: valid.iter().copied().reduce(f64::min),
        max: valid.iter().copied().reduce(f64::max),
    })
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
