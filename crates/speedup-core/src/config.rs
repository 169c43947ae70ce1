//! Benchmark configuration: what to run, how often, and where charts go.

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHART_PREFIX, DEFAULT_CHART_TITLE, DEFAULT_PROGRAM, DEFAULT_PROGRAM_ARGS,
    DEFAULT_REPETITIONS, DEFAULT_SERIES_LABEL, DEFAULT_THREAD_COUNTS, DEFAULT_WORKLOAD_SIZES,
    SIZE_PLACEHOLDER,
};
use crate::error::SpeedupError;
use crate::mode::ExecutionMode;
use crate::stats::SkewPolicy;

/// Where and how the chart for one parallel mode is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOutput {
    /// Parallel mode charted.
    pub mode: ExecutionMode,
    /// Chart caption.
    pub title: String,
    /// Output file, relative to the output directory unless absolute.
    pub path: PathBuf,
}

impl ChartOutput {
    /// Default output for a mode: `speedup-<token>`.
    #[must_use]
    pub fn default_for(mode: ExecutionMode) -> Self {
        Self {
            mode,
            title: format!("{DEFAULT_CHART_TITLE} ({})", mode.display_name()),
            path: PathBuf::from(format!("{DEFAULT_CHART_PREFIX}-{}", mode.token())),
        }
    }
}

/// Full description of a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Program launched for every sample.
    pub program: String,
    /// Arguments inserted before the measurement arguments.
    pub program_args: Vec<String>,
    /// Workload sizes, measured and charted in this order.
    pub workload_sizes: Vec<u32>,
    /// Thread counts (x axis), in this order.
    pub thread_counts: Vec<u32>,
    /// Parallel strategies to measure; one chart each.
    pub parallel_modes: Vec<ExecutionMode>,
    /// Invocations averaged per key.
    pub repetitions: u32,
    /// Treatment of unparseable samples.
    pub skew_policy: SkewPolicy,
    /// Legend label template, `{size}` is substituted.
    pub series_label: String,
    /// Per-mode chart overrides. Modes without an entry use [`ChartOutput::default_for`].
    pub charts: Vec<ChartOutput>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            program_args: DEFAULT_PROGRAM_ARGS
                .iter()
                .map(ToString::to_string)
                .collect(),
            workload_sizes: DEFAULT_WORKLOAD_SIZES.to_vec(),
            thread_counts: DEFAULT_THREAD_COUNTS.to_vec(),
            parallel_modes: ExecutionMode::PARALLEL.to_vec(),
            repetitions: DEFAULT_REPETITIONS,
            skew_policy: SkewPolicy::default(),
            series_label: DEFAULT_SERIES_LABEL.to_string(),
            charts: ExecutionMode::PARALLEL
                .iter()
                .map(|&m| ChartOutput::default_for(m))
                .collect(),
        }
    }
}

impl BenchConfig {
    /// Check that the configuration describes a runnable benchmark.
    pub fn validate(&self) -> Result<(), SpeedupError> {
        if self.program.trim().is_empty() {
            return Err(config_err("program must not be empty"));
        }
        if self.repetitions == 0 {
            return Err(config_err("repetitions must be at least 1"));
        }
        if self.workload_sizes.is_empty() {
            return Err(config_err("at least one workload size is required"));
        }
        check_unique("workload size", &self.workload_sizes)?;
        if self.thread_counts.is_empty() {
            return Err(config_err("at least one thread count is required"));
        }
        if self.thread_counts.contains(&0) {
            return Err(config_err("thread counts must be positive"));
        }
        check_unique("thread count", &self.thread_counts)?;
        if self.parallel_modes.is_empty() {
            return Err(config_err("at least one parallel mode is required"));
        }
        if self.parallel_modes.contains(&ExecutionMode::Sequential) {
            return Err(config_err(
                "sequential mode is the baseline and cannot be a parallel mode",
            ));
        }
        check_unique("parallel mode", &self.parallel_modes)?;
        if self.series_label.trim().is_empty() {
            return Err(config_err("series label must not be empty"));
        }

        let chart_modes: Vec<ExecutionMode> = self.charts.iter().map(|c| c.mode).collect();
        check_unique("chart mode", &chart_modes)?;
        for chart in &self.charts {
            if !chart.mode.is_parallel() {
                return Err(config_err("charts can only be drawn for parallel modes"));
            }
            if chart.path.as_os_str().is_empty() {
                return Err(config_err(&format!(
                    "chart for mode '{}' has an empty path",
                    chart.mode
                )));
            }
        }
        let chart_paths: Vec<PathBuf> = self
            .parallel_modes
            .iter()
            .map(|&m| self.chart_output(m).path)
            .collect();
        check_unique("chart path", &chart_paths)?;
        Ok(())
    }

    /// Chart output for a parallel mode, falling back to the default.
    #[must_use]
    pub fn chart_output(&self, mode: ExecutionMode) -> ChartOutput {
        self.charts
            .iter()
            .find(|c| c.mode == mode)
            .cloned()
            .unwrap_or_else(|| ChartOutput::default_for(mode))
    }

    /// Legend label for a workload size.
    #[must_use]
    pub fn series_label(&self, size: u32) -> String {
        self.series_label
            .replace(SIZE_PLACEHOLDER, &size.to_string())
    }

    /// Number of external invocations a full run performs.
    #[must_use]
    pub fn total_invocations(&self) -> u64 {
        let sizes = self.workload_sizes.len() as u64;
        let parallel_cells =
            sizes * self.thread_counts.len() as u64 * self.parallel_modes.len() as u64;
        (sizes + parallel_cells) * u64::from(self.repetitions)
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, SpeedupError> {
        let content = std::fs::read_to_string(path).map_err(|e| SpeedupError::io(path, e))?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded benchmark configuration");
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), SpeedupError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| SpeedupError::io(path, e))
    }
}

fn config_err(msg: &str) -> SpeedupError {
    SpeedupError::Config(msg.to_string())
}

fn check_unique<T: Ord + Debug>(what: &str, values: &[T]) -> Result<(), SpeedupError> {
    let mut seen = BTreeSet::new();
    for v in values {
        if !seen.insert(v) {
            return Err(SpeedupError::Config(format!("duplicate {what} {v:?}")));
        }
    }
    Ok(())
}
