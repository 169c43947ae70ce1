//! Speedup ratios and chart planning.
//!
//! Every chart is fully derived from the averages before anything is drawn,
//! so a missing measurement or a zero mean fails the run without leaving a
//! partial chart on disk.

use std::path::{Path, PathBuf};

use crate::config::BenchConfig;
use crate::constants::{X_AXIS_LABEL, Y_AXIS_LABEL};
use crate::error::SpeedupError;
use crate::measurement::{Averages, MeasurementKey};
use crate::mode::ExecutionMode;

/// Speedup of a parallel run over the sequential baseline.
///
/// Both means must be finite and strictly positive.
pub fn compute_speedup(sequential: f64, parallel: f64) -> Result<f64, SpeedupError> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(sequential) || !usable(parallel) {
        return Err(SpeedupError::InvalidSpeedup {
            sequential,
            parallel,
        });
    }
    Ok(sequential / parallel)
}

/// One line of a chart: speedups of one workload size across thread counts.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedupSeries {
    pub size: u32,
    pub label: String,
    /// `(threads, speedup)` in thread-count order.
    pub points: Vec<(u32, f64)>,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub mode: ExecutionMode,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub thread_counts: Vec<u32>,
    pub series: Vec<SpeedupSeries>,
    pub output: PathBuf,
}

impl ChartPlan {
    /// Largest speedup over all series, 0.0 when there are none.
    #[must_use]
    pub fn max_speedup(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, y)| y))
            .fold(0.0, f64::max)
    }
}

/// Build the speedup series of one parallel mode, one per workload size.
pub fn speedup_series(
    averages: &Averages,
    mode: ExecutionMode,
    sizes: &[u32],
    thread_counts: &[u32],
    label: impl Fn(u32) -> String,
) -> Result<Vec<SpeedupSeries>, SpeedupError> {
    sizes
        .iter()
        .map(|&size| {
            let sequential = averages.mean(&MeasurementKey::sequential(size))?;
            let points = thread_counts
                .iter()
                .map(|&threads| {
                    let key = MeasurementKey::parallel(size, mode, threads);
                    let parallel = averages.mean(&key)?;
                    let speedup = compute_speedup(sequential, parallel)?;
                    Ok((threads, speedup))
                })
                .collect::<Result<Vec<_>, SpeedupError>>()?;
            Ok(SpeedupSeries {
                size,
                label: label(size),
                points,
            })
        })
        .collect()
}

/// Plan one chart per configured parallel mode.
///
/// Chart paths are resolved against `output_dir`. Fails on the first missing
/// or unusable measurement.
pub fn plan_charts(
    config: &BenchConfig,
    averages: &Averages,
    output_dir: &Path,
) -> Result<Vec<ChartPlan>, SpeedupError> {
    config.validate()?;
    config
        .parallel_modes
        .iter()
        .map(|&mode| {
            let output = config.chart_output(mode);
            let series = speedup_series(
                averages,
                mode,
                &config.workload_sizes,
                &config.thread_counts,
                |size| config.series_label(size),
            )?;
            Ok(ChartPlan {
                mode,
                title: output.title,
                x_label: X_AXIS_LABEL.to_string(),
                y_label: Y_AXIS_LABEL.to_string(),
                thread_counts: config.thread_counts.clone(),
                series,
                output: output_dir.join(output.path),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::plan_keys;
    use crate::stats::SampleSummary;

    fn full_averages(config: &BenchConfig) -> Averages {
        plan_keys(config)
            .into_iter()
            .map(|key| {
                let mean = match key.threads {
                    None => 12.0,
                    Some(t) => 12.0 / f64::from(t),
                };
                (key, SampleSummary::from_mean(mean))
            })
            .collect()
    }

    #[test]
    fn speedup_ratio() {
        assert_eq!(compute_speedup(10.0, 2.0).unwrap(), 5.0);
        assert_eq!(compute_speedup(3.0, 6.0).unwrap(), 0.5);
    }

    #[test]
    fn zero_parallel_mean_is_error() {
        match compute_speedup(10.0, 0.0) {
            Err(SpeedupError::InvalidSpeedup {
                sequential,
                parallel,
            }) => {
                assert_eq!(sequential, 10.0);
                assert_eq!(parallel, 0.0);
            }
            other => panic!("expected InvalidSpeedup, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_and_zero_sequential_are_errors() {
        assert!(compute_speedup(f64::NAN, 1.0).is_err());
        assert!(compute_speedup(1.0, f64::INFINITY).is_err());
        assert!(compute_speedup(0.0, 1.0).is_err());
        assert!(compute_speedup(1.0, -2.0).is_err());
    }

    #[test]
    fn plan_default_charts() {
        let config = BenchConfig::default();
        let averages = full_averages(&config);
        let plans = plan_charts(&config, &averages, Path::new("out")).unwrap();
        assert_eq!(plans.len(), 2);

        let ws = &plans[0];
        assert_eq!(ws.mode, ExecutionMode::WorkStealing);
        assert_eq!(ws.output, PathBuf::from("out").join("speedup-ws"));
        assert_eq!(ws.x_label, "# Threads");
        assert_eq!(ws.y_label, "Speedup");
        assert_eq!(ws.thread_counts, vec![2, 4, 6, 8, 12]);

        let labels: Vec<&str> = ws.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["10 epochs", "25 epochs", "50 epochs"]);
        for series in &ws.series {
            let ys: Vec<f64> = series.points.iter().map(|&(_, y)| y).collect();
            assert_eq!(ys, vec![2.0, 4.0, 6.0, 8.0, 12.0]);
        }
        assert_eq!(ws.max_speedup(), 12.0);
        assert_eq!(plans[1].output, PathBuf::from("out").join("speedup-wb"));
    }

    #[test]
    fn charted_sizes_follow_measured_sizes() {
        let config = BenchConfig {
            workload_sizes: vec![20, 30],
            ..BenchConfig::default()
        };
        let averages = full_averages(&config);
        let plans = plan_charts(&config, &averages, Path::new(".")).unwrap();
        let sizes: Vec<u32> = plans[0].series.iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![20, 30]);
    }

    #[test]
    fn missing_parallel_key_fails() {
        let config = BenchConfig::default();
        let mut averages = full_averages(&config);
        let gone = MeasurementKey::parallel(25, ExecutionMode::WorkBalancing, 8);
        averages.remove(&gone);
        match plan_charts(&config, &averages, Path::new(".")) {
            Err(SpeedupError::MissingKey(key)) => assert_eq!(key, gone),
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn missing_sequential_key_fails() {
        let config = BenchConfig::default();
        let mut averages = full_averages(&config);
        averages.remove(&MeasurementKey::sequential(50));
        assert!(matches!(
            plan_charts(&config, &averages, Path::new(".")),
            Err(SpeedupError::MissingKey(_))
        ));
    }

    #[test]
    fn zero_parallel_mean_fails_planning() {
        let config = BenchConfig::default();
        let mut averages = full_averages(&config);
        averages.insert(
            MeasurementKey::parallel(10, ExecutionMode::WorkStealing, 2),
            SampleSummary::from_mean(0.0),
        );
        assert!(matches!(
            plan_charts(&config, &averages, Path::new(".")),
            Err(SpeedupError::InvalidSpeedup { .. })
        ));
    }

    #[test]
    fn custom_chart_output() {
        let config = BenchConfig {
            parallel_modes: vec![ExecutionMode::WorkBalancing],
            charts: vec![crate::config::ChartOutput {
                mode: ExecutionMode::WorkBalancing,
                title: "Balancing".into(),
                path: PathBuf::from("wb.svg"),
            }],
            ..BenchConfig::default()
        };
        let averages = full_averages(&config);
        let plans = plan_charts(&config, &averages, Path::new("charts")).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].title, "Balancing");
        assert_eq!(plans[0].output, Path::new("charts").join("wb.svg"));
    }
}
