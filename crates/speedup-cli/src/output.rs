//! Text formatting for measurements and speedup tables.

use std::fmt::Write;

use speedup_core::{Averages, ChartPlan, SampleSummary};

/// Format a duration given in seconds.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_seconds(secs: f64) -> String {
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a speedup ratio, e.g. `3.42x`.
#[must_use]
pub fn format_speedup(ratio: f64) -> String {
    format!("{ratio:.2}x")
}

/// Format sample counts, e.g. `5/5` or `4/5 (1 failed)`.
#[must_use]
pub fn format_samples(summary: &SampleSummary) -> String {
    if summary.failed == 0 {
        format!("{}/{}", summary.valid, summary.attempts())
    } else {
        format!(
            "{}/{} ({} failed)",
            summary.valid,
            summary.attempts(),
            summary.failed
        )
    }
}

/// One row per key: key, mean, min, max, samples.
#[must_use]
pub fn averages_table(averages: &Averages) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<14} {:>10} {:>10} {:>10}  {}",
        "key", "mean", "min", "max", "samples"
    );
    let _ = writeln!(out, "  {:-<60}", "");
    for (key, summary) in averages.iter() {
        let _ = writeln!(
            out,
            "  {:<14} {:>10} {:>10} {:>10}  {}",
            key.to_string(),
            format_seconds(summary.mean),
            summary.min.map_or_else(|| "-".to_string(), format_seconds),
            summary.max.map_or_else(|| "-".to_string(), format_seconds),
            format_samples(summary),
        );
    }
    out
}

/// Speedup grid of one chart: a column per thread count, a row per series.
#[must_use]
pub fn speedup_table(plan: &ChartPlan) -> String {
    let mut out = String::new();
    let _ = write!(out, "  {:<14}", "threads");
    for threads in &plan.thread_counts {
        let _ = write!(out, " {threads:>8}");
    }
    let _ = writeln!(out);
    for series in &plan.series {
        let _ = write!(out, "  {:<14}", series.label);
        for &(_, speedup) in &series.points {
            let _ = write!(out, " {:>8}", format_speedup(speedup));
        }
        let _ = writeln!(out);
    }
    out
}
