//! Speedup line charts.

use std::fmt;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use speedup_core::speedup::ChartPlan;

/// Chart size in pixels.
pub const CHART_SIZE: (u32, u32) = (800, 600);

/// Series colors, assigned by series index.
const PALETTE: [RGBColor; 6] = [BLUE, GREEN, RED, CYAN, MAGENTA, BLACK];

/// Error type for chart rendering.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// The plan has nothing to draw.
    #[error("chart '{title}' has no data to plot")]
    Empty { title: String },

    /// The drawing backend failed.
    #[error("failed to draw {}: {message}", path.display())]
    Draw { path: PathBuf, message: String },
}

fn draw_err<E: fmt::Display>(path: &Path) -> impl FnOnce(E) -> PlotError + '_ {
    move |e| PlotError::Draw {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn check_plan(plan: &ChartPlan) -> Result<(), PlotError> {
    if plan.series.is_empty() || plan.thread_counts.is_empty() {
        return Err(PlotError::Empty {
            title: plan.title.clone(),
        });
    }
    Ok(())
}

/// Horizontal range covering all thread counts.
fn x_range(thread_counts: &[u32]) -> (f64, f64) {
    let min = thread_counts.iter().copied().min().map_or(0.0, f64::from);
    let max = thread_counts.iter().copied().max().map_or(1.0, f64::from);
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

/// Render one chart as SVG to `plan.output`.
pub fn render_chart(plan: &ChartPlan) -> Result<(), PlotError> {
    check_plan(plan)?;
    let path = plan.output.as_path();

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err(path))?;

    let (x_min, x_max) = x_range(&plan.thread_counts);
    let y_max = (plan.max_speedup() * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(&plan.title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(56)
        .build_cartesian_2d(x_min..x_max, 0.0f64..y_max)
        .map_err(draw_err(path))?;

    chart
        .configure_mesh()
        .x_desc(plan.x_label.as_str())
        .y_desc(plan.y_label.as_str())
        .draw()
        .map_err(draw_err(path))?;

    for (i, series) in plan.series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let points = series
            .points
            .iter()
            .map(|&(threads, speedup)| (f64::from(threads), speedup));
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(draw_err(path))?
            .label(series.label.as_str())
            .legend(move |(x, y)| legend_mark(x, y, color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err(path))?;

    root.present().map_err(draw_err(path))?;
    info!(path = %path.display(), series = plan.series.len(), "chart written");
    Ok(())
}

fn legend_mark(x: i32, y: i32, color: RGBColor) -> PathElement<(i32, i32)> {
    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
}

/// Render every plan, in order. All plans are checked before the first file
/// is written.
pub fn render_charts(plans: &[ChartPlan]) -> Result<Vec<PathBuf>, PlotError> {
    for plan in plans {
        check_plan(plan)?;
    }
    plans
        .iter()
        .map(|plan| render_chart(plan).map(|()| plan.output.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use speedup_core::runner::plan_keys;
    use speedup_core::{plan_charts, Averages, BenchConfig, ExecutionMode, SampleSummary};
    use tempfile::TempDir;

    fn averages_for(config: &BenchConfig) -> Averages {
        plan_keys(config)
            .into_iter()
            .map(|key| {
                let mean = match (key.mode, key.threads) {
                    (_, None) => 10.0,
                    (ExecutionMode::WorkStealing, Some(t)) => 10.0 / f64::from(t) + 0.5,
                    (_, Some(t)) => 10.0 / f64::from(t) + 1.0,
                };
                (key, SampleSummary::from_mean(mean))
            })
            .collect()
    }

    #[test]
    fn renders_both_default_charts() {
        let dir = TempDir::new().unwrap();
        let config = BenchConfig::default();
        let plans = plan_charts(&config, &averages_for(&config), dir.path()).unwrap();
        let written = render_charts(&plans).unwrap();

        assert_eq!(
            written,
            vec![dir.path().join("speedup-ws"), dir.path().join("speedup-wb")]
        );
        for path in &written {
            let content = std::fs::read_to_string(path).unwrap();
            assert!(!content.is_empty());
            assert!(content.contains("<svg"));
        }
    }

    #[test]
    fn chart_contains_labels() {
        let dir = TempDir::new().unwrap();
        let config = BenchConfig::default();
        let plans = plan_charts(&config, &averages_for(&config), dir.path()).unwrap();
        render_chart(&plans[0]).unwrap();

        let content = std::fs::read_to_string(&plans[0].output).unwrap();
        assert!(content.contains("Editor Speedup Graph (Work Stealing)"));
        assert!(content.contains("Speedup"));
        assert!(content.contains("# Threads"));
        assert!(content.contains("25 epochs"));
    }

    #[test]
    fn single_thread_count() {
        let dir = TempDir::new().unwrap();
        let config = BenchConfig {
            thread_counts: vec![4],
            parallel_modes: vec![ExecutionMode::WorkBalancing],
            ..BenchConfig::default()
        };
        let plans = plan_charts(&config, &averages_for(&config), dir.path()).unwrap();
        render_charts(&plans).unwrap();
        assert!(std::fs::metadata(&plans[0].output).unwrap().len() > 0);
    }

    #[test]
    fn empty_plan_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = BenchConfig::default();
        let mut plans = plan_charts(&config, &averages_for(&config), dir.path()).unwrap();
        plans[1].series.clear();

        let err = render_charts(&plans).unwrap_err();
        assert!(matches!(err, PlotError::Empty { .. }));
        assert!(!plans[0].output.exists());
    }

    #[test]
    fn missing_directory_is_draw_error() {
        let dir = TempDir::new().unwrap();
        let config = BenchConfig::default();
        let plans = plan_charts(
            &config,
            &averages_for(&config),
            &dir.path().join("does").join("not").join("exist"),
        )
        .unwrap();
        let err = render_chart(&plans[0]).unwrap_err();
        assert!(matches!(err, PlotError::Draw { .. }));
    }

    #[test]
    fn x_range_pads_single_value() {
        assert_eq!(x_range(&[4]), (3.0, 5.0));
        assert_eq!(x_range(&[2, 4, 12]), (2.0, 12.0));
    }
}
