//! # speedup-plot
//!
//! SVG rendering of speedup-vs-threads line charts.

pub mod chart;

pub use chart::{render_chart, render_charts, PlotError};
