//! # speedup-core
//!
//! Measurement grid, sample aggregation, speedup derivation, and results
//! persistence for the speedup benchmark runner.

pub mod config;
pub mod constants;
pub mod error;
pub mod invoker;
pub mod measurement;
pub mod mode;
pub mod observer;
pub mod results;
pub mod runner;
pub mod sample;
pub mod speedup;
pub mod stats;

pub use config::{BenchConfig, ChartOutput};
pub use error::SpeedupError;
pub use invoker::{CommandInvoker, ProcessInvoker};
pub use measurement::{Averages, MeasurementKey};
pub use mode::ExecutionMode;
pub use runner::measure;
pub use speedup::{compute_speedup, plan_charts, ChartPlan, SpeedupSeries};
pub use stats::{SampleSummary, SkewPolicy};
