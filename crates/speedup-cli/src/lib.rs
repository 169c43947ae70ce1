//! # speedup-cli
//!
//! Terminal tables, progress display, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod progress;
pub mod ui;

pub use presenter::{CLIReportPresenter, ReportPresenter};
pub use progress::ProgressBarObserver;
