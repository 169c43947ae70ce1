//! Default benchmark parameters and exit codes.

/// Program launched for every sample.
pub const DEFAULT_PROGRAM: &str = "go";

/// Arguments placed between the program and the measurement arguments.
pub const DEFAULT_PROGRAM_ARGS: [&str; 2] = ["run", "proj3/editor"];

/// Workload sizes (epochs) measured by default.
pub const DEFAULT_WORKLOAD_SIZES: [u32; 3] = [10, 25, 50];

/// Thread counts measured for every parallel mode.
pub const DEFAULT_THREAD_COUNTS: [u32; 5] = [2, 4, 6, 8, 12];

/// Number of invocations averaged per measurement key.
pub const DEFAULT_REPETITIONS: u32 = 5;

/// Legend label template; `{size}` is replaced by the workload size.
pub const DEFAULT_SERIES_LABEL: &str = "{size} epochs";

/// Placeholder substituted in the series label template.
pub const SIZE_PLACEHOLDER: &str = "{size}";

/// Prefix of the default chart file names (`speedup-ws`, `speedup-wb`).
pub const DEFAULT_CHART_PREFIX: &str = "speedup";

/// Prefix of the default chart titles.
pub const DEFAULT_CHART_TITLE: &str = "Editor Speedup Graph";

/// Horizontal axis label.
pub const X_AXIS_LABEL: &str = "# Threads";

/// Vertical axis label.
pub const Y_AXIS_LABEL: &str = "Speedup";

/// Current results file format version.
pub const RESULTS_VERSION: u32 = 1;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error (launch failure, I/O, rendering).
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// A measurement needed for a chart is missing or has no valid samples.
    pub const ERROR_MISSING_MEASUREMENT: i32 = 5;
    /// A speedup ratio could not be computed (zero or non-finite mean).
    pub const ERROR_INVALID_SPEEDUP: i32 = 6;
}
