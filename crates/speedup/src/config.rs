//! Application configuration from CLI flags, environment and config file.

use std::path::PathBuf;

use clap::Parser;

use speedup_core::{BenchConfig, ExecutionMode, SkewPolicy, SpeedupError};

/// speedup — run a program across thread counts and plot its parallel speedup.
///
/// The program is invoked as `<program> [args...] <size> s` for the
/// sequential baseline and `<program> [args...] <size> <mode> <threads>` for
/// parallel runs, and must print its elapsed time in seconds.
#[derive(Parser, Debug)]
#[command(name = "speedup", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Program under test (default: go).
    #[arg(long, env = "SPEEDUP_PROGRAM")]
    pub program: Option<String>,

    /// Argument placed before the measurement arguments; repeatable
    /// (default with the default program: run proj3/editor).
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub program_args: Vec<String>,

    /// Workload size to measure; repeatable (default: 10 25 50).
    #[arg(long = "size", value_name = "N")]
    pub sizes: Vec<u32>,

    /// Thread count to measure; repeatable (default: 2 4 6 8 12).
    #[arg(long = "threads", value_name = "N")]
    pub threads: Vec<u32>,

    /// Parallel mode to measure and chart, ws or wb; repeatable (default: both).
    #[arg(long = "mode", value_name = "MODE", value_parser = parse_mode)]
    pub modes: Vec<ExecutionMode>,

    /// Invocations averaged per measurement (default: 5).
    #[arg(short = 'n', long)]
    pub repetitions: Option<u32>,

    /// Treatment of unparseable output: exclude or legacy (default: exclude).
    #[arg(long, value_name = "POLICY", value_parser = parse_skew_policy)]
    pub skew_policy: Option<SkewPolicy>,

    /// Directory charts are written to.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Directory the program under test is run from.
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    /// JSON benchmark configuration; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective configuration as JSON and exit.
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,

    /// Save measured averages to a JSON results file.
    #[arg(long, value_name = "PATH")]
    pub save_averages: Option<PathBuf>,

    /// Chart from a saved results file instead of measuring.
    #[arg(long, value_name = "PATH")]
    pub load_averages: Option<PathBuf>,

    /// Print the planned invocations without running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output (per-key averages, info logging).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Resolve the benchmark configuration: defaults, then the config file,
    /// then command-line flags.
    pub fn bench_config(&self) -> Result<BenchConfig, SpeedupError> {
        let mut bench = match &self.config {
            Some(path) => BenchConfig::load(path)?,
            None => BenchConfig::default(),
        };

        if let Some(program) = &self.program {
            bench.program.clone_from(program);
            bench.program_args.clone_from(&self.program_args);
        } else if !self.program_args.is_empty() {
            bench.program_args.clone_from(&self.program_args);
        }
        if !self.sizes.is_empty() {
            bench.workload_sizes.clone_from(&self.sizes);
        }
        if !self.threads.is_empty() {
            bench.thread_counts.clone_from(&self.threads);
        }
        if !self.modes.is_empty() {
            bench.parallel_modes.clone_from(&self.modes);
        }
        if let Some(repetitions) = self.repetitions {
            bench.repetitions = repetitions;
        }
        if let Some(policy) = self.skew_policy {
            bench.skew_policy = policy;
        }

        bench.validate()?;
        Ok(bench)
    }
}

fn parse_mode(s: &str) -> Result<ExecutionMode, String> {
    s.parse().map_err(|e: SpeedupError| e.to_string())
}

fn parse_skew_policy(s: &str) -> Result<SkewPolicy, String> {
    s.parse().map_err(|e: SpeedupError| e.to_string())
}
