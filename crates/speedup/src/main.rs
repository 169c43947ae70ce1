//! speedup — measure a program across thread counts and plot its speedup.

use std::process::ExitCode;

use speedup_cli::{CLIReportPresenter, ReportPresenter};
use speedup_lib::{app, config, errors};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = config::AppConfig::parse();

    // Logs go to stderr so stdout stays usable for --dry-run output
    let level = if config.quiet {
        tracing::Level::ERROR
    } else if config.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let presenter = CLIReportPresenter::new(config.verbose, config.quiet);
            presenter.present_error(&format!("{err:#}"));
            ExitCode::from(u8::try_from(errors::exit_code(&err)).unwrap_or(1))
        }
    }
}
