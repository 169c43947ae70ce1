//! Application entry point and dispatch.

use anyhow::{Context, Result};

use speedup_cli::completion::generate_completion;
use speedup_cli::presenter::{CLIReportPresenter, ReportPresenter};
use speedup_cli::progress::ProgressBarObserver;
use speedup_cli::ui::print_success;
use speedup_core::results::{load_results, save_results};
use speedup_core::runner::plan_keys;
use speedup_core::{measure, plan_charts, Averages, BenchConfig, CommandInvoker, ProcessInvoker};
use speedup_plot::render_charts;

use crate::config::AppConfig;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let bench = config.bench_config()?;

    if let Some(path) = &config.write_config {
        bench.save(path)?;
        if !config.quiet {
            print_success(&format!("wrote configuration to {}", path.display()));
        }
        return Ok(());
    }

    let presenter = CLIReportPresenter::new(config.verbose, config.quiet);
    let invoker = build_invoker(config, &bench);

    if config.dry_run {
        let commands: Vec<String> = plan_keys(&bench)
            .iter()
            .map(|key| invoker.describe(&key.args()))
            .collect();
        presenter.present_plan(&commands);
        return Ok(());
    }

    let averages = obtain_averages(config, &bench, &invoker, &presenter)?;

    // Persist before charting so a charting failure does not lose the run
    if let Some(path) = &config.save_averages {
        save_results(path, &averages, &bench)?;
    }

    presenter.present_averages(&averages);
    run_charts(config, &bench, &averages, &presenter)
}

fn build_invoker(config: &AppConfig, bench: &BenchConfig) -> CommandInvoker {
    let invoker = CommandInvoker::new(bench.program.clone(), bench.program_args.clone());
    match &config.workdir {
        Some(dir) => invoker.with_working_dir(dir),
        None => invoker,
    }
}

fn obtain_averages(
    config: &AppConfig,
    bench: &BenchConfig,
    invoker: &dyn ProcessInvoker,
    presenter: &dyn ReportPresenter,
) -> Result<Averages> {
    if let Some(path) = &config.load_averages {
        let file = load_results(path)?;
        tracing::debug!(
            cores = file.host.num_cores,
            timestamp = %file.timestamp,
            "charting saved results"
        );
        for diff in file.differences(bench) {
            presenter.present_warning(&format!("saved results differ: {diff}"));
        }
        return Ok(file.into_averages());
    }

    let observer = ProgressBarObserver::new(config.quiet);
    let averages = measure(bench, invoker, &observer)?;

    let failed = observer.failed_samples();
    if failed > 0 {
        presenter.present_warning(&format!(
            "{failed} sample(s) produced unparseable output ({} policy)",
            bench.skew_policy
        ));
    }
    Ok(averages)
}

fn run_charts(
    config: &AppConfig,
    bench: &BenchConfig,
    averages: &Averages,
    presenter: &dyn ReportPresenter,
) -> Result<()> {
    // Every series is derived (and every key checked) before any file is touched
    let plans = plan_charts(bench, averages, &config.output_dir)?;
    presenter.present_speedups(&plans);

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    let written = render_charts(&plans)?;
    presenter.present_written(&written);
    Ok(())
}
