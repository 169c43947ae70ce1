//! CLI report presenter.

use std::path::PathBuf;

use speedup_core::{Averages, ChartPlan};

use crate::output::{averages_table, speedup_table};
use crate::ui::{print_error, print_header, print_success, print_warning};

/// Trait for presenting a benchmark run to the user.
pub trait ReportPresenter {
    /// Show the command lines a run would execute.
    fn present_plan(&self, commands: &[String]);

    /// Show the averaged measurements.
    fn present_averages(&self, averages: &Averages);

    /// Show the speedup grid of every chart.
    fn present_speedups(&self, plans: &[ChartPlan]);

    /// Report written chart files.
    fn present_written(&self, paths: &[PathBuf]);

    /// Report a non-fatal problem.
    fn present_warning(&self, warning: &str);

    /// Report a fatal error.
    fn present_error(&self, error: &str);
}

/// Presenter writing to the terminal.
pub struct CLIReportPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIReportPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl ReportPresenter for CLIReportPresenter {
    fn present_plan(&self, commands: &[String]) {
        if !self.quiet {
            print_header(&format!("Planned invocations ({})", commands.len()));
        }
        for command in commands {
            println!("{command}");
        }
    }

    fn present_averages(&self, averages: &Averages) {
        if self.quiet || !self.verbose {
            return;
        }
        print_header("Averages");
        print!("{}", averages_table(averages));
    }

    fn present_speedups(&self, plans: &[ChartPlan]) {
        if self.quiet {
            return;
        }
        for plan in plans {
            print_header(&plan.title);
            print!("{}", speedup_table(plan));
        }
    }

    fn present_written(&self, paths: &[PathBuf]) {
        if self.quiet {
            return;
        }
        for path in paths {
            print_success(&format!("wrote {}", path.display()));
        }
    }

    fn present_warning(&self, warning: &str) {
        if !self.quiet {
            print_warning(warning);
        }
    }

    fn present_error(&self, error: &str) {
        print_error(error);
    }
}
