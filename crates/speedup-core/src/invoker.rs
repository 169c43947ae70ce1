//! Launching the program under test.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::SpeedupError;

/// Capability to run the program under test once and capture its stdout.
///
/// The runner only ever sees this trait, so tests substitute a closure
/// `Fn(&[String]) -> Result<Vec<u8>, SpeedupError>`.
pub trait ProcessInvoker {
    /// Run once with the given measurement arguments and return raw stdout.
    fn invoke(&self, args: &[String]) -> Result<Vec<u8>, SpeedupError>;

    /// Command line shown to the user for the given arguments.
    fn describe(&self, args: &[String]) -> String {
        args.join(" ")
    }
}

impl<F> ProcessInvoker for F
where
    F: Fn(&[String]) -> Result<Vec<u8>, SpeedupError>,
{
    fn invoke(&self, args: &[String]) -> Result<Vec<u8>, SpeedupError> {
        self(args)
    }
}

/// Invoker that spawns a real process and blocks until it exits.
///
/// Stdin is closed and stderr is passed through. The exit status is logged
/// but never turns a run into an error; only stdout is consumed.
#[derive(Debug, Clone)]
pub struct CommandInvoker {
    program: String,
    prefix_args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandInvoker {
    #[must_use]
    pub fn new(program: impl Into<String>, prefix_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args,
            working_dir: None,
        }
    }

    /// Run the program from a specific directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ProcessInvoker for CommandInvoker {
    fn invoke(&self, args: &[String]) -> Result<Vec<u8>, SpeedupError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| SpeedupError::Launch {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            debug!(
                status = %output.status,
                command = %self.describe(args),
                "program exited unsuccessfully; using its stdout anyway"
            );
        }
        Ok(output.stdout)
    }

    fn describe(&self, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.prefix_args.iter().map(String::as_str))
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
