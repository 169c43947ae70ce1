//! Results persistence, so charts can be redrawn without re-running.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sysinfo::{CpuRefreshKind, RefreshKind, System};

use crate::config::BenchConfig;
use crate::constants::RESULTS_VERSION;
use crate::error::SpeedupError;
use crate::measurement::{Averages, MeasurementKey};
use crate::stats::{SampleSummary, SkewPolicy};

/// Machine the measurements were taken on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostInfo {
    pub cpu_model: String,
    pub num_cores: usize,
}

impl HostInfo {
    /// Describe the current machine.
    #[must_use]
    pub fn current() -> Self {
        let refresh = RefreshKind::new().with_cpu(CpuRefreshKind::everything());
        let sys = System::new_with_specifics(refresh);
        let cpus = sys.cpus();
        Self {
            cpu_model: cpus
                .first()
                .map(|cpu| cpu.brand().trim().to_owned())
                .unwrap_or_default(),
            num_cores: cpus.len().max(1),
        }
    }
}

/// One averaged key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    #[serde(flatten)]
    pub key: MeasurementKey,
    #[serde(flatten)]
    pub summary: SampleSummary,
}

/// Saved measurement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsFile {
    /// Format version for compatibility checking.
    pub version: u32,
    pub host: HostInfo,
    /// Save time, `unix:<seconds>`.
    pub timestamp: String,
    pub program: String,
    pub program_args: Vec<String>,
    pub repetitions: u32,
    pub skew_policy: SkewPolicy,
    pub entries: Vec<ResultEntry>,
}

impl ResultsFile {
    /// Snapshot averages together with the configuration that produced them.
    #[must_use]
    pub fn new(averages: &Averages, config: &BenchConfig) -> Self {
        Self {
            version: RESULTS_VERSION,
            host: HostInfo::current(),
            timestamp: format!("unix:{}", unix_seconds()),
            program: config.program.clone(),
            program_args: config.program_args.clone(),
            repetitions: config.repetitions,
            skew_policy: config.skew_policy,
            entries: averages
                .iter()
                .map(|(key, summary)| ResultEntry {
                    key: *key,
                    summary: summary.clone(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.version == RESULTS_VERSION
    }

    /// Settings of the saved run that differ from `config`, one line each.
    #[must_use]
    pub fn differences(&self, config: &BenchConfig) -> Vec<String> {
        let mut diffs = Vec::new();
        if self.program != config.program || self.program_args != config.program_args {
            diffs.push(format!(
                "program was `{}`, now `{}`",
                command_line(&self.program, &self.program_args),
                command_line(&config.program, &config.program_args)
            ));
        }
        if self.repetitions != config.repetitions {
            diffs.push(format!(
                "repetitions was {}, now {}",
                self.repetitions, config.repetitions
            ));
        }
        if self.skew_policy != config.skew_policy {
            diffs.push(format!(
                "skew policy was {}, now {}",
                self.skew_policy, config.skew_policy
            ));
        }
        diffs
    }

    /// Rebuild the averages mapping.
    #[must_use]
    pub fn into_averages(self) -> Averages {
        self.entries
            .into_iter()
            .map(|e| (e.key, e.summary))
            .collect()
    }
}

/// Save averages to `path` as pretty-printed JSON.
pub fn save_results(
    path: &Path,
    averages: &Averages,
    config: &BenchConfig,
) -> Result<(), SpeedupError> {
    let file = ResultsFile::new(averages, config);
    let content = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, content).map_err(|e| SpeedupError::io(path, e))?;
    tracing::info!(path = %path.display(), entries = file.entries.len(), "saved results");
    Ok(())
}

/// Load a results file, rejecting incompatible versions.
pub fn load_results(path: &Path) -> Result<ResultsFile, SpeedupError> {
    let content = std::fs::read_to_string(path).map_err(|e| SpeedupError::io(path, e))?;
    let file: ResultsFile = serde_json::from_str(&content)?;
    if !file.is_compatible() {
        return Err(SpeedupError::IncompatibleResults {
            found: file.version,
            expected: RESULTS_VERSION,
        });
    }
    tracing::info!(
        path = %path.display(),
        entries = file.entries.len(),
        host = %file.host.cpu_model,
        "loaded results"
    );
    Ok(file)
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
