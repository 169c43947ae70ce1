//! Error type shared by the measurement and charting pipeline.

use std::path::PathBuf;

use crate::constants::exit_codes;
use crate::measurement::MeasurementKey;

/// Error type for benchmark runs.
#[derive(Debug, thiserror::Error)]
pub enum SpeedupError {
    /// The external program could not be started.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Every sample for a key failed to parse (or none was taken).
    #[error("no valid samples for `{key}` ({failed} of {attempts} unparseable)")]
    NoValidSamples {
        key: MeasurementKey,
        failed: u32,
        attempts: u32,
    },

    /// A measurement required for a chart is absent from the averages.
    #[error("missing measurement `{0}`")]
    MissingKey(MeasurementKey),

    /// A speedup ratio was requested for a zero, negative or non-finite mean.
    #[error("cannot compute speedup: sequential mean {sequential}, parallel mean {parallel}")]
    InvalidSpeedup { sequential: f64, parallel: f64 },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A results file was written by an incompatible version.
    #[error("results file version {found} is not supported (expected {expected})")]
    IncompatibleResults { found: u32, expected: u32 },

    /// File system error.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpeedupError {
    /// Exit code reported by the binary for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::IncompatibleResults { .. } => exit_codes::ERROR_CONFIG,
            Self::MissingKey(_) | Self::NoValidSamples { .. } => {
                exit_codes::ERROR_MISSING_MEASUREMENT
            }
            Self::InvalidSpeedup { .. } => exit_codes::ERROR_INVALID_SPEEDUP,
            Self::Launch { .. } | Self::Io { .. } | Self::Json(_) => exit_codes::ERROR_GENERIC,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
