//! Execution modes understood by the program under test.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpeedupError;

/// How the program under test executes a workload.
///
/// The serialized form is the command-line token passed to the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Single-threaded baseline.
    #[serde(rename = "s", alias = "sequential")]
    Sequential,
    /// Work-stealing scheduler.
    #[serde(rename = "ws", alias = "work-stealing")]
    WorkStealing,
    /// Work-balancing scheduler.
    #[serde(rename = "wb", alias = "work-balancing")]
    WorkBalancing,
}

impl ExecutionMode {
    /// All parallel strategies, in charting order.
    pub const PARALLEL: [Self; 2] = [Self::WorkStealing, Self::WorkBalancing];

    /// Token passed to the program as the mode argument.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Sequential => "s",
            Self::WorkStealing => "ws",
            Self::WorkBalancing => "wb",
        }
    }

    /// Human-readable name used in chart titles.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::WorkStealing => "Work Stealing",
            Self::WorkBalancing => "Work Balancing",
        }
    }

    /// Whether this mode takes a thread count.
    #[must_use]
    pub fn is_parallel(self) -> bool {
        !matches!(self, Self::Sequential)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ExecutionMode {
    type Err = SpeedupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "seq" | "sequential" => Ok(Self::Sequential),
            "ws" | "work-stealing" | "stealing" => Ok(Self::WorkStealing),
            "wb" | "work-balancing" | "balancing" => Ok(Self::WorkBalancing),
            other => Err(SpeedupError::Config(format!(
                "unknown execution mode '{other}' (expected s, ws or wb)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        assert_eq!(ExecutionMode::Sequential.token(), "s");
        assert_eq!(ExecutionMode::WorkStealing.token(), "ws");
        assert_eq!(ExecutionMode::WorkBalancing.token(), "wb");
    }

    #[test]
    fn parse_tokens_and_names() {
        assert_eq!(
            "ws".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::WorkStealing
        );
        assert_eq!(
            "Work-Balancing".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::WorkBalancing
        );
        assert_eq!(
            " s ".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::Sequential
        );
    }

    #[test]
    fn parse_unknown() {
        assert!(matches!(
            "pipeline".parse::<ExecutionMode>(),
            Err(SpeedupError::Config(_))
        ));
    }

    #[test]
    fn parallel_flag() {
        assert!(!ExecutionMode::Sequential.is_parallel());
        assert!(ExecutionMode::PARALLEL.iter().all(|m| m.is_parallel()));
    }

    #[test]
    fn serde_uses_tokens() {
        let json = serde_json::to_string(&ExecutionMode::WorkBalancing).unwrap();
        assert_eq!(json, "\"wb\"");
        let mode: ExecutionMode = serde_json::from_str("\"work-stealing\"").unwrap();
        assert_eq!(mode, ExecutionMode::WorkStealing);
    }
}
