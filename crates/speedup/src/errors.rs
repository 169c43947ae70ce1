//! Error handling and exit codes.

use speedup_core::constants::exit_codes;
use speedup_core::SpeedupError;

/// Exit code for an application error.
///
/// Benchmark errors anywhere in the context chain map to their own code;
/// everything else is a generic failure.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|e| e.downcast_ref::<SpeedupError>())
        .map_or(exit_codes::ERROR_GENERIC, SpeedupError::exit_code)
}
