//! Parsing of one invocation's standard output into a duration sample.

/// Why a sample could not be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// Output was not UTF-8.
    #[error("output is not valid UTF-8")]
    NotUtf8,

    /// Output contained only whitespace.
    #[error("output is empty")]
    Empty,

    /// Output was not a floating-point number.
    #[error("cannot parse {raw:?} as seconds: {reason}")]
    NotANumber { raw: String, reason: String },

    /// Output parsed, but is not a usable duration.
    #[error("{0} is not a finite, non-negative duration")]
    OutOfRange(f64),
}

/// Parse the standard output of one invocation as elapsed seconds.
///
/// Leading and trailing whitespace is ignored. Negative, NaN and infinite
/// values are rejected.
pub fn parse_sample(stdout: &[u8]) -> Result<f64, SampleError> {
    let text = std::str::from_utf8(stdout).map_err(|_| SampleError::NotUtf8)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SampleError::Empty);
    }
    let seconds: f64 = trimmed.parse().map_err(|e: std::num::ParseFloatError| {
        SampleError::NotANumber {
            raw: trimmed.to_string(),
            reason: e.to_string(),
        }
    })?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(SampleError::OutOfRange(seconds));
    }
    Ok(seconds)
}
