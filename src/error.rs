//! Error taxonomy of the perception core.
//!
//! Only malformed calls and calibration faults are errors. Track loss,
//! unrecognised corner patterns and empty point sequences are handled by
//! defaults inside the stages and never surface here.

/// Failure reported across the pipeline boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisionError {
    /// Malformed grid, seed, or stage parameter.
    InvalidInput(String),
    /// Degenerate calibration correspondences.
    Calibration(String),
}

impl VisionError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        VisionError::InvalidInput(msg.into())
    }

    pub(crate) fn calibration(msg: impl Into<String>) -> Self {
        VisionError::Calibration(msg.into())
    }
}

impl std::fmt::Display for VisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisionError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            VisionError::Calibration(msg) => write!(f, "calibration failure: {msg}"),
        }
    }
}

impl std::error::Error for VisionError {}
