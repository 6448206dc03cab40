//! Per-cycle diagnostics reported alongside the pipeline output.
pub mod timing;

pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
