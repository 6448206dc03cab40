//! Point-series conditioning for traced boundaries.
//!
//! Everything here is a pure function over `&[Point]` (or the dense per-row
//! projection of one). The pipeline chains them as
//! `smooth -> perspective -> resample -> filter_bounds -> smooth` and then
//! derives the classifier features:
//!
//! - [`forward_slope`]: lateral drift per row, the curve cue.
//! - [`trans_line`] + [`count_corners`]: outward/inward jumps of the
//!   boundary, the intersection and loop cue.
//! - [`is_straight`] and [`turn_angles`]/[`suppress_non_max`]: shape
//!   diagnostics recorded in the snapshot.
//!
//! Right boundaries are reflected with [`mirror`] before corner counting so
//! one rule set serves both sides.
pub mod angles;
pub mod centerline;
pub mod corners;
pub mod fit;
pub mod series;

pub use angles::{peak_turn_deg, suppress_non_max, turn_angles};
pub use centerline::shift_centerline;
pub use corners::{count_corners, trans_line};
pub use fit::{fit_line, forward_slope, is_straight, LineFit};
pub use series::{filter_bounds, mirror, resample, smooth, MIN_RESAMPLE_SPACING};

use crate::error::VisionError;
use serde::{Deserialize, Serialize};

/// Smoothing, resampling and shape-analysis parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionerParams {
    /// Triangular filter length (odd).
    pub smooth_kernel: usize,
    /// Arc-length spacing between resampled points.
    pub resample_spacing: f32,
    /// Points closer than this to any frame edge are dropped.
    pub bounds_margin: i32,
    /// Mean perpendicular residual (px) under which a side counts as straight.
    pub straight_max_distance: f32,
    /// Neighbor distance used for local turning angles.
    pub turn_distance: usize,
    /// Window (odd) for turning-angle non-maximum suppression.
    pub turn_nms_kernel: usize,
}

impl Default for ConditionerParams {
    fn default() -> Self {
        Self {
            smooth_kernel: 15,
            resample_spacing: 1.0,
            bounds_margin: 15,
            straight_max_distance: 3.0,
            turn_distance: 5,
            turn_nms_kernel: 5,
        }
    }
}

impl ConditionerParams {
    pub fn validate(&self) -> Result<(), VisionError> {
        if self.smooth_kernel % 2 == 0 {
            return Err(VisionError::invalid(format!(
                "smooth_kernel must be odd, got {}",
                self.smooth_kernel
            )));
        }
        if !(self.resample_spacing.is_finite() && self.resample_spacing >= MIN_RESAMPLE_SPACING) {
            return Err(VisionError::invalid(format!(
                "resample_spacing must be at least {MIN_RESAMPLE_SPACING}, got {}",
                self.resample_spacing
            )));
        }
        if self.bounds_margin < 0 {
            return Err(VisionError::invalid("bounds_margin must be non-negative"));
        }
        if self.turn_nms_kernel % 2 == 0 {
            return Err(VisionError::invalid(format!(
                "turn_nms_kernel must be odd, got {}",
                self.turn_nms_kernel
            )));
        }
        Ok(())
    }
}

/// Corner detector parameters for [`count_corners`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerParams {
    /// Row lookahead between the compared samples.
    pub distance: usize,
    /// Minimum lateral jump (px) that counts as an event.
    pub threshold: i32,
}

impl Default for CornerParams {
    fn default() -> Self {
        Self {
            distance: 15,
            threshold: 30,
        }
    }
}

impl CornerParams {
    pub fn validate(&self) -> Result<(), VisionError> {
        if self.distance == 0 {
            return Err(VisionError::invalid("corner distance must be positive"));
        }
        if self.threshold < 0 {
            return Err(VisionError::invalid("corner threshold must be non-negative"));
        }
        Ok(())
    }
}
