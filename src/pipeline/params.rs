//! Parameters for the per-frame pipeline.
//!
//! Every field is defaulted, so a JSON config only needs to name the values
//! it overrides.
use crate::classifier::ClassifierParams;
use crate::conditioner::{ConditionerParams, CornerParams};
use crate::error::VisionError;
use crate::perspective::{CalibrationParams, PerspectiveMap};
use crate::resolver::ResolverParams;
use crate::tracer::TracerParams;
use serde::{Deserialize, Serialize};

/// How boundaries are carried into the ground frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PerspectiveMode {
    /// Use image coordinates unchanged.
    Identity,
    /// Four-point calibrated homography.
    Calibrated(CalibrationParams),
}

impl Default for PerspectiveMode {
    fn default() -> Self {
        PerspectiveMode::Calibrated(CalibrationParams::default())
    }
}

impl PerspectiveMode {
    /// Build the map; identity maps take the ground size from `frame`.
    pub fn build(&self, frame: (usize, usize)) -> Result<PerspectiveMap, VisionError> {
        match self {
            PerspectiveMode::Identity => Ok(PerspectiveMap::identity(frame.0, frame.1)),
            PerspectiveMode::Calibrated(cal) => PerspectiveMap::from_calibration(cal),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub tracer: TracerParams,
    pub conditioner: ConditionerParams,
    pub corners: CornerParams,
    pub classifier: ClassifierParams,
    pub resolver: ResolverParams,
    pub perspective: PerspectiveMode,
    /// Majority-vote window of the stabilizer.
    pub stabilizer_window: usize,
    /// The default seed sits this many rows above the bottom edge.
    pub seed_row_offset: i32,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            tracer: TracerParams::default(),
            conditioner: ConditionerParams::default(),
            corners: CornerParams::default(),
            classifier: ClassifierParams::default(),
            resolver: ResolverParams::default(),
            perspective: PerspectiveMode::default(),
            stabilizer_window: 5,
            seed_row_offset: 10,
        }
    }
}

impl PipelineParams {
    pub fn validate(&self) -> Result<(), VisionError> {
        self.tracer.validate()?;
        self.conditioner.validate()?;
        self.corners.validate()?;
        if self.stabilizer_window == 0 {
            return Err(VisionError::invalid("stabilizer_window must be positive"));
        }
        if !self.classifier.curve_slope.is_finite() || self.classifier.curve_slope < 0.0 {
            return Err(VisionError::invalid(format!(
                "curve_slope must be a non-negative number, got {}",
                self.classifier.curve_slope
            )));
        }
        if !self.resolver.half_track_width.is_finite() {
            return Err(VisionError::invalid("half_track_width must be finite"));
        }
        if self.seed_row_offset < 0 {
            return Err(VisionError::invalid("seed_row_offset must be non-negative"));
        }
        Ok(())
    }
}
