#![doc = include_str!("../README.md")]

// Perception stages, leaves first.
pub mod threshold;
pub mod tracer;
pub mod conditioner;
pub mod perspective;
pub mod classifier;
pub mod stabilizer;
pub mod resolver;
pub mod pipeline;

// Shared plumbing.
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::VisionError;
pub use crate::pipeline::{CycleOutput, PipelineParams, TrackPipeline, TrackSnapshot};
pub use crate::types::{BoundaryLine, CornerCount, ElementType, Point, Side};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use track_vision::prelude::*;
///
/// # fn main() -> Result<(), VisionError> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8::new(w, h, &gray);
///
/// let mut pipeline = TrackPipeline::new(PipelineParams::default())?;
/// let out = pipeline.process(&img)?;
/// println!("element={} anchor_x={}", out.stable, out.anchor_x);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::pipeline::PerspectiveMode;
    pub use crate::{
        CycleOutput, ElementType, PipelineParams, Point, TrackPipeline, VisionError,
    };
}
