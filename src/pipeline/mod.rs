//! Per-frame perception pipeline.
//!
//! [`TrackPipeline`] owns everything that must survive between frames (the
//! perspective map, the element history and the previous anchor) and runs
//! one synchronous pass per frame:
//!
//! 1. trace both boundaries from the seed;
//! 2. condition each side: smooth, map to the ground frame, resample, drop
//!    points near the edges, smooth again;
//! 3. build a [`TrackSnapshot`] (forward slopes, corner counts on the row
//!    projection with the right side mirrored, straightness, peak turns);
//! 4. classify against the current stable element and push the result into
//!    the stabilizer;
//! 5. resolve the steering anchor for the new stable element.
//!
//! ```no_run
//! use track_vision::image::ImageU8;
//! use track_vision::pipeline::{PipelineParams, TrackPipeline};
//!
//! # fn example(gray: ImageU8) -> Result<(), track_vision::VisionError> {
//! let mut pipeline = TrackPipeline::new(PipelineParams::default())?;
//! let out = pipeline.process(&gray)?;
//! println!("{} -> steer to x={}", out.stable, out.anchor_x);
//! # Ok(())
//! # }
//! ```
pub mod params;
mod snapshot;
mod track;

pub use params::{PerspectiveMode, PipelineParams};
pub use snapshot::{CycleOutput, TrackSnapshot};
pub use track::TrackPipeline;
