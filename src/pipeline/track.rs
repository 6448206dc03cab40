use super::params::{PerspectiveMode, PipelineParams};
use super::snapshot::{CycleOutput, TrackSnapshot};
use crate::classifier::classify;
use crate::conditioner::{
    count_corners, filter_bounds, forward_slope, is_straight, mirror, peak_turn_deg, resample,
    smooth, trans_line,
};
use crate::diagnostics::{elapsed_ms, TimingBreakdown};
use crate::error::VisionError;
use crate::image::ImageU8;
use crate::perspective::PerspectiveMap;
use crate::resolver::TargetResolver;
use crate::stabilizer::StateHistory;
use crate::threshold::{OtsuThresholder, RegionThresholder};
use crate::tracer::trace;
use crate::types::{BoundaryLine, Point, Side};
use log::debug;
use std::time::Instant;

/// Caller-owned perception context: the calibrated perspective map, the
/// element history and the previous anchor, advanced once per frame.
pub struct TrackPipeline {
    params: PipelineParams,
    perspective: Option<PerspectiveMap>,
    history: StateHistory,
    resolver: TargetResolver,
    thresholder: Box<dyn RegionThresholder>,
}

impl TrackPipeline {
    /// Validate `params` and solve the perspective map once.
    pub fn new(params: PipelineParams) -> Result<Self, VisionError> {
        params.validate()?;
        let perspective = match &params.perspective {
            PerspectiveMode::Identity => None,
            PerspectiveMode::Calibrated(cal) => Some(PerspectiveMap::from_calibration(cal)?),
        };
        Ok(Self {
            history: StateHistory::new(params.stabilizer_window),
            resolver: TargetResolver::new(params.resolver),
            perspective,
            thresholder: Box::new(OtsuThresholder),
            params,
        })
    }

    /// Swap the region thresholder used by the tracer.
    pub fn with_thresholder<T: RegionThresholder + 'static>(mut self, thresholder: T) -> Self {
        self.thresholder = Box::new(thresholder);
        self
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Calibrated map, or `None` when boundaries stay in image coordinates.
    pub fn perspective(&self) -> Option<&PerspectiveMap> {
        self.perspective.as_ref()
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn resolver(&self) -> &TargetResolver {
        &self.resolver
    }

    /// Forget the element history and the previous anchor.
    pub fn reset(&mut self) {
        self.history.clear();
        self.resolver.reset();
    }

    /// Run one cycle from the default seed `(w / 2, h - seed_row_offset)`.
    pub fn process(&mut self, grid: &ImageU8<'_>) -> Result<CycleOutput, VisionError> {
        let seed = Point::new((grid.w / 2) as i32, grid.h as i32 - self.params.seed_row_offset);
        self.process_with_seed(grid, seed)
    }

    pub fn process_with_seed(
        &mut self,
        grid: &ImageU8<'_>,
        seed: Point,
    ) -> Result<CycleOutput, VisionError> {
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();
        let frame = (grid.w, grid.h);

        let stage = Instant::now();
        let traced = trace(grid, seed, &self.params.tracer, self.thresholder.as_ref())?;
        timing.push("trace", elapsed_ms(stage));

        let stage = Instant::now();
        let left = self.condition(&traced.left, frame);
        let right = self.condition(&traced.right, frame);
        let snapshot = self.snapshot(left, right, frame);
        timing.push("condition", elapsed_ms(stage));
        debug!(
            "snapshot left={} right={} corners={:?} slope={:?}",
            snapshot.left.len(),
            snapshot.right.len(),
            snapshot.corners,
            snapshot.slope
        );

        let stage = Instant::now();
        let raw = classify(
            &snapshot.features(),
            self.history.current(),
            &self.params.classifier,
        );
        self.history.push(raw);
        let stable = self.history.current();
        timing.push("classify", elapsed_ms(stage));
        debug!("element raw={raw} stable={stable}");

        let stage = Instant::now();
        let anchor = self.resolver.resolve(&snapshot, stable);
        timing.push("resolve", elapsed_ms(stage));

        timing.total_ms = elapsed_ms(total_start);
        Ok(CycleOutput {
            anchor,
            anchor_x: anchor.x,
            stable,
            raw,
            snapshot,
            timing,
        })
    }

    /// smooth -> ground frame -> resample -> bounds -> smooth
    fn condition(&self, line: &[Point], frame: (usize, usize)) -> BoundaryLine {
        let cp = &self.params.conditioner;
        let smoothed = smooth(line, cp.smooth_kernel);
        let mapped = match &self.perspective {
            Some(map) => map.map_line(&smoothed, frame),
            None => smoothed,
        };
        let resampled = resample(&mapped, cp.resample_spacing);
        let kept = filter_bounds(&resampled, frame.0, frame.1, cp.bounds_margin);
        smooth(&kept, cp.smooth_kernel)
    }

    fn snapshot(&self, left: BoundaryLine, right: BoundaryLine, frame: (usize, usize)) -> TrackSnapshot {
        let cp = &self.params.conditioner;
        let corner = &self.params.corners;
        let (w, h) = frame;

        let left_rows = trans_line(&left, w, h);
        let right_rows = trans_line(&mirror(&right, w), w, h);
        let corners = [
            count_corners(&left_rows, corner.distance, corner.threshold),
            count_corners(&right_rows, corner.distance, corner.threshold),
        ];

        let mut snap = TrackSnapshot {
            frame,
            corners,
            ..Default::default()
        };
        for (side, line) in [(Side::Left, &left), (Side::Right, &right)] {
            let i = side.index();
            snap.slope[i] = forward_slope(line);
            snap.straight[i] = is_straight(line, cp.straight_max_distance);
            snap.peak_turn_deg[i] = peak_turn_deg(line, cp.turn_distance, cp.turn_nms_kernel);
        }
        snap.left = left;
        snap.right = right;
        snap
    }
}
