use crate::classifier::Features;
use crate::diagnostics::TimingBreakdown;
use crate::types::{BoundaryLine, CornerCount, ElementType, Point, Side};
use serde::Serialize;

/// Conditioned boundaries of one frame plus everything derived from them.
/// Per-side arrays are indexed 0 = left, 1 = right.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSnapshot {
    pub left: BoundaryLine,
    pub right: BoundaryLine,
    /// `(width, height)` of the frame the boundaries live in.
    pub frame: (usize, usize),
    pub slope: [f32; 2],
    pub corners: [CornerCount; 2],
    pub straight: [bool; 2],
    pub peak_turn_deg: [f32; 2],
}

impl TrackSnapshot {
    #[inline]
    pub fn boundary(&self, side: Side) -> &BoundaryLine {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn features(&self) -> Features {
        Features {
            corners: self.corners,
            slope: self.slope,
        }
    }
}

/// Result of one pipeline cycle.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleOutput {
    pub anchor: Point,
    /// Steering column handed to the controller.
    pub anchor_x: i32,
    /// Majority-voted element after this frame was pushed.
    pub stable: ElementType,
    /// This frame's classifier output.
    pub raw: ElementType,
    pub snapshot: TrackSnapshot,
    pub timing: TimingBreakdown,
}
