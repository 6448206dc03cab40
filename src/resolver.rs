//! Steering target selection.
//!
//! The resolver picks which boundary to follow for the stable element,
//! shifts it to an estimated centerline and returns the centerline point
//! closest to a look-ahead row. It keeps the last anchor so a frame that lost
//! both boundaries still produces a target.
use crate::conditioner::shift_centerline;
use crate::pipeline::TrackSnapshot;
use crate::types::{ElementType, Point, RingPhase, Side};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Look-ahead rows (measured up from the bottom of the frame) and the
/// half track width used to derive the centerline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverParams {
    pub line_offset: i32,
    pub cross_offset: i32,
    /// Loops measure from `min(width, height)` instead of the height.
    pub ring_offset: i32,
    pub half_track_width: f32,
}

impl Default for ResolverParams {
    fn default() -> Self {
        Self {
            line_offset: 30,
            cross_offset: 50,
            ring_offset: 30,
            half_track_width: 10.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TargetResolver {
    params: ResolverParams,
    previous: Option<Point>,
}

impl TargetResolver {
    pub fn new(params: ResolverParams) -> Self {
        Self {
            params,
            previous: None,
        }
    }

    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    /// Anchor chosen on the last call, if any.
    pub fn previous(&self) -> Option<Point> {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Row the anchor should sit on for `stable` in a `width x height` frame.
    pub fn target_row(&self, frame: (usize, usize), stable: ElementType) -> i32 {
        let (w, h) = (frame.0 as i32, frame.1 as i32);
        if stable.ring().is_some() {
            w.min(h) - self.params.ring_offset
        } else if stable.is_cross() {
            h - self.params.cross_offset
        } else {
            h - self.params.line_offset
        }
    }

    pub fn resolve(&mut self, snapshot: &TrackSnapshot, stable: ElementType) -> Point {
        let row = self.target_row(snapshot.frame, stable);
        let preferred = match stable.ring() {
            Some((side, RingPhase::In)) => side,
            Some((side, _)) => side.opposite(),
            None => Side::Left,
        };

        let side = [preferred, preferred.opposite()]
            .into_iter()
            .find(|s| !snapshot.boundary(*s).is_empty());
        let Some(side) = side else {
            let anchor = self
                .previous
                .unwrap_or(Point::new((snapshot.frame.0 / 2) as i32, row));
            warn!(
                "no boundary for {stable}; holding anchor ({}, {})",
                anchor.x, anchor.y
            );
            self.previous = Some(anchor);
            return anchor;
        };

        let center = shift_centerline(snapshot.boundary(side), self.params.half_track_width, side);
        let mut anchor = center[0];
        for p in &center[1..] {
            if (p.y - row).abs() < (anchor.y - row).abs() {
                anchor = *p;
            }
        }
        debug!(
            "anchor ({}, {}) from {:?} centerline, target row {row}",
            anchor.x, anchor.y, side
        );
        self.previous = Some(anchor);
        anchor
    }
}
