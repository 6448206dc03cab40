//! Track-element state machine.
//!
//! [`classify`] is a pure, total function of the current (stable) element and
//! the per-side features of one frame. Rules are checked in a fixed order:
//! intersections, right loops, left loops, then plain curves. Both loop
//! directions share one rule table, parameterised by the loop side: `near`
//! is the corner count of the loop side and `far` that of the opposite side.
use crate::types::{CornerCount, ElementType, RingPhase, Side};
use serde::{Deserialize, Serialize};

/// Per-side features of one frame; index 0 is left, 1 is right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Features {
    pub corners: [CornerCount; 2],
    pub slope: [f32; 2],
}

impl Features {
    #[inline]
    pub fn corners_of(&self, side: Side) -> CornerCount {
        self.corners[side.index()]
    }

    #[inline]
    fn all_zero(&self) -> bool {
        self.corners.iter().all(|c| *c == CornerCount::NONE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// Forward slope beyond which a boundary reads as a curve.
    pub curve_slope: f32,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self { curve_slope: 0.15 }
    }
}

const ONE_OUT: CornerCount = CornerCount::new(1, 0);
const ONE_IN: CornerCount = CornerCount::new(0, 1);
const BOTH: CornerCount = CornerCount::new(1, 1);

/// Next element given the current one and this frame's features.
pub fn classify(features: &Features, current: ElementType, params: &ClassifierParams) -> ElementType {
    if current.is_cross() {
        return next_cross(features, current);
    }
    if features.corners == [BOTH, BOTH] {
        return ElementType::CrossBegin;
    }

    let ring = current.ring();
    for side in [Side::Right, Side::Left] {
        if let Some((ring_side, phase)) = ring {
            if ring_side == side {
                return next_ring(features, side, phase);
            }
        }
        if ring_entry(features, side) {
            return ElementType::from_ring(side, RingPhase::Ready);
        }
    }

    if features.slope[Side::Left.index()] > params.curve_slope {
        ElementType::RCurve
    } else if features.slope[Side::Right.index()] < -params.curve_slope {
        ElementType::LCurve
    } else {
        ElementType::Line
    }
}

fn next_cross(features: &Features, current: ElementType) -> ElementType {
    let inside = features.corners.iter().all(|c| c.inward == 1);
    match (current, inside) {
        (ElementType::CrossBegin, true) => ElementType::CrossIn,
        (ElementType::CrossIn, false) => ElementType::Line,
        (held, _) => held,
    }
}

#[inline]
fn ring_entry(features: &Features, side: Side) -> bool {
    features.corners_of(side) == ONE_OUT && features.corners_of(side.opposite()) == CornerCount::NONE
}

#[inline]
fn ring_exit(near: CornerCount, far: CornerCount) -> bool {
    far.outward == 1 && near.inward == 1
}

fn next_ring(features: &Features, side: Side, phase: RingPhase) -> ElementType {
    let near = features.corners_of(side);
    let far = features.corners_of(side.opposite());
    let next = match phase {
        RingPhase::Ready if !ring_entry(features, side) => RingPhase::Begin,
        RingPhase::Begin if near == ONE_IN && far == CornerCount::NONE => RingPhase::In,
        RingPhase::In if near == CornerCount::NONE && far == ONE_IN => RingPhase::Running,
        RingPhase::Running if ring_exit(near, far) => RingPhase::Out,
        RingPhase::Out if !ring_exit(near, far) => RingPhase::End,
        RingPhase::End if features.all_zero() => return ElementType::Line,
        held => held,
    };
    ElementType::from_ring(side, next)
}
