use serde::{Deserialize, Serialize};

pub use crate::image::ImageU8;

/// Integer pixel coordinate in sample-grid (or ground-plane) space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn from_f32(p: [f32; 2]) -> Self {
        Self {
            x: p[0].round() as i32,
            y: p[1].round() as i32,
        }
    }
}

/// Ordered boundary samples, from the seed (near) outward (far).
pub type BoundaryLine = Vec<Point>;

/// Which edge of the track a line or rule refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Outward/inward corner events detected on one boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CornerCount {
    pub outward: u32,
    pub inward: u32,
}

impl CornerCount {
    pub const NONE: CornerCount = CornerCount::new(0, 0);

    #[inline]
    pub const fn new(outward: u32, inward: u32) -> Self {
        Self { outward, inward }
    }
}

/// Track element recognised by the classifier.
///
/// The declaration order is the ordinal order used by the stabilizer's
/// tie-break, so keep `Line` first.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ElementType {
    #[default]
    Line,
    LCurve,
    RCurve,
    CrossBegin,
    CrossIn,
    LRingReady,
    LRingBegin,
    LRingIn,
    LRingRunning,
    LRingOut,
    LRingEnd,
    RRingReady,
    RRingBegin,
    RRingIn,
    RRingRunning,
    RRingOut,
    RRingEnd,
}

/// Sub-phase of a loop, shared by both loop directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RingPhase {
    Ready,
    Begin,
    In,
    Running,
    Out,
    End,
}

impl ElementType {
    pub const COUNT: usize = 17;

    pub const ALL: [ElementType; ElementType::COUNT] = [
        ElementType::Line,
        ElementType::LCurve,
        ElementType::RCurve,
        ElementType::CrossBegin,
        ElementType::CrossIn,
        ElementType::LRingReady,
        ElementType::LRingBegin,
        ElementType::LRingIn,
        ElementType::LRingRunning,
        ElementType::LRingOut,
        ElementType::LRingEnd,
        ElementType::RRingReady,
        ElementType::RRingBegin,
        ElementType::RRingIn,
        ElementType::RRingRunning,
        ElementType::RRingOut,
        ElementType::RRingEnd,
    ];

    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_ordinal(idx: usize) -> Option<ElementType> {
        Self::ALL.get(idx).copied()
    }

    #[inline]
    pub fn is_cross(self) -> bool {
        matches!(self, ElementType::CrossBegin | ElementType::CrossIn)
    }

    /// Loop side and phase, or `None` for non-loop elements.
    pub fn ring(self) -> Option<(Side, RingPhase)> {
        use ElementType::*;
        let v = match self {
            LRingReady => (Side::Left, RingPhase::Ready),
            LRingBegin => (Side::Left, RingPhase::Begin),
            LRingIn => (Side::Left, RingPhase::In),
            LRingRunning => (Side::Left, RingPhase::Running),
            LRingOut => (Side::Left, RingPhase::Out),
            LRingEnd => (Side::Left, RingPhase::End),
            RRingReady => (Side::Right, RingPhase::Ready),
            RRingBegin => (Side::Right, RingPhase::Begin),
            RRingIn => (Side::Right, RingPhase::In),
            RRingRunning => (Side::Right, RingPhase::Running),
            RRingOut => (Side::Right, RingPhase::Out),
            RRingEnd => (Side::Right, RingPhase::End),
            _ => return None,
        };
        Some(v)
    }

    pub fn from_ring(side: Side, phase: RingPhase) -> ElementType {
        use ElementType::*;
        match (side, phase) {
            (Side::Left, RingPhase::Ready) => LRingReady,
            (Side::Left, RingPhase::Begin) => LRingBegin,
            (Side::Left, RingPhase::In) => LRingIn,
            (Side::Left, RingPhase::Running) => LRingRunning,
            (Side::Left, RingPhase::Out) => LRingOut,
            (Side::Left, RingPhase::End) => LRingEnd,
            (Side::Right, RingPhase::Ready) => RRingReady,
            (Side::Right, RingPhase::Begin) => RRingBegin,
            (Side::Right, RingPhase::In) => RRingIn,
            (Side::Right, RingPhase::Running) => RRingRunning,
            (Side::Right, RingPhase::Out) => RRingOut,
            (Side::Right, RingPhase::End) => RRingEnd,
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ElementType::*;
        let name = match self {
            Line => "LINE",
            LCurve => "L_CURVE",
            RCurve => "R_CURVE",
            CrossBegin => "CROSS_BEGIN",
            CrossIn => "CROSS_IN",
            LRingReady => "L_RING_READY",
            LRingBegin => "L_RING_BEGIN",
            LRingIn => "L_RING_IN",
            LRingRunning => "L_RING_RUNNING",
            LRingOut => "L_RING_OUT",
            LRingEnd => "L_RING_END",
            RRingReady => "R_RING_READY",
            RRingBegin => "R_RING_BEGIN",
            RRingIn => "R_RING_IN",
            RRingRunning => "R_RING_RUNNING",
            RRingOut => "R_RING_OUT",
            RRingEnd => "R_RING_END",
        };
        f.write_str(name)
    }
}
