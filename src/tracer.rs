//! Adaptive wall-following boundary tracer.
//!
//! Both boundaries are traced independently from the same seed: the left one
//! with the background "wall" kept on the left hand, the right one with the
//! wall on the right hand. At every step the split point is recomputed over a
//! small window around the cursor, so shading across the frame does not move
//! the boundary.
//!
//! Per step, with `ahead` the pixel in front of the cursor and `diagonal` the
//! pixel ahead and one towards the wall:
//! - `ahead` is background: rotate 90° away from the wall.
//! - `diagonal` is background: step forward and record the point.
//! - otherwise: step onto `diagonal`, rotate 90° towards the wall and record.
//!
//! The walk ends after `max_points` moves, when the cursor leaves the safe
//! interior (`window_size / 2` from every edge), or after four turns without
//! a move. A guard border is always read as background so the walk cannot
//! leave the frame.
use crate::error::VisionError;
use crate::image::ImageU8;
use crate::threshold::{Polarity, Rect, RegionThresholder};
use crate::types::{BoundaryLine, Point, Side};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Split point used until the first window yields one.
const FALLBACK_THRESHOLD: u8 = 127;

/// Parameters for [`trace`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerParams {
    /// Side of the square thresholding window (odd, >= 3).
    pub window_size: usize,
    /// Maximum number of cursor moves per boundary.
    pub max_points: usize,
    /// Width of the guard border that always reads as background.
    pub border_width: usize,
    /// Half height of the row band thresholded to find the starting pixel.
    pub band_half_height: usize,
    /// Once more points than this are recorded, returning to the seed row
    /// ends the walk.
    pub return_guard: usize,
    /// Which side of the split point is track.
    pub polarity: Polarity,
}

impl Default for TracerParams {
    fn default() -> Self {
        Self {
            window_size: 7,
            max_points: 1000,
            border_width: 3,
            band_half_height: 5,
            return_guard: 10,
            polarity: Polarity::BrightTrack,
        }
    }
}

impl TracerParams {
    pub fn validate(&self) -> Result<(), VisionError> {
        if self.window_size < 3 || self.window_size % 2 == 0 {
            return Err(VisionError::invalid(format!(
                "window_size must be an odd number >= 3, got {}",
                self.window_size
            )));
        }
        if self.max_points == 0 {
            return Err(VisionError::invalid("max_points must be positive"));
        }
        Ok(())
    }
}

/// Left and right boundaries, each ordered from the seed outward.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TraceResult {
    pub left: BoundaryLine,
    pub right: BoundaryLine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    #[inline]
    fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    #[inline]
    fn clockwise(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    #[inline]
    fn counter_clockwise(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Right => Direction::Up,
            Direction::Down => Direction::Right,
            Direction::Left => Direction::Down,
        }
    }

    /// Rotate 90° towards the wall side.
    #[inline]
    fn toward(self, wall: Side) -> Direction {
        match wall {
            Side::Left => self.counter_clockwise(),
            Side::Right => self.clockwise(),
        }
    }

    /// Rotate 90° away from the wall side.
    #[inline]
    fn away(self, wall: Side) -> Direction {
        self.toward(wall.opposite())
    }

    /// Offset of the pixel ahead and one towards the wall.
    #[inline]
    fn diagonal(self, wall: Side) -> (i32, i32) {
        let (fx, fy) = self.offset();
        let (sx, sy) = self.toward(wall).offset();
        (fx + sx, fy + sy)
    }
}

/// Trace both track boundaries from `seed` using the default-sized windows
/// of `params` and the supplied region thresholder.
pub fn trace<T: RegionThresholder + ?Sized>(
    grid: &ImageU8<'_>,
    seed: Point,
    params: &TracerParams,
    thresholder: &T,
) -> Result<TraceResult, VisionError> {
    grid.validate()?;
    params.validate()?;
    if !grid.contains(seed.x, seed.y) {
        return Err(VisionError::invalid(format!(
            "seed ({}, {}) outside {}x{} grid",
            seed.x, seed.y, grid.w, grid.h
        )));
    }

    let walker = Walker {
        grid,
        params,
        thresholder,
    };
    let left = walker.walk(seed, Side::Left);
    let right = walker.walk(seed, Side::Right);
    debug!(
        "trace seed=({}, {}) left={} right={}",
        seed.x,
        seed.y,
        left.len(),
        right.len()
    );
    if left.is_empty() || right.is_empty() {
        warn!(
            "trace lost a boundary (left={}, right={})",
            left.len(),
            right.len()
        );
    }
    Ok(TraceResult { left, right })
}

struct Walker<'g, 'a, T: ?Sized> {
    grid: &'g ImageU8<'a>,
    params: &'g TracerParams,
    thresholder: &'g T,
}

impl<'g, 'a, T: RegionThresholder + ?Sized> Walker<'g, 'a, T> {
    #[inline]
    fn in_border(&self, x: i32, y: i32) -> bool {
        let b = self.params.border_width as i32;
        x < b || y < b || x >= self.grid.w as i32 - b || y >= self.grid.h as i32 - b
    }

    #[inline]
    fn is_background(&self, x: i32, y: i32, threshold: u8) -> bool {
        if !self.grid.contains(x, y) || self.in_border(x, y) {
            return true;
        }
        let value = self.grid.get(x as usize, y as usize);
        !self.params.polarity.is_track(value, threshold)
    }

    fn walk(&self, seed: Point, wall: Side) -> BoundaryLine {
        let (w, h) = (self.grid.w, self.grid.h);
        let (wi, hi) = (w as i32, h as i32);
        let half = (self.params.window_size / 2) as i32;

        let band = Rect::band(seed.y, self.params.band_half_height as i32, w, h);
        let mut threshold = self
            .thresholder
            .threshold(self.grid, band)
            .unwrap_or(FALLBACK_THRESHOLD);

        // The seed may sit inside the track; slide to the first background
        // pixel on the wall side.
        let dx = match wall {
            Side::Left => -1,
            Side::Right => 1,
        };
        let (mut x, mut y) = (seed.x, seed.y);
        while self.grid.contains(x, y) && !self.is_background(x, y, threshold) {
            x += dx;
        }

        let mut line = BoundaryLine::new();
        let mut dir = Direction::Up;
        let mut turns = 0u32;
        let mut steps = 0usize;
        while steps < self.params.max_points
            && turns < 4
            && half < x
            && x < wi - half
            && half < y
            && y < hi - half
        {
            let window = Rect::centered(x, y, half, w, h);
            if let Some(t) = self.thresholder.threshold(self.grid, window) {
                threshold = t;
            }

            let (fx, fy) = dir.offset();
            if self.is_background(x + fx, y + fy, threshold) {
                dir = dir.away(wall);
                turns += 1;
                continue;
            }
            let (gx, gy) = dir.diagonal(wall);
            if self.is_background(x + gx, y + gy, threshold) {
                x += fx;
                y += fy;
            } else {
                x += gx;
                y += gy;
                dir = dir.toward(wall);
            }
            steps += 1;
            turns = 0;

            if y >= seed.y {
                if line.len() > self.params.return_guard {
                    break;
                }
                continue;
            }
            line.push(Point::new(x, y));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::OtsuThresholder;

    fn vertical_track(w: usize, h: usize, x0: usize, x1: usize, track: u8, bg: u8) -> Vec<u8> {
        let mut data = vec![bg; w * h];
        for y in 0..h {
            for x in x0..x1 {
                data[y * w + x] = track;
            }
        }
        data
    }

    #[test]
    fn traces_both_edges_of_a_straight_track() {
        let data = vertical_track(80, 60, 30, 50, 220, 30);
        let grid = ImageU8::new(80, 60, &data);
        let res = trace(
            &grid,
            Point::new(40, 50),
            &TracerParams::default(),
            &OtsuThresholder,
        )
        .unwrap();

        assert!(!res.left.is_empty() && !res.right.is_empty());
        assert!(res.left.iter().all(|p| p.x == 30), "left={:?}", res.left);
        assert!(res.right.iter().all(|p| p.x == 49), "right={:?}", res.right);
        assert_eq!(res.left.first(), Some(&Point::new(30, 49)));
        assert_eq!(res.left.last(), Some(&Point::new(30, 3)));
        // ordered from the seed outward
        assert!(res.left.windows(2).all(|w| w[1].y == w[0].y - 1));
    }

    #[test]
    fn walk_is_bounded_and_stays_inside_the_grid() {
        // Diagonal band: every step recomputes thresholds along a slanted wall.
        let (w, h) = (64usize, 48usize);
        let mut data = vec![20u8; w * h];
        for y in 0..h {
            for x in 0..w {
                let c = 20 + (h - y) as i32 / 2;
                if (x as i32 - c).abs() < 8 {
                    data[y * w + x] = 230;
                }
            }
        }
        let grid = ImageU8::new(w, h, &data);
        for max_points in [1usize, 5, 40, 1000] {
            let params = TracerParams {
                max_points,
                ..Default::default()
            };
            let res = trace(&grid, Point::new(20, 40), &params, &OtsuThresholder).unwrap();
            for line in [&res.left, &res.right] {
                assert!(line.len() <= max_points);
                assert!(line.iter().all(|p| grid.contains(p.x, p.y)));
            }
        }
    }

    #[test]
    fn background_seed_ends_after_four_turns() {
        let data = vertical_track(40, 30, 5, 10, 220, 30);
        let grid = ImageU8::new(40, 30, &data);
        let res = trace(
            &grid,
            Point::new(30, 20),
            &TracerParams::default(),
            &OtsuThresholder,
        )
        .unwrap();
        assert!(res.left.is_empty());
        assert!(res.right.is_empty());
    }

    #[test]
    fn rejects_malformed_calls() {
        let data = vec![0u8; 100];
        let grid = ImageU8::new(10, 10, &data);
        let params = TracerParams::default();
        let seed = Point::new(5, 5);

        assert!(matches!(
            trace(&grid, Point::new(10, 5), &params, &OtsuThresholder),
            Err(VisionError::InvalidInput(_))
        ));
        let even = TracerParams {
            window_size: 6,
            ..params
        };
        assert!(trace(&grid, seed, &even, &OtsuThresholder).is_err());
        let zero = TracerParams {
            max_points: 0,
            ..params
        };
        assert!(trace(&grid, seed, &zero, &OtsuThresholder).is_err());
        let empty = ImageU8::new(0, 0, &[]);
        assert!(trace(&empty, Point::new(0, 0), &params, &OtsuThresholder).is_err());
    }
}
