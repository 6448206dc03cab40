//! Row projection and corner counting.
//!
//! A boundary is projected onto one x value per image row; a corner is a
//! lateral jump of more than `threshold` pixels across `distance` rows.
//! Right boundaries are mirrored first, so for either side an *outward* event
//! means the boundary jumps away from the track center going forward and an
//! *inward* event means it jumps back.
use crate::types::{CornerCount, Point};

/// Dense per-row projection: `out[y]` is the x of the first point seen on row
/// `y`, or `width / 2` for rows the boundary never visits. Points on rows
/// outside `[0, height)` are ignored.
pub fn trans_line(line: &[Point], width: usize, height: usize) -> Vec<i32> {
    let mut xs = vec![(width / 2) as i32; height];
    let mut seen = vec![false; height];
    for p in line {
        if p.y < 0 || p.y as usize >= height {
            continue;
        }
        let y = p.y as usize;
        if !seen[y] {
            seen[y] = true;
            xs[y] = p.x;
        }
    }
    xs
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Event {
    Outward,
    Inward,
}

/// Count alternating corner events over a row projection.
///
/// For every `y` with `y + distance < xs.len()`, `d = xs[y] - xs[y + distance]`;
/// `d > threshold` is outward and `-d > threshold` is inward. An event is
/// only counted when the previously counted event was of the other kind, so
/// the two counts never differ by more than one.
pub fn count_corners(xs: &[i32], distance: usize, threshold: i32) -> CornerCount {
    let mut count = CornerCount::NONE;
    let mut last: Option<Event> = None;
    for y in 0..xs.len().saturating_sub(distance) {
        let d = xs[y] - xs[y + distance];
        let event = if d > threshold {
            Event::Outward
        } else if -d > threshold {
            Event::Inward
        } else {
            continue;
        };
        if last == Some(event) {
            continue;
        }
        last = Some(event);
        match event {
            Event::Outward => count.outward += 1,
            Event::Inward => count.inward += 1,
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_keeps_first_hit_and_fills_gaps() {
        let line = vec![
            Point::new(10, 4),
            Point::new(12, 4),
            Point::new(11, 2),
            Point::new(3, -1),
            Point::new(3, 9),
        ];
        assert_eq!(trans_line(&line, 20, 6), vec![10, 10, 11, 10, 10, 10]);
    }

    #[test]
    fn single_jump_is_one_event() {
        // Rows near the vehicle (large y) sit at 20, far rows jump out to 60.
        let mut xs = vec![20; 60];
        for x in xs.iter_mut().take(20) {
            *x = 60;
        }
        assert_eq!(count_corners(&xs, 15, 30), CornerCount::new(1, 0));

        let mut xs = vec![60; 60];
        for x in xs.iter_mut().take(20) {
            *x = 20;
        }
        assert_eq!(count_corners(&xs, 15, 30), CornerCount::new(0, 1));
        assert_eq!(count_corners(&[40; 60], 15, 30), CornerCount::NONE);
        assert_eq!(count_corners(&[40; 10], 15, 30), CornerCount::NONE);
    }

    #[test]
    fn counts_alternate_and_stay_balanced() {
        // Square wave with several repeated jumps in both directions.
        let xs: Vec<i32> = (0..200).map(|y| if (y / 25) % 2 == 0 { 10 } else { 70 }).collect();
        let c = count_corners(&xs, 15, 30);
        assert!(c.outward > 1 && c.inward > 1);
        assert!((c.outward as i64 - c.inward as i64).abs() <= 1);

        for seed in 0..50u32 {
            let xs: Vec<i32> = (0..120u32)
                .map(|y| ((y.wrapping_mul(2654435761).wrapping_add(seed * 97)) % 90) as i32)
                .collect();
            let c = count_corners(&xs, 7, 20);
            assert!((c.outward as i64 - c.inward as i64).abs() <= 1, "{c:?}");
        }
    }
}
