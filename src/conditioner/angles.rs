//! Local turning angles along a boundary.
use crate::types::Point;

/// Signed turning angle (radians) at every point, comparing the direction
/// from `line[i - distance]` to `line[i]` with the one from `line[i]` to
/// `line[i + distance]` (indices clamped). Endpoints and points with a
/// zero-length neighbour chord get 0.
pub fn turn_angles(line: &[Point], distance: usize) -> Vec<f32> {
    let n = line.len();
    let mut out = vec![0.0f32; n];
    if n < 3 {
        return out;
    }
    for i in 1..n - 1 {
        let prev = line[i.saturating_sub(distance)];
        let curr = line[i];
        let next = line[(i + distance).min(n - 1)];

        let (dx1, dy1) = ((curr.x - prev.x) as f32, (curr.y - prev.y) as f32);
        let (dx2, dy2) = ((next.x - curr.x) as f32, (next.y - curr.y) as f32);
        let (n1, n2) = (dx1.hypot(dy1), dx2.hypot(dy2));
        if n1 == 0.0 || n2 == 0.0 {
            continue;
        }
        let (c1, s1) = (dx1 / n1, dy1 / n1);
        let (c2, s2) = (dx2 / n2, dy2 / n2);
        out[i] = (c1 * s2 - c2 * s1).atan2(c1 * c2 + s1 * s2);
    }
    out
}

/// Keep only values whose magnitude is the largest within the centered
/// `kernel` window (indices clamped); everything else becomes 0.
pub fn suppress_non_max(angles: &[f32], kernel: usize) -> Vec<f32> {
    let n = angles.len();
    let half = (kernel / 2) as i64;
    let last = n as i64 - 1;
    (0..n)
        .map(|i| {
            let v = angles[i];
            let dominated = (-half..=half).any(|j| {
                let k = (i as i64 + j).clamp(0, last) as usize;
                angles[k].abs() > v.abs()
            });
            if dominated {
                0.0
            } else {
                v
            }
        })
        .collect()
}

/// Largest absolute turn in degrees after non-maximum suppression.
pub fn peak_turn_deg(line: &[Point], distance: usize, kernel: usize) -> f32 {
    suppress_non_max(&turn_angles(line, distance), kernel)
        .into_iter()
        .fold(0.0f32, |m, a| m.max(a.abs()))
        .to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn elbow() -> Vec<Point> {
        // Up ten rows, then right ten columns.
        let mut pts: Vec<Point> = (0..=10).map(|i| Point::new(0, 10 - i)).collect();
        pts.extend((1..=10).map(|i| Point::new(i, 0)));
        pts
    }

    #[test]
    fn elbow_peaks_at_the_corner() {
        let pts = elbow();
        let angles = turn_angles(&pts, 3);
        assert_eq!(angles.len(), pts.len());
        assert!((angles[10] - FRAC_PI_2).abs() < 1e-5, "a={}", angles[10]);
        assert_eq!(angles[0], 0.0);
        assert_eq!(angles[3], 0.0);

        let kept = suppress_non_max(&angles, 5);
        let nonzero: Vec<usize> = (0..kept.len()).filter(|&i| kept[i] != 0.0).collect();
        assert_eq!(nonzero, vec![10]);
        assert!((peak_turn_deg(&pts, 3, 5) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn straight_and_tiny_inputs_do_not_turn() {
        let col: Vec<Point> = (0..20).map(|i| Point::new(4, 20 - i)).collect();
        assert!(turn_angles(&col, 5).iter().all(|a| *a == 0.0));
        assert_eq!(turn_angles(&col[..2], 5), vec![0.0, 0.0]);
        assert_eq!(peak_turn_deg(&[], 5, 5), 0.0);
    }
}
