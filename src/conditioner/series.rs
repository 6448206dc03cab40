use crate::types::{BoundaryLine, Point};

/// Triangular smoothing: weight `half + 1 - |j|` over `j in [-half, half]`,
/// indices clamped to the series; results rounded to the nearest pixel.
///
/// An even `kernel` is rounded up to the next odd length.
pub fn smooth(line: &[Point], kernel: usize) -> BoundaryLine {
    let n = line.len();
    if n == 0 {
        return BoundaryLine::new();
    }
    let half = (kernel | 1) as i64 / 2;
    let last = n as i64 - 1;
    (0..n)
        .map(|i| {
            let (mut sx, mut sy, mut sw) = (0.0f64, 0.0f64, 0.0f64);
            for j in -half..=half {
                let p = line[(i as i64 + j).clamp(0, last) as usize];
                let w = (half + 1 - j.abs()) as f64;
                sx += p.x as f64 * w;
                sy += p.y as f64 * w;
                sw += w;
            }
            Point::new((sx / sw).round() as i32, (sy / sw).round() as i32)
        })
        .collect()
}

/// Smallest spacing [`resample`] samples at. Rounded samples closer than
/// this only repeat the same pixel.
pub const MIN_RESAMPLE_SPACING: f32 = 0.1;

/// Arc-length resampling: one point every `spacing` units of travelled
/// length. The first and last input points are always kept and consecutive
/// duplicates are dropped. `spacing <= 0` returns the input unchanged;
/// positive spacings below [`MIN_RESAMPLE_SPACING`] are raised to it.
pub fn resample(line: &[Point], spacing: f32) -> BoundaryLine {
    if spacing.is_nan() || spacing <= 0.0 || line.len() < 2 {
        return line.to_vec();
    }
    let spacing = spacing.max(MIN_RESAMPLE_SPACING) as f64;
    let lengths: Vec<f64> = line
        .windows(2)
        .map(|pair| {
            let dx = (pair[1].x - pair[0].x) as f64;
            let dy = (pair[1].y - pair[0].y) as f64;
            dx.hypot(dy)
        })
        .collect();
    let total: f64 = lengths.iter().sum();
    let samples = (total / spacing).floor() as usize;

    let mut out: BoundaryLine = vec![line[0]];
    // Segment holding the current sample and the arc length at its start.
    let mut seg = 0usize;
    let mut seg_start = 0.0f64;
    for k in 1..=samples {
        let s = k as f64 * spacing;
        while seg < lengths.len() && (lengths[seg] == 0.0 || seg_start + lengths[seg] < s) {
            seg_start += lengths[seg];
            seg += 1;
        }
        if seg == lengths.len() {
            break;
        }
        let (p0, p1) = (line[seg], line[seg + 1]);
        let t = (s - seg_start) / lengths[seg];
        let x = p0.x as f64 + (p1.x - p0.x) as f64 * t;
        let y = p0.y as f64 + (p1.y - p0.y) as f64 * t;
        push(&mut out, Point::new(x.round() as i32, y.round() as i32));
    }
    if let Some(&tail) = line.last() {
        push(&mut out, tail);
    }
    out
}

#[inline]
fn push(out: &mut BoundaryLine, p: Point) {
    if out.last() != Some(&p) {
        out.push(p);
    }
}

/// Drop points within `margin` of any frame edge.
pub fn filter_bounds(line: &[Point], width: usize, height: usize, margin: i32) -> BoundaryLine {
    let (w, h) = (width as i32, height as i32);
    line.iter()
        .copied()
        .filter(|p| p.x >= margin && p.y >= margin && p.x < w - margin && p.y < h - margin)
        .collect()
}

/// Reflect horizontally inside a frame of `width` columns.
pub fn mirror(line: &[Point], width: usize) -> BoundaryLine {
    let last = width as i32 - 1;
    line.iter().map(|p| Point::new(last - p.x, p.y)).collect()
}
