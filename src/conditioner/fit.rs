//! Line fits over boundary samples.
use crate::types::Point;
use serde::Serialize;

const DEGENERATE_EPS: f64 = 1e-6;

/// Least-squares line through a point set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LineFit {
    /// `y = slope * x + intercept`.
    Sloped { slope: f64, intercept: f64 },
    /// All samples share (nearly) one column.
    Vertical { x: f64 },
}

/// Ordinary least squares of `y` on `x`.
///
/// Returns [`LineFit::Vertical`] when the spread in `x` vanishes and
/// `Sloped { 0, 0 }` for an empty input.
pub fn fit_line(points: &[Point]) -> LineFit {
    if points.is_empty() {
        return LineFit::Sloped {
            slope: 0.0,
            intercept: 0.0,
        };
    }
    let n = points.len() as f64;
    let (mut sx, mut sy, mut sxx, mut sxy) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for p in points {
        let (x, y) = (p.x as f64, p.y as f64);
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
    }
    let (mx, my) = (sx / n, sy / n);
    let denom = sxx - n * mx * mx;
    if denom < DEGENERATE_EPS {
        return LineFit::Vertical { x: mx };
    }
    let slope = (sxy - n * mx * my) / denom;
    LineFit::Sloped {
        slope,
        intercept: my - slope * mx,
    }
}

/// Lateral drift per row travelled away from the vehicle.
///
/// Fits `x` against `y` and negates the slope because rows decrease going
/// forward: a boundary leaning right as it recedes yields a positive value.
/// Empty and single-row inputs yield 0.
pub fn forward_slope(line: &[Point]) -> f32 {
    if line.len() < 2 {
        return 0.0;
    }
    let n = line.len() as f64;
    let (mut sx, mut sy, mut syy, mut sxy) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for p in line {
        let (x, y) = (p.x as f64, p.y as f64);
        sx += x;
        sy += y;
        syy += y * y;
        sxy += x * y;
    }
    let (mx, my) = (sx / n, sy / n);
    let denom = syy - n * my * my;
    if denom < DEGENERATE_EPS {
        return 0.0;
    }
    (-(sxy - n * mx * my) / denom) as f32
}

/// Whether the mean perpendicular distance to the best-fit line stays below
/// `max_mean_distance`. Fewer than three points always count as straight.
///
/// The residual is measured against the total-least-squares line (principal
/// axis of the 2x2 covariance) so near-vertical boundaries are not penalised
/// by the `y`-on-`x` parameterisation.
pub fn is_straight(line: &[Point], max_mean_distance: f32) -> bool {
    if line.len() < 3 {
        return true;
    }
    let n = line.len() as f64;
    let (mx, my) = line.iter().fold((0.0f64, 0.0f64), |(ax, ay), p| {
        (ax + p.x as f64, ay + p.y as f64)
    });
    let (mx, my) = (mx / n, my / n);
    let (mut cxx, mut cxy, mut cyy) = (0.0f64, 0.0f64, 0.0f64);
    for p in line {
        let (dx, dy) = (p.x as f64 - mx, p.y as f64 - my);
        cxx += dx * dx;
        cxy += dx * dy;
        cyy += dy * dy;
    }
    let theta = 0.5 * (2.0 * cxy).atan2(cxx - cyy);
    let (nx, ny) = (-theta.sin(), theta.cos());
    let mean = line
        .iter()
        .map(|p| ((p.x as f64 - mx) * nx + (p.y as f64 - my) * ny).abs())
        .sum::<f64>()
        / n;
    mean < max_mean_distance as f64
}
