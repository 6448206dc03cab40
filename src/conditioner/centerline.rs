use crate::types::{BoundaryLine, Point, Side};

/// Offset a boundary along its unit normal to approximate the track center.
///
/// Tangents use centered differences (one-sided at the ends). A zero tangent
/// falls back to the previous non-zero one, then to straight up. Left
/// boundaries move to the right-hand side of their direction of travel and
/// right boundaries to the left-hand side.
pub fn shift_centerline(line: &[Point], offset: f32, side: Side) -> BoundaryLine {
    let n = line.len();
    if n == 0 {
        return BoundaryLine::new();
    }
    let mut prev = (0.0f32, -1.0f32);
    let mut out = BoundaryLine::with_capacity(n);
    for i in 0..n {
        let a = line[i.saturating_sub(1)];
        let b = line[(i + 1).min(n - 1)];
        let (dx, dy) = ((b.x - a.x) as f32, (b.y - a.y) as f32);
        let len = dx.hypot(dy);
        let (tx, ty) = if len > 0.0 { (dx / len, dy / len) } else { prev };
        prev = (tx, ty);

        let (nx, ny) = match side {
            Side::Left => (-ty, tx),
            Side::Right => (ty, -tx),
        };
        let p = line[i];
        out.push(Point::from_f32([
            p.x as f32 + nx * offset,
            p.y as f32 + ny * offset,
        ]));
    }
    out
}
