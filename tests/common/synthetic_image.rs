//! Synthetic grayscale frames for the integration tests.
#![allow(dead_code)]

pub const TRACK: u8 = 40;
pub const FLOOR: u8 = 200;

/// Dark vertical track `[x0, x1)` spanning the whole frame height.
pub fn straight_track(width: usize, height: usize, x0: usize, x1: usize) -> Vec<u8> {
    assert!(x0 < x1 && x1 <= width, "track columns must lie inside the frame");
    let mut img = vec![FLOOR; width * height];
    for row in img.chunks_mut(width) {
        row[x0..x1].fill(TRACK);
    }
    img
}

/// Straight track `[x0, x1)` crossed by a horizontal band `[bx0, bx1) x [by0, by1)`.
pub fn intersection(
    width: usize,
    height: usize,
    track: (usize, usize),
    band_x: (usize, usize),
    band_y: (usize, usize),
) -> Vec<u8> {
    let mut img = straight_track(width, height, track.0, track.1);
    for y in band_y.0..band_y.1 {
        img[y * width + band_x.0..y * width + band_x.1].fill(TRACK);
    }
    img
}

/// Track of half width `half_width` whose center starts at `x_bottom` on row
/// `y_ref` and drifts `lean` pixels per row travelled upward.
pub fn leaning_track(
    width: usize,
    height: usize,
    x_bottom: f64,
    y_ref: f64,
    lean: f64,
    half_width: f64,
) -> Vec<u8> {
    let mut img = vec![FLOOR; width * height];
    for y in 0..height {
        let center = x_bottom + (y_ref - y as f64) * lean;
        for x in 0..width {
            if (x as f64 - center).abs() < half_width {
                img[y * width + x] = TRACK;
            }
        }
    }
    img
}

/// Flip every row left to right.
pub fn mirrored(img: &[u8], width: usize) -> Vec<u8> {
    let mut out = img.to_vec();
    for row in out.chunks_mut(width) {
        row.reverse();
    }
    out
}
