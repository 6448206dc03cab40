//! Region thresholding: brightness split points over rectangular windows.
//!
//! The tracer re-thresholds a small window around its cursor on every step,
//! so illumination gradients across the frame do not bias the boundary. The
//! split is computed by a [`RegionThresholder`]; [`OtsuThresholder`] is the
//! default and maximises the between-class variance of the window histogram.
use crate::image::{ImageU8, ImageView};
use serde::{Deserialize, Serialize};

/// Half-open pixel window `[x0, x1) × [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Rect {
    /// Square window of radius `half` around `(cx, cy)`, clipped to `w × h`.
    pub fn centered(cx: i32, cy: i32, half: i32, w: usize, h: usize) -> Rect {
        Self::clipped(cx - half, cy - half, cx + half + 1, cy + half + 1, w, h)
    }

    /// Full-width band of rows `[cy - half, cy + half]`, clipped to `w × h`.
    pub fn band(cy: i32, half: i32, w: usize, h: usize) -> Rect {
        Self::clipped(0, cy - half, w as i32, cy + half + 1, w, h)
    }

    fn clipped(x0: i32, y0: i32, x1: i32, y1: i32, w: usize, h: usize) -> Rect {
        let clamp = |v: i32, hi: usize| v.clamp(0, hi as i32) as usize;
        Rect {
            x0: clamp(x0, w),
            y0: clamp(y0, h),
            x1: clamp(x1, w),
            y1: clamp(y1, h),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    #[inline]
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.x1 - self.x0) * (self.y1 - self.y0)
        }
    }
}

/// Which side of the split point counts as track surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Track pixels are brighter than the split point (white track, dark surroundings).
    #[default]
    BrightTrack,
    /// Track pixels are at or below the split point.
    DarkTrack,
}

impl Polarity {
    /// Classify one intensity against a split point.
    #[inline]
    pub fn is_track(self, value: u8, threshold: u8) -> bool {
        let bright = value > threshold;
        match self {
            Polarity::BrightTrack => bright,
            Polarity::DarkTrack => !bright,
        }
    }
}

/// Supplies the brightness split point of a window.
///
/// Returns `None` when the window has no split (empty or a single intensity
/// level); callers keep their previous split in that case.
pub trait RegionThresholder {
    fn threshold(&self, grid: &ImageU8<'_>, rect: Rect) -> Option<u8>;
}

/// Otsu's method over a 256-bin histogram.
#[derive(Clone, Copy, Debug, Default)]
pub struct OtsuThresholder;

impl RegionThresholder for OtsuThresholder {
    fn threshold(&self, grid: &ImageU8<'_>, rect: Rect) -> Option<u8> {
        if rect.is_empty() {
            return None;
        }
        let mut hist = [0u32; 256];
        for y in rect.y0..rect.y1 {
            for &v in &grid.row(y)[rect.x0..rect.x1] {
                hist[v as usize] += 1;
            }
        }
        otsu_from_histogram(&hist, rect.area() as u64)
    }
}

/// Otsu split point of a histogram; the first level reaching the maximum
/// between-class variance wins.
pub fn otsu_from_histogram(hist: &[u32; 256], total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let sum: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut sum_b = 0.0f64;
    let mut w_b = 0u64;
    let mut best_var = 0.0f64;
    let mut best: Option<u8> = None;
    for (t, &count) in hist.iter().enumerate() {
        w_b += count as u64;
        if w_b == 0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f == 0 {
            break;
        }
        sum_b += t as f64 * count as f64;
        let m_b = sum_b / w_b as f64;
        let m_f = (sum - sum_b) / w_f as f64;
        let var = w_b as f64 * w_f as f64 * (m_b - m_f) * (m_b - m_f);
        if var > best_var {
            best_var = var;
            best = Some(t as u8);
        }
    }
    best
}
