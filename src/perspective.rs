//! Image-to-ground perspective correction.
//!
//! A [`PerspectiveMap`] holds one 3x3 homography `H` (and its inverse) that
//! sends four calibrated image points (top-left, top-right, bottom-right,
//! bottom-left) onto the corners of a `width x height` ground-plane frame.
//! `H` is solved once with the classic 8-unknown DLT (`h33 = 1`) and stays
//! immutable afterwards, so one map can be shared by reference.
use crate::error::VisionError;
use crate::image::{GrayImageU8, ImageU8};
use crate::types::{BoundaryLine, Point};
use log::debug;
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};
use serde::{Deserialize, Serialize};

const EPS: f64 = 1e-9;

/// Four image points and the ground frame they map onto.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParams {
    /// Image points ordered top-left, top-right, bottom-right, bottom-left.
    pub image_points: [[f64; 2]; 4],
    pub ground_width: usize,
    pub ground_height: usize,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            image_points: [[271.0, 317.0], [372.0, 317.0], [393.0, 387.0], [252.0, 387.0]],
            ground_width: 300,
            ground_height: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveMap {
    h: Matrix3<f64>,
    h_inv: Matrix3<f64>,
    width: usize,
    height: usize,
}

impl PerspectiveMap {
    /// Solve the homography sending `src` onto the corners
    /// `(0,0), (w-1,0), (w-1,h-1), (0,h-1)`.
    pub fn from_correspondences(
        src: [[f64; 2]; 4],
        width: usize,
        height: usize,
    ) -> Result<Self, VisionError> {
        if width < 2 || height < 2 {
            return Err(VisionError::calibration(format!(
                "ground frame {width}x{height} is too small"
            )));
        }
        if src.iter().flatten().any(|v| !v.is_finite()) {
            return Err(VisionError::calibration("non-finite calibration point"));
        }
        for i in 0..4 {
            let [a, b, c] = [src[i], src[(i + 1) % 4], src[(i + 2) % 4]];
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            if cross.abs() < EPS {
                return Err(VisionError::calibration(format!(
                    "calibration points {}, {}, {} are collinear or repeated",
                    i,
                    (i + 1) % 4,
                    (i + 2) % 4
                )));
            }
        }

        let (wm, hm) = ((width - 1) as f64, (height - 1) as f64);
        let dst = [[0.0, 0.0], [wm, 0.0], [wm, hm], [0.0, hm]];

        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for i in 0..4 {
            let (x, y) = (src[i][0], src[i][1]);
            let (u, v) = (dst[i][0], dst[i][1]);
            let r = 2 * i;
            // u = (h11 x + h12 y + h13) / (h31 x + h32 y + 1)
            a[(r, 0)] = x;
            a[(r, 1)] = y;
            a[(r, 2)] = 1.0;
            a[(r, 6)] = -u * x;
            a[(r, 7)] = -u * y;
            b[r] = u;
            // v = (h21 x + h22 y + h23) / (h31 x + h32 y + 1)
            a[(r + 1, 3)] = x;
            a[(r + 1, 4)] = y;
            a[(r + 1, 5)] = 1.0;
            a[(r + 1, 6)] = -v * x;
            a[(r + 1, 7)] = -v * y;
            b[r + 1] = v;
        }
        let sol = a
            .lu()
            .solve(&b)
            .ok_or_else(|| VisionError::calibration("singular perspective system"))?;
        if sol.iter().any(|v| !v.is_finite()) {
            return Err(VisionError::calibration("non-finite perspective solution"));
        }
        let h = Matrix3::new(
            sol[0], sol[1], sol[2], sol[3], sol[4], sol[5], sol[6], sol[7], 1.0,
        );
        let h_inv = h
            .try_inverse()
            .ok_or_else(|| VisionError::calibration("perspective matrix is not invertible"))?;
        debug!("perspective H = {:?}", h.as_slice());
        Ok(Self {
            h,
            h_inv,
            width,
            height,
        })
    }

    /// Build from [`CalibrationParams`].
    pub fn from_calibration(params: &CalibrationParams) -> Result<Self, VisionError> {
        Self::from_correspondences(
            params.image_points,
            params.ground_width,
            params.ground_height,
        )
    }

    /// Pass-through map for uncalibrated cameras.
    pub fn identity(width: usize, height: usize) -> Self {
        Self {
            h: Matrix3::identity(),
            h_inv: Matrix3::identity(),
            width,
            height,
        }
    }

    /// Ground-plane frame size `(width, height)`.
    pub fn output_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Map one image point; `None` when the projective scale vanishes.
    pub fn map_point(&self, p: Point) -> Option<[f64; 2]> {
        project(&self.h, p.x as f64, p.y as f64)
    }

    /// Map a boundary into the ground frame.
    ///
    /// The drift of the frame center (`w / 2, h / 2`, with `w >= h`) is
    /// subtracted so the vehicle stays at the same column in both frames.
    /// Unmappable points are dropped.
    pub fn map_line(&self, line: &[Point], frame: (usize, usize)) -> BoundaryLine {
        let (mut w, mut h) = frame;
        if h > w {
            std::mem::swap(&mut w, &mut h);
        }
        let (cx, cy) = ((w / 2) as i32, (h / 2) as i32);
        let (dx, dy) = match self.map_point(Point::new(cx, cy)) {
            Some(c) => (c[0].round() as i32 - cx, c[1].round() as i32 - cy),
            None => (0, 0),
        };
        line.iter()
            .filter_map(|&p| self.map_point(p))
            .map(|m| Point::new(m[0].round() as i32 - dx, m[1].round() as i32 - dy))
            .collect()
    }

    /// Inverse-warp a grid into the ground frame with nearest-neighbour
    /// sampling; samples falling outside the source read as 0.
    pub fn map_image(&self, img: &ImageU8<'_>) -> GrayImageU8 {
        let mut out = GrayImageU8::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let Some([sx, sy]) = project(&self.h_inv, x as f64, y as f64) else {
                    continue;
                };
                let (sx, sy) = (sx.round(), sy.round());
                if sx < 0.0 || sy < 0.0 || sx >= img.w as f64 || sy >= img.h as f64 {
                    continue;
                }
                out.set(x, y, img.get(sx as usize, sy as usize));
            }
        }
        out
    }
}

fn project(h: &Matrix3<f64>, x: f64, y: f64) -> Option<[f64; 2]> {
    let v = h * Vector3::new(x, y, 1.0);
    if !v[2].is_finite() || v[2].abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some([v[0] / v[2], v[1] / v[2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_calibration_hits_the_ground_corners() {
        let cal = CalibrationParams::default();
        let map = PerspectiveMap::from_calibration(&cal).unwrap();
        let corners = [[0.0, 0.0], [299.0, 0.0], [299.0, 299.0], [0.0, 299.0]];
        for (src, dst) in cal.image_points.iter().zip(corners.iter()) {
            let p = map
                .map_point(Point::new(src[0] as i32, src[1] as i32))
                .unwrap();
            assert!((p[0] - dst[0]).abs() < 1e-6 && (p[1] - dst[1]).abs() < 1e-6);
        }
        assert_eq!(map.output_size(), (300, 300));
    }

    #[test]
    fn degenerate_correspondences_fail() {
        let collinear = [[0.0, 0.0], [10.0, 0.0], [20.0, 0.0], [0.0, 10.0]];
        assert!(matches!(
            PerspectiveMap::from_correspondences(collinear, 100, 100),
            Err(VisionError::Calibration(_))
        ));
        let repeated = [[0.0, 0.0], [0.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        assert!(PerspectiveMap::from_correspondences(repeated, 100, 100).is_err());
        let nan = [[f64::NAN, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        assert!(PerspectiveMap::from_correspondences(nan, 100, 100).is_err());
        let square = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        assert!(PerspectiveMap::from_correspondences(square, 1, 100).is_err());
    }

    #[test]
    fn identity_leaves_lines_alone() {
        let map = PerspectiveMap::identity(80, 60);
        let line = vec![Point::new(30, 49), Point::new(30, 48), Point::new(31, 47)];
        assert_eq!(map.map_line(&line, (80, 60)), line);
        assert_eq!(map.map_line(&line, (60, 80)), line);
    }

    #[test]
    fn calibrated_lines_keep_the_frame_center_in_place() {
        let map = PerspectiveMap::from_calibration(&CalibrationParams::default()).unwrap();
        let center = Point::new(320, 240);
        let raw = map.map_point(center).unwrap();
        assert!((raw[0] - 320.0).abs() > 10.0 || (raw[1] - 240.0).abs() > 10.0);

        let inside = Point::new(322, 352);
        let line = vec![center, inside];
        let mapped = map.map_line(&line, (640, 480));
        assert_eq!(mapped[0], center);

        let drift = (raw[0].round() as i32 - 320, raw[1].round() as i32 - 240);
        let m = map.map_point(inside).unwrap();
        assert_eq!(
            mapped[1],
            Point::new(m[0].round() as i32 - drift.0, m[1].round() as i32 - drift.1)
        );
        // Portrait frames use the same landscape center.
        assert_eq!(map.map_line(&line, (480, 640)), mapped);
    }

    #[test]
    fn scaling_map_warps_the_image() {
        // Upscale a 10x10 grid by ~2 onto a 19x19 ground frame.
        let square = [[0.0, 0.0], [9.0, 0.0], [9.0, 9.0], [0.0, 9.0]];
        let map = PerspectiveMap::from_correspondences(square, 19, 19).unwrap();
        let p = map.map_point(Point::new(4, 6)).unwrap();
        assert!((p[0] - 8.0).abs() < 1e-9 && (p[1] - 12.0).abs() < 1e-9);

        let data: Vec<u8> = (0..100).map(|i| if i % 10 < 5 { 10 } else { 250 }).collect();
        let grid = ImageU8::new(10, 10, &data);
        let warped = map.map_image(&grid);
        assert_eq!((warped.w, warped.h), (19, 19));
        assert_eq!(warped.get(0, 0), 10);
        assert_eq!(warped.get(18, 18), 250);
        assert_eq!(warped.get(6, 9), 10);
        assert_eq!(warped.get(12, 9), 250);
    }
}
