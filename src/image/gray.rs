//! Owned single-channel 8-bit image in row-major layout (stride == width).
//!
//! Produced by the perspective warp and by the image loaders; borrow it as an
//! [`ImageU8`] to feed the tracer.
use super::ImageU8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Bytes between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct a zero-initialized (black) buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0)
    }

    /// Construct a buffer of size `w × h` with every pixel set to `value`.
    pub fn filled(w: usize, h: usize, value: u8) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Wrap raw row-major bytes. Returns `None` when the length does not match.
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Fill the half-open rectangle `[x0, x1) × [y0, y1)`, clipped to the image.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, v: u8) {
        for y in y0.min(self.h)..y1.min(self.h) {
            let start = self.idx(x0.min(self.w), y);
            let end = self.idx(x1.min(self.w), y);
            if start < end {
                self.data[start..end].fill(v);
            }
        }
    }

    /// Borrow as a read-only `ImageU8` view.
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.w,
            h: self.h,
            stride: self.stride,
            data: &self.data,
        }
    }
}

impl crate::image::traits::ImageView for GrayImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    #[test]
    fn fill_rect_clips_to_image() {
        let mut img = GrayImageU8::filled(4, 3, 9);
        img.fill_rect(2, 1, 10, 10, 1);
        assert_eq!(img.row(0), &[9, 9, 9, 9]);
        assert_eq!(img.row(1), &[9, 9, 1, 1]);
        assert_eq!(img.row(2), &[9, 9, 1, 1]);
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(GrayImageU8::from_raw(3, 3, vec![0; 8]).is_none());
        let img = GrayImageU8::from_raw(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(img.as_view().get(1, 1), 4);
    }
}
