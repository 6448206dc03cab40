use crate::error::VisionError;

/// Borrowed single-channel 8-bit sample grid.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed view over `data` (`stride == w`).
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h
    }

    /// Reject empty grids and buffers that cannot hold `h` rows of `stride`
    /// single-byte pixels.
    pub fn validate(&self) -> Result<(), VisionError> {
        if self.w == 0 || self.h == 0 {
            return Err(VisionError::invalid(format!(
                "empty sample grid ({}x{})",
                self.w, self.h
            )));
        }
        if self.stride < self.w {
            return Err(VisionError::invalid(format!(
                "stride {} shorter than width {}",
                self.stride, self.w
            )));
        }
        let needed = self.stride * (self.h - 1) + self.w;
        if self.data.len() < needed {
            return Err(VisionError::invalid(format!(
                "grid buffer holds {} bytes, single-channel {}x{} (stride {}) needs {}",
                self.data.len(),
                self.w,
                self.h,
                self.stride,
                needed
            )));
        }
        Ok(())
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
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

    #[test]
    fn validate_rejects_short_or_empty_buffers() {
        let data = vec![0u8; 12];
        assert!(ImageU8::new(4, 3, &data).validate().is_ok());
        assert!(ImageU8::new(0, 3, &data).validate().is_err());
        assert!(ImageU8::new(4, 4, &data).validate().is_err());
        let view = ImageU8 {
            w: 4,
            h: 3,
            stride: 2,
            data: &data,
        };
        assert!(view.validate().is_err());
    }
}
