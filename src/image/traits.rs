/// Row access shared by borrowed and owned grayscale buffers.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    /// Pixels of row `y`, exactly `width()` long.
    fn row(&self, y: usize) -> &[Self::Pixel];
}
