/// Row-major 2D pixel buffer readable one row at a time.
///
/// Implemented by the borrowed grayscale view and the owned key mask, so
/// cropping and thresholding code can walk either without caring about the
/// backing stride.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// The `width()` pixels of row `y`.
    fn row(&self, y: usize) -> &[Self::Pixel];

    fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Rows from top to bottom.
    fn rows(&self) -> impl Iterator<Item = &[Self::Pixel]> + '_
    where
        Self: Sized,
    {
        (0..self.height()).map(move |y| self.row(y))
    }

    /// Every pixel in raster order.
    fn pixels(&self) -> impl Iterator<Item = Self::Pixel> + '_
    where
        Self: Sized,
    {
        self.rows().flat_map(|r| r.iter().copied())
    }
}
