//! Owned binary mask in row-major layout (stride == width).
//!
//! `true` marks a candidate key pixel. Every detector stage relies only on
//! that convention, never on the filter chain that produced the mask.
use super::traits::ImageView;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    /// Mask width in pixels
    pub w: usize,
    /// Mask height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<bool>,
}

impl BinaryMask {
    /// Construct an all-false mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![false; w * h],
        }
    }

    /// Wrap an existing buffer; returns `None` when the length does not match.
    pub fn from_vec(w: usize, h: usize, data: Vec<bool>) -> Option<Self> {
        (data.len() == w * h).then_some(Self { w, h, data })
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Fill the half-open rectangle `[x0, x1) × [y0, y1)`, clipped to the mask.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, v: bool) {
        for y in y0.min(self.h)..y1.min(self.h) {
            for x in x0.min(self.w)..x1.min(self.w) {
                self.set(x, y, v);
            }
        }
    }

    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Total number of pixels (`w * h`).
    pub fn resolution(&self) -> usize {
        self.w * self.h
    }
}

impl ImageView for BinaryMask {
    type Pixel = bool;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[bool] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
