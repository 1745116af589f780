use super::traits::ImageView;
use crate::types::BBox;
use image::GrayImage;

/// Borrowed 8-bit grayscale view. Rows are `stride` bytes apart, so a view
/// can address a window of a larger buffer without copying.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// View over a tightly packed buffer.
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Sub-view under `bbox`, clipped to the image. Boxes fully outside give
    /// an empty view.
    pub fn window(&self, bbox: &BBox) -> ImageU8<'a> {
        let (r0, c0) = (bbox.min_row.min(self.h), bbox.min_col.min(self.w));
        let (r1, c1) = (bbox.max_row.min(self.h), bbox.max_col.min(self.w));
        let (w, h) = (c1 - c0, r1 - r0);
        if w == 0 || h == 0 {
            return ImageU8::packed(0, 0, &[]);
        }
        let start = r0 * self.stride + c0;
        let end = (r1 - 1) * self.stride + c1;
        ImageU8 {
            w,
            h,
            stride: self.stride,
            data: &self.data[start..end],
        }
    }

    /// Copy into an owned, packed `image` buffer.
    pub fn to_gray_image(&self) -> GrayImage {
        let data: Vec<u8> = self.pixels().collect();
        GrayImage::from_raw(self.w as u32, self.h as u32, data)
            .unwrap_or_else(|| GrayImage::new(0, 0))
    }
}

impl ImageView for ImageU8<'_> {
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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_parent_stride() {
        let data: Vec<u8> = (0..30).collect();
        let img = ImageU8::packed(6, 5, &data);
        let win = img.window(&BBox::new(1, 2, 3, 5));
        assert_eq!(win.dims(), (3, 2));
        assert_eq!(win.row(1), &[14, 15, 16]);
        let nested = win.window(&BBox::new(1, 1, 5, 5));
        assert_eq!(nested.pixels().collect::<Vec<_>>(), vec![15, 16]);
    }

    #[test]
    fn window_outside_is_empty() {
        let data = vec![0u8; 16];
        let img = ImageU8::packed(4, 4, &data);
        assert!(img.window(&BBox::new(4, 0, 9, 4)).is_empty());
        assert_eq!(img.window(&BBox::new(4, 0, 9, 4)).to_gray_image().dimensions(), (0, 0));
    }
}
