//! Anchor crops as standalone patches for the recognizer and the OS topology.
//!
//! Boxes are clipped to the source; an empty intersection yields a 0×0 patch,
//! which every consumer treats as uninformative.
use super::ImageU8;
use crate::types::BBox;
use image::GrayImage;

/// Copy the pixels under `bbox` into an owned grayscale patch.
pub fn crop_gray(image: &ImageU8<'_>, bbox: &BBox) -> GrayImage {
    image.window(bbox).to_gray_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_gray_copies_window() {
        let data: Vec<u8> = (0..20).collect();
        let img = ImageU8::packed(5, 4, &data);
        let patch = crop_gray(&img, &BBox::new(1, 2, 3, 4));
        assert_eq!(patch.dimensions(), (2, 2));
        assert_eq!(patch.into_raw(), vec![7, 8, 12, 13]);
    }

    #[test]
    fn crop_outside_bounds_is_empty() {
        let data = vec![0u8; 16];
        let img = ImageU8::packed(4, 4, &data);
        let patch = crop_gray(&img, &BBox::new(10, 10, 20, 20));
        assert_eq!(patch.dimensions(), (0, 0));
    }
}
