//! Tesseract-backed recognizer (system `tesseract` binary via `rusty-tesseract`).
use super::{RecognizerConfig, TextRecognizer, TextShape};
use image::{imageops::FilterType, DynamicImage, GrayImage};
use rusty_tesseract::{Args, Image};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct TesseractRecognizer {
    pub lang: String,
    pub oem: i32,
    pub dpi: i32,
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self {
            lang: "eng".to_string(),
            oem: 3,
            dpi: 300,
        }
    }
}

impl TesseractRecognizer {
    fn args(&self, config: &RecognizerConfig) -> Args {
        let psm = match config.shape {
            TextShape::IsolatedCharacter => 10,
            TextShape::ShortWord => 8,
        };
        let mut config_variables = HashMap::new();
        config_variables.insert(
            "tessedit_char_whitelist".to_string(),
            config.charset.whitelist().to_string(),
        );
        Args {
            lang: self.lang.clone(),
            config_variables,
            dpi: Some(self.dpi),
            psm: Some(psm),
            oem: Some(self.oem),
        }
    }
}

/// Keycap legends are small; Tesseract wants glyphs at least ~10 px tall.
fn upscale_small(patch: &GrayImage) -> DynamicImage {
    let img = DynamicImage::ImageLuma8(patch.clone());
    let min_dim = patch.width().min(patch.height());
    let factor = if min_dim < 100 {
        4
    } else if min_dim < 200 {
        2
    } else {
        1
    };
    if factor == 1 {
        img
    } else {
        img.resize(
            patch.width() * factor,
            patch.height() * factor,
            FilterType::Lanczos3,
        )
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, patch: &GrayImage, config: &RecognizerConfig) -> String {
        if patch.width() == 0 || patch.height() == 0 {
            return String::new();
        }
        let processed = upscale_small(patch);
        let image = match Image::from_dynamic_image(&processed) {
            Ok(img) => img,
            Err(e) => {
                log::warn!("TesseractRecognizer: failed to create image: {e}");
                return String::new();
            }
        };
        match rusty_tesseract::image_to_string(&image, &self.args(config)) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("TesseractRecognizer: recognition failed: {e}");
                String::new()
            }
        }
    }
}
