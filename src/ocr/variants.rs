//! Preprocessing variants fed to the recognizer.
use crate::binarize::otsu_threshold;
use image::GrayImage;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariantKind {
    /// Min/max contrast stretch.
    Normal,
    /// Otsu-binarized to pure black and white.
    HighContrast,
    /// Photometric negative.
    Inverted,
}

impl VariantKind {
    pub const ALL: [VariantKind; 3] = [
        VariantKind::Normal,
        VariantKind::HighContrast,
        VariantKind::Inverted,
    ];
}

/// Render `patch` through `kind`. Empty patches come back empty.
pub fn render_variant(patch: &GrayImage, kind: VariantKind) -> GrayImage {
    let mut out = patch.clone();
    if patch.width() == 0 || patch.height() == 0 {
        return out;
    }
    match kind {
        VariantKind::Normal => {
            let (lo, hi) = patch
                .as_raw()
                .iter()
                .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            if hi > lo {
                let span = (hi - lo) as f32;
                for p in out.pixels_mut() {
                    p.0[0] = (((p.0[0] - lo) as f32 / span) * 255.0).round() as u8;
                }
            }
        }
        VariantKind::HighContrast => {
            let t = otsu_threshold(patch.as_raw().iter().copied());
            for p in out.pixels_mut() {
                p.0[0] = if p.0[0] <= t { 0 } else { 255 };
            }
        }
        VariantKind::Inverted => {
            for p in out.pixels_mut() {
                p.0[0] = 255 - p.0[0];
            }
        }
    }
    out
}
