//! Layout fusion: confident OCR first, geometry second.
use super::layout::{GeometricLayout, OcrLayout};
use super::{ClassifierThresholds, Layout, LayoutMethod};
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDecision {
    pub layout: Layout,
    pub confidence: f32,
    pub method: LayoutMethod,
    /// Human-readable verdict, e.g. `AZERTY [OCR:72%]` or `QWERTY/QWERTZ [Geo]`.
    pub label: String,
}

impl LayoutDecision {
    fn unknown() -> Self {
        Self {
            label: Layout::Unknown.to_string(),
            ..Default::default()
        }
    }
}

pub fn fuse_layout(
    ocr: Option<&OcrLayout>,
    geo: Option<&GeometricLayout>,
    th: &ClassifierThresholds,
) -> LayoutDecision {
    if let Some(reading) = ocr {
        if reading.layout != Layout::Unknown && reading.confidence >= th.ocr_min_confidence {
            return LayoutDecision {
                layout: reading.layout,
                confidence: reading.confidence,
                method: LayoutMethod::Ocr,
                label: format!("{} [OCR:{:.0}%]", reading.layout, reading.confidence),
            };
        }
    }
    match geo {
        Some(g) => {
            let name = match g.layout {
                Layout::Azerty => "AZERTY".to_string(),
                _ => "QWERTY/QWERTZ".to_string(),
            };
            LayoutDecision {
                layout: g.layout,
                confidence: th.geo_confidence,
                method: LayoutMethod::Geometric,
                label: format!("{name} [Geo]"),
            }
        }
        None => LayoutDecision::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::layout::LayoutScores;

    fn ocr(layout: Layout, confidence: f32) -> OcrLayout {
        OcrLayout {
            layout,
            confidence,
            best_score: confidence,
            scores: LayoutScores::default(),
            ambiguous: false,
        }
    }

    fn geo(layout: Layout) -> GeometricLayout {
        GeometricLayout {
            layout,
            center_row_norm: 0.5,
            extent: 0.5,
        }
    }

    #[test]
    fn confident_ocr_wins() {
        let th = ClassifierThresholds::default();
        let d = fuse_layout(Some(&ocr(Layout::Qwertz, 72.4)), Some(&geo(Layout::Azerty)), &th);
        assert_eq!(d.layout, Layout::Qwertz);
        assert_eq!(d.method, LayoutMethod::Ocr);
        assert_eq!(d.label, "QWERTZ [OCR:72%]");
    }

    #[test]
    fn weak_ocr_falls_back_to_geometry() {
        let th = ClassifierThresholds::default();
        let d = fuse_layout(Some(&ocr(Layout::Qwerty, 20.0)), Some(&geo(Layout::Azerty)), &th);
        assert_eq!((d.layout, d.confidence), (Layout::Azerty, 50.0));
        assert_eq!(d.label, "AZERTY [Geo]");

        let d = fuse_layout(None, Some(&geo(Layout::Qwerty)), &th);
        assert_eq!(d.layout, Layout::Qwerty);
        assert_eq!(d.label, "QWERTY/QWERTZ [Geo]");
    }

    #[test]
    fn nothing_known_is_unknown() {
        let th = ClassifierThresholds::default();
        let d = fuse_layout(Some(&ocr(Layout::Unknown, 0.0)), None, &th);
        assert_eq!(d.layout, Layout::Unknown);
        assert_eq!(d.confidence, 0.0);
        assert_eq!(d.method, LayoutMethod::None);
        assert_eq!(d.label, "UNKNOWN");
    }
}
