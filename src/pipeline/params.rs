use crate::candidates::{DetectorKind, DetectorOptions, DetectorPreset};
use crate::classify::ClassifierThresholds;
use crate::ocr::OcrOptions;
use crate::zoning::ZoningOptions;
use serde::{Deserialize, Serialize};

/// Options of every stage, as one serde-friendly bundle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerParams {
    /// Shape model of the candidate detector.
    pub detector_kind: DetectorKind,
    pub detector: DetectorOptions,
    pub zoning: ZoningOptions,
    pub ocr: OcrOptions,
    pub classifier: ClassifierThresholds,
}

impl AnalyzerParams {
    /// Replace the detector kind and options with a named preset.
    pub fn with_preset(mut self, preset: DetectorPreset) -> Self {
        self.detector_kind = preset.kind();
        self.detector = preset.options();
        self
    }

    pub fn with_detector(mut self, kind: DetectorKind, options: DetectorOptions) -> Self {
        self.detector_kind = kind;
        self.detector = options;
        self
    }

    pub fn with_zoning(mut self, zoning: ZoningOptions) -> Self {
        self.zoning = zoning;
        self
    }

    pub fn with_ocr(mut self, ocr: OcrOptions) -> Self {
        self.ocr = ocr;
        self
    }

    pub fn with_classifier(mut self, classifier: ClassifierThresholds) -> Self {
        self.classifier = classifier;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let json = r#"{
            "detector_kind": "box",
            "zoning": { "min_candidates": 5 },
            "classifier": { "ocr_min_confidence": 50.0 }
        }"#;
        let params: AnalyzerParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.detector_kind, DetectorKind::Box);
        assert_eq!(params.zoning.min_candidates, 5);
        assert_eq!(params.zoning.bottom_n, ZoningOptions::default().bottom_n);
        assert_eq!(params.classifier.ocr_min_confidence, 50.0);
        assert_eq!(params.ocr, OcrOptions::default());
    }

    #[test]
    fn preset_overrides_detector() {
        let params = AnalyzerParams::default().with_preset(DetectorPreset::Exploration);
        assert_eq!(params.detector_kind, DetectorKind::Box);
        assert_eq!(params.detector, DetectorOptions::exploration());
    }
}
