use super::params::AnalyzerParams;
use crate::binarize::Binarizer;
use crate::candidates::CandidateDetector;
use crate::classify::{AnchorReadings, Classifier};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    AnalysisReport, CandidateStage, InputDescriptor, OcrStage, PipelineTrace, StageTiming,
    TimingBreakdown, ZoningStage,
};
use crate::image::io::load_grayscale_image;
use crate::image::{crop_gray, BinaryMask, ImageU8};
use crate::ocr::{OcrOutcome, TextRecognizer, TextShape, VotingEngine};
use crate::types::{BBox, KeyRegion};
use crate::zoning::{row_strip_bbox, AnchorMap, ZoneLocator};
use log::debug;
use std::path::Path;
use std::time::Instant;

/// Runs candidate detection, zoning, OCR voting and classification on one
/// image.
///
/// The analyzer holds no per-image state; one instance can be shared across
/// threads.
pub struct KeyboardAnalyzer {
    params: AnalyzerParams,
    detector: Box<dyn CandidateDetector>,
    locator: ZoneLocator,
    classifier: Classifier,
}

impl Default for KeyboardAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerParams::default())
    }
}

impl KeyboardAnalyzer {
    pub fn new(params: AnalyzerParams) -> Self {
        let detector = params.detector_kind.build(params.detector.clone());
        let locator = ZoneLocator::new(params.zoning.clone());
        let classifier = Classifier::new(params.classifier.clone())
            .with_key_sequence_len(params.ocr.key_sequence_len);
        Self {
            params,
            detector,
            locator,
            classifier,
        }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    /// Analyze a grayscale image and its key mask (`true` = key pixel).
    pub fn analyze(
        &self,
        gray: &ImageU8<'_>,
        mask: &BinaryMask,
        recognizer: &dyn TextRecognizer,
    ) -> AnalysisReport {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let set = timings.time("candidates", || self.detector.detect(mask));
        let anchors = timings.time("zoning", || self.locator.locate(&set.regions));
        let strip = row_strip_bbox(&set.regions, &anchors, self.params.ocr.row_strip_keys);
        let ocr = timings.time("ocr", || self.read_anchors(gray, &anchors, strip, recognizer));
        let (verdict, classification) = timings.time("classification", || {
            self.classifier
                .classify_with_stage(&anchors, gray, &ocr.readings)
        });
        timings.total_ms = elapsed_ms(total_start);

        debug!(
            "KeyboardAnalyzer::analyze {} candidates, {}/4 anchors, layout={} in {:.1} ms",
            set.len(),
            anchors.critical_found(),
            verdict.layout_label,
            timings.total_ms
        );

        let trace = PipelineTrace {
            input: InputDescriptor {
                width: gray.w,
                height: gray.h,
                path: None,
            },
            timings,
            candidates: CandidateStage::from_set(self.params.detector_kind, &set),
            zoning: ZoningStage::from_anchors(&anchors, strip),
            ocr,
            classification,
        };
        AnalysisReport { verdict, trace }
    }

    /// Binarize `gray` first, then [`analyze`](Self::analyze).
    pub fn analyze_image(
        &self,
        gray: &ImageU8<'_>,
        binarizer: &dyn Binarizer,
        recognizer: &dyn TextRecognizer,
    ) -> AnalysisReport {
        let start = Instant::now();
        let mask = binarizer.binarize(gray);
        let binarize_ms = elapsed_ms(start);
        let mut report = self.analyze(gray, &mask, recognizer);
        let binarize = StageTiming {
            label: "binarize".to_string(),
            elapsed_ms: binarize_ms,
        };
        report.trace.timings.stages.insert(0, binarize);
        report.trace.timings.total_ms += binarize_ms;
        report
    }

    /// Load an image from disk and analyze it.
    pub fn analyze_path(
        &self,
        path: &Path,
        binarizer: &dyn Binarizer,
        recognizer: &dyn TextRecognizer,
    ) -> Result<AnalysisReport, String> {
        let gray = load_grayscale_image(path)?;
        let mut report = self.analyze_image(&gray.as_view(), binarizer, recognizer);
        report.trace.input.path = Some(path.display().to_string());
        Ok(report)
    }

    fn read_anchors(
        &self,
        gray: &ImageU8<'_>,
        anchors: &AnchorMap<'_>,
        strip: Option<BBox>,
        recognizer: &dyn TextRecognizer,
    ) -> OcrStage {
        let engine = VotingEngine::new(recognizer, &self.params.ocr);
        let pad = self.params.ocr.crop_padding;
        let read_box = |bbox: &BBox, shape: TextShape| -> OcrOutcome {
            let padded = bbox.padded(pad, gray.w, gray.h);
            engine.read(&crop_gray(gray, &padded), shape)
        };
        let read_key = |region: Option<&KeyRegion>, shape: TextShape| {
            region
                .map(|r| read_box(&r.bbox, shape))
                .unwrap_or_default()
        };

        let readings = AnchorReadings {
            top_left_letter: read_key(anchors.top_left_letter(), TextShape::IsolatedCharacter),
            row_strip: strip
                .map(|b| read_box(&b, TextShape::ShortWord))
                .unwrap_or_default(),
            os_key: read_key(anchors.os_key(), TextShape::ShortWord),
        };
        OcrStage {
            attempted: anchors.top_left_letter().is_some()
                || anchors.os_key().is_some()
                || strip.is_some(),
            readings,
        }
    }
}
