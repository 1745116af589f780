//! Runs every classifier and assembles the final verdict.
use super::format::{classify_format, FormatDecision};
use super::fusion::fuse_layout;
use super::layout::{geometric_layout, ocr_layout};
use super::os::{classify_os, OsDecision};
use super::{ClassifierThresholds, HostOs, KeyboardFormat, Layout, LayoutMethod};
use crate::diagnostics::ClassificationStage;
use crate::image::{crop_gray, ImageU8};
use crate::ocr::OcrOutcome;
use crate::zoning::AnchorMap;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// OCR outcomes for the anchors that are read.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorReadings {
    /// TOP_LEFT_LETTER read as a single character.
    pub top_left_letter: OcrOutcome,
    /// Letter row starting at TOP_LEFT_LETTER, read as a short word.
    pub row_strip: OcrOutcome,
    /// OS_KEY read as a short word.
    pub os_key: OcrOutcome,
}

impl AnchorReadings {
    /// Reading used for layout scoring: the row strip, else the single letter.
    pub fn layout_reading(&self) -> &OcrOutcome {
        if self.row_strip.is_empty() {
            &self.top_left_letter
        } else {
            &self.row_strip
        }
    }
}

/// Final per-image verdict. Contains no timings, so equal inputs serialize
/// identically.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationVerdict {
    pub format: KeyboardFormat,
    pub format_confidence: f32,
    pub os: HostOs,
    pub os_confidence: f32,
    pub layout: Layout,
    pub layout_confidence: f32,
    pub layout_method: LayoutMethod,
    pub layout_label: String,
    /// Mean of the three field confidences.
    pub confidence: f32,
    /// Key sequence the layout was scored on.
    pub ocr_text: String,
    pub debug: BTreeMap<String, f32>,
}

impl ClassificationVerdict {
    /// Verdict with every field unknown.
    pub fn unknown() -> Self {
        Self {
            layout_label: Layout::Unknown.to_string(),
            ..Default::default()
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.format == KeyboardFormat::Unknown
            && self.os == HostOs::Unknown
            && self.layout == Layout::Unknown
    }
}

#[derive(Clone, Debug)]
pub struct Classifier {
    thresholds: ClassifierThresholds,
    key_sequence_len: usize,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierThresholds::default())
    }
}

impl Classifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self {
            thresholds,
            key_sequence_len: 10,
        }
    }

    pub fn with_key_sequence_len(mut self, len: usize) -> Self {
        self.key_sequence_len = len;
        self
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    pub fn classify(
        &self,
        anchors: &AnchorMap<'_>,
        gray: &ImageU8<'_>,
        readings: &AnchorReadings,
    ) -> ClassificationVerdict {
        self.classify_with_stage(anchors, gray, readings).0
    }

    /// Classify and also return the evidence behind every field.
    pub fn classify_with_stage(
        &self,
        anchors: &AnchorMap<'_>,
        gray: &ImageU8<'_>,
        readings: &AnchorReadings,
    ) -> (ClassificationVerdict, ClassificationStage) {
        let th = &self.thresholds;

        let format = classify_format(anchors.shift(), anchors.enter_key(), th);

        let os_crop = anchors.os_key().map(|r| crop_gray(gray, &r.bbox));
        let os_reading = (!readings.os_key.is_empty()).then_some(&readings.os_key);
        let os = classify_os(os_crop.as_ref(), os_reading, th);

        let reading = readings.layout_reading();
        let key_sequence = reading.key_sequence(self.key_sequence_len);
        let ocr = (!key_sequence.is_empty())
            .then(|| ocr_layout(&key_sequence, reading.confidence, th));
        let geo = anchors.top_left_letter().map(|tl| geometric_layout(tl, th));
        let layout = fuse_layout(ocr.as_ref(), geo.as_ref(), th);

        let mut debug = BTreeMap::new();
        debug.insert("hRef".to_string(), anchors.h_ref);
        debug.insert("anchorsFound".to_string(), anchors.critical_found() as f32);
        record_format(&mut debug, &format);
        record_os(&mut debug, &os);
        if let Some(g) = &geo {
            debug.insert("tlCenterRowNorm".to_string(), g.center_row_norm);
            debug.insert("tlExtent".to_string(), g.extent);
        }
        if let Some(o) = &ocr {
            debug.insert("ocrVoteConfidence".to_string(), reading.confidence);
            debug.insert("ocrScoreAzerty".to_string(), o.scores.azerty);
            debug.insert("ocrScoreQwerty".to_string(), o.scores.qwerty);
            debug.insert("ocrScoreQwertz".to_string(), o.scores.qwertz);
            debug.insert("ocrLayoutConfidence".to_string(), o.confidence);
        }

        let stage = ClassificationStage {
            format,
            os,
            ocr_layout: ocr,
            geometric_layout: geo,
            layout,
        };
        let verdict = assemble(&stage, key_sequence, debug);
        debug!(
            "Classifier::classify format={} os={} layout={} confidence={:.1}",
            verdict.format, verdict.os, verdict.layout_label, verdict.confidence
        );
        (verdict, stage)
    }
}

fn record_format(debug: &mut BTreeMap<String, f32>, format: &FormatDecision) {
    if let Some(ratio) = format.shift_ratio {
        debug.insert("shiftRatio".to_string(), ratio);
    }
    if let Some(ratio) = format.enter_ratio {
        debug.insert("enterRatio".to_string(), ratio);
    }
}

fn record_os(debug: &mut BTreeMap<String, f32>, os: &OsDecision) {
    if let Some(euler) = os.euler {
        debug.insert("osEuler".to_string(), euler as f32);
    }
}

fn assemble(
    stage: &ClassificationStage,
    ocr_text: String,
    debug: BTreeMap<String, f32>,
) -> ClassificationVerdict {
    let (format, os, layout) = (&stage.format, &stage.os, &stage.layout);
    let confidence = (format.confidence + os.confidence + layout.confidence) / 3.0;
    ClassificationVerdict {
        format: format.format,
        format_confidence: format.confidence,
        os: os.os,
        os_confidence: os.confidence,
        layout: layout.layout,
        layout_confidence: layout.confidence,
        layout_method: layout.method,
        layout_label: layout.label.clone(),
        confidence,
        ocr_text,
        debug,
    }
}
