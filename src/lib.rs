#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod binarize;
pub mod candidates;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod image;
pub mod ocr;
pub mod pipeline;
pub mod types;
pub mod zoning;

// Numeric helpers shared by the stages.
pub mod geometry;

// --- High-level re-exports -------------------------------------------------

// Main entry points: analyzer + results.
pub use crate::classify::ClassificationVerdict;
pub use crate::pipeline::{analyze_batch, AnalyzerParams, BatchSummary, KeyboardAnalyzer};

// High-level diagnostics returned by the analyzer.
pub use crate::diagnostics::{AnalysisReport, PipelineTrace};

// Collaborator seams.
pub use crate::binarize::Binarizer;
pub use crate::ocr::TextRecognizer;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use keyboard_detector::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let analyzer = KeyboardAnalyzer::new(AnalyzerParams::default());
/// let report = analyzer.analyze_image(&img, &OtsuBinarizer::default(), &NullRecognizer);
/// println!("{} / {} / {}", report.verdict.format, report.verdict.os, report.verdict.layout_label);
/// # }
/// ```
pub mod prelude {
    pub use crate::binarize::{AdaptiveMeanBinarizer, OtsuBinarizer};
    pub use crate::image::{BinaryMask, ImageU8};
    pub use crate::ocr::NullRecognizer;
    pub use crate::{AnalyzerParams, ClassificationVerdict, KeyboardAnalyzer};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners.
    pub use crate::candidates::{BoxDetector, CandidateDetector, ComponentDetector, DetectorPreset};
    pub use crate::classify::Classifier;
    pub use crate::ocr::VotingEngine;
    pub use crate::zoning::ZoneLocator;

    // Stage artifacts.
    pub use crate::candidates::CandidateSet;
    pub use crate::classify::AnchorReadings;
    pub use crate::ocr::OcrOutcome;
    pub use crate::zoning::AnchorMap;

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        AnchorSummary, CandidateStage, ClassificationStage, InputDescriptor, OcrStage,
        StageTiming, TimingBreakdown, ZoningStage,
    };
}
