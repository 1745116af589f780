//! Unified diagnostics data model exposed by the analyzer and the binaries.
//!
//! `AnalysisReport` is the main entry point returned by
//! [`KeyboardAnalyzer`](crate::KeyboardAnalyzer), bundling the
//! [`ClassificationVerdict`](crate::ClassificationVerdict) and a
//! `PipelineTrace` describing every stage the pipeline executed. Everything
//! serializes as camelCase JSON.

pub mod candidates;
pub mod classification;
pub mod ocr;
pub mod pipeline;
pub mod timing;
pub mod zoning;

pub use candidates::CandidateStage;
pub use classification::ClassificationStage;
pub use ocr::OcrStage;
pub use pipeline::{AnalysisReport, InputDescriptor, PipelineTrace};
pub use timing::{StageTiming, TimingBreakdown};
pub use zoning::{AnchorSummary, ZoningStage};
