use crate::classify::ClassificationVerdict;
use crate::diagnostics::{
    CandidateStage, ClassificationStage, OcrStage, TimingBreakdown, ZoningStage,
};
use serde::Serialize;

/// Result produced by [`KeyboardAnalyzer::analyze`](crate::KeyboardAnalyzer::analyze).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub verdict: ClassificationVerdict,
    pub trace: PipelineTrace,
}

/// End-to-end trace describing the internal execution of the analyzer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub candidates: CandidateStage,
    pub zoning: ZoningStage,
    pub ocr: OcrStage,
    pub classification: ClassificationStage,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
