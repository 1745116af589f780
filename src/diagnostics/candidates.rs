use crate::candidates::{CandidateDiagnostics, CandidateSet, DetectorKind};
use serde::Serialize;

/// Candidate detection summary; the regions themselves are not repeated.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateStage {
    pub detector: DetectorKind,
    pub candidates: usize,
    pub center_row: f32,
    pub band_min: f32,
    pub band_max: f32,
    pub diagnostics: CandidateDiagnostics,
}

impl CandidateStage {
    pub fn from_set(detector: DetectorKind, set: &CandidateSet) -> Self {
        Self {
            detector,
            candidates: set.len(),
            center_row: set.center_row,
            band_min: set.band_min,
            band_max: set.band_max,
            diagnostics: set.diagnostics.clone(),
        }
    }
}
