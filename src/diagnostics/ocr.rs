use crate::classify::AnchorReadings;
use serde::Serialize;

/// OCR readings per anchor, including every individual vote.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrStage {
    /// False when no recognizer reads were attempted.
    pub attempted: bool,
    pub readings: AnchorReadings,
}
