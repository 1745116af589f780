use crate::classify::{FormatDecision, GeometricLayout, LayoutDecision, OcrLayout, OsDecision};
use serde::Serialize;

/// Per-criterion evidence behind a verdict.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationStage {
    pub format: FormatDecision,
    pub os: OsDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_layout: Option<OcrLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometric_layout: Option<GeometricLayout>,
    pub layout: LayoutDecision,
}
