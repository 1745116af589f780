use super::{ClassifierThresholds, KeyboardFormat};
use crate::types::KeyRegion;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatDecision {
    pub format: KeyboardFormat,
    pub confidence: f32,
    /// SHIFT width/height.
    pub shift_ratio: Option<f32>,
    /// ENTER height/width.
    pub enter_ratio: Option<f32>,
}

/// ISO/ANSI from the SHIFT width/height ratio. A decisive ENTER height/width
/// ratio overrides it.
pub fn classify_format(
    shift: Option<&KeyRegion>,
    enter: Option<&KeyRegion>,
    th: &ClassifierThresholds,
) -> FormatDecision {
    let shift_ratio = shift.map(|r| r.bbox.aspect_ratio());
    let enter_ratio = enter.map(|r| r.bbox.inverse_aspect_ratio());

    let by_shift = shift_ratio.map(|ratio| {
        if ratio < th.shift_ratio_iso {
            KeyboardFormat::Iso
        } else {
            KeyboardFormat::Ansi
        }
    });
    let by_enter = enter_ratio.and_then(|ratio| {
        if ratio < th.enter_ratio_ansi {
            Some(KeyboardFormat::Ansi)
        } else if ratio > th.enter_ratio_iso {
            Some(KeyboardFormat::Iso)
        } else {
            None
        }
    });

    let (format, confidence) = match (by_shift, by_enter) {
        (Some(s), Some(e)) if s == e => (e, th.format_agreement_confidence),
        (_, Some(e)) => (e, th.format_enter_confidence),
        (Some(s), None) => (s, th.format_shift_confidence),
        (None, None) => (KeyboardFormat::Unknown, 0.0),
    };
    FormatDecision {
        format,
        confidence,
        shift_ratio,
        enter_ratio,
    }
}
