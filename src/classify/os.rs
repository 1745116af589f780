use super::{ClassifierThresholds, HostOs};
use crate::binarize::otsu_threshold;
use crate::geometry::{euler_number, Connectivity};
use crate::ocr::OcrOutcome;
use image::GrayImage;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OsDecision {
    pub os: HostOs,
    pub confidence: f32,
    pub euler: Option<i32>,
    /// Set when the OS key reading matched a vocabulary.
    pub vocabulary: Option<HostOs>,
}

/// Euler number of the legend of an OS key crop.
///
/// The crop is binarized with its own Otsu threshold; `th.glyph_polarity`
/// selects the legend side. `None` for an empty crop.
pub fn legend_euler(crop: &GrayImage, th: &ClassifierThresholds) -> Option<i32> {
    let (w, h) = (crop.width() as usize, crop.height() as usize);
    if w == 0 || h == 0 {
        return None;
    }
    let t = otsu_threshold(crop.as_raw().iter().copied()) as f64;
    let glyph: Vec<bool> = crop
        .as_raw()
        .iter()
        .map(|&v| th.glyph_polarity.is_foreground(v as f64, t))
        .collect();
    Some(euler_number(&glyph, w, h, Connectivity::Eight))
}

/// Mac/Windows/Uncertain from an Euler number.
pub fn os_from_euler(euler: i32, th: &ClassifierThresholds) -> HostOs {
    if euler <= th.euler_mac_max {
        HostOs::Mac
    } else if euler >= th.euler_windows_min {
        HostOs::Windows
    } else {
        HostOs::Uncertain
    }
}

/// OS named by a key reading, if it contains words of exactly one vocabulary.
pub fn os_from_vocabulary(text: &str, th: &ClassifierThresholds) -> Option<HostOs> {
    if text.is_empty() {
        return None;
    }
    let hit = |words: &[String]| words.iter().any(|w| !w.is_empty() && text.contains(w.as_str()));
    match (hit(&th.mac_vocabulary), hit(&th.windows_vocabulary)) {
        (true, false) => Some(HostOs::Mac),
        (false, true) => Some(HostOs::Windows),
        _ => None,
    }
}

/// Combine the legend topology with the OCR reading of the OS key.
pub fn classify_os(
    crop: Option<&GrayImage>,
    reading: Option<&OcrOutcome>,
    th: &ClassifierThresholds,
) -> OsDecision {
    let euler = crop.and_then(|c| legend_euler(c, th));
    let by_euler = euler.map(|e| os_from_euler(e, th));
    let vocabulary = reading
        .filter(|r| r.confidence >= th.ocr_min_confidence)
        .and_then(|r| os_from_vocabulary(&r.text, th));

    let (os, confidence) = match (by_euler, vocabulary) {
        (Some(e @ (HostOs::Mac | HostOs::Windows)), Some(v)) if e == v => {
            (e, th.os_agreement_confidence)
        }
        (Some(e @ (HostOs::Mac | HostOs::Windows)), _) => (e, th.os_euler_confidence),
        (_, Some(v)) => (v, th.os_vocabulary_confidence),
        (Some(HostOs::Uncertain), None) => (HostOs::Uncertain, th.os_uncertain_confidence),
        _ => (HostOs::Unknown, 0.0),
    };
    OsDecision {
        os,
        confidence,
        euler,
        vocabulary,
    }
}
