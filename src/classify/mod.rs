//! Per-criterion classifiers and their fusion into one verdict.
//!
//! - [`format`]: ISO/ANSI from the SHIFT ratio, overridden by the ENTER shape.
//! - [`os`]: Mac/Windows from the Euler number of the OS key legend, settled
//!   by the OCR reading of the key when the topology is inconclusive.
//! - [`layout`]: AZERTY/QWERTY/QWERTZ from zoned letter positions in the OCR
//!   reading, with a geometric fallback on the top-left letter key.
//! - [`fusion`]: picks OCR or geometry for the layout.
//! - [`verdict`]: runs everything and assembles a [`ClassificationVerdict`].

pub mod format;
pub mod fusion;
pub mod layout;
pub mod os;
pub mod verdict;

pub use format::{classify_format, FormatDecision};
pub use fusion::{fuse_layout, LayoutDecision};
pub use layout::{
    geometric_layout, ocr_layout, score_layout_text, GeometricLayout, LayoutScores, OcrLayout,
};
pub use os::{classify_os, os_from_euler, os_from_vocabulary, OsDecision};
pub use verdict::{AnchorReadings, ClassificationVerdict, Classifier};

use crate::binarize::Polarity;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyboardFormat {
    Iso,
    Ansi,
    #[default]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostOs {
    Mac,
    Windows,
    /// Topology was inconclusive; leans towards Mac.
    Uncertain,
    #[default]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Layout {
    Azerty,
    Qwerty,
    Qwertz,
    #[default]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMethod {
    Ocr,
    Geometric,
    #[default]
    None,
}

impl fmt::Display for KeyboardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyboardFormat::Iso => "ISO",
            KeyboardFormat::Ansi => "ANSI",
            KeyboardFormat::Unknown => "UNKNOWN",
        })
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HostOs::Mac => "Mac",
            HostOs::Windows => "Windows",
            HostOs::Uncertain => "Uncertain (prob. Mac)",
            HostOs::Unknown => "Unknown",
        })
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layout::Azerty => "AZERTY",
            Layout::Qwerty => "QWERTY",
            Layout::Qwertz => "QWERTZ",
            Layout::Unknown => "UNKNOWN",
        })
    }
}

/// Decision thresholds of every classifier. Confidences are on a 0–100 scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// SHIFT width/height below this is ISO.
    pub shift_ratio_iso: f32,
    /// ENTER height/width below this is ANSI.
    pub enter_ratio_ansi: f32,
    /// ENTER height/width above this is ISO.
    pub enter_ratio_iso: f32,
    pub format_shift_confidence: f32,
    pub format_agreement_confidence: f32,
    pub format_enter_confidence: f32,

    pub euler_mac_max: i32,
    pub euler_windows_min: i32,
    /// Which side of the local Otsu threshold the OS legend is on.
    pub glyph_polarity: Polarity,
    pub os_euler_confidence: f32,
    pub os_uncertain_confidence: f32,
    pub os_vocabulary_confidence: f32,
    pub os_agreement_confidence: f32,
    pub mac_vocabulary: Vec<String>,
    pub windows_vocabulary: Vec<String>,

    pub tl_center_y_azerty: f32,
    pub tl_extent_azerty: f32,

    /// OCR evidence below this confidence is ignored.
    pub ocr_min_confidence: f32,
    /// Fixed confidence of a geometric layout verdict.
    pub geo_confidence: f32,
    /// Best layout score below this is UNKNOWN.
    pub min_layout_score: f32,
    /// Best and runner-up closer than this is UNKNOWN.
    pub ambiguity_margin: f32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            shift_ratio_iso: 1.6,
            enter_ratio_ansi: 0.7,
            enter_ratio_iso: 1.2,
            format_shift_confidence: 60.0,
            format_agreement_confidence: 90.0,
            format_enter_confidence: 75.0,
            euler_mac_max: 0,
            euler_windows_min: 2,
            glyph_polarity: Polarity::Dark,
            os_euler_confidence: 70.0,
            os_uncertain_confidence: 40.0,
            os_vocabulary_confidence: 65.0,
            os_agreement_confidence: 85.0,
            mac_vocabulary: words(&["CMD", "COMMAND", "OPTION", "OPT"]),
            windows_vocabulary: words(&["WIN", "WINDOWS", "ALT", "CTRL", "START"]),
            tl_center_y_azerty: 0.55,
            tl_extent_azerty: 0.6,
            ocr_min_confidence: 35.0,
            geo_confidence: 50.0,
            min_layout_score: 30.0,
            ambiguity_margin: 10.0,
        }
    }
}

impl ClassifierThresholds {
    pub fn with_ocr_min_confidence(mut self, confidence: f32) -> Self {
        self.ocr_min_confidence = confidence;
        self
    }

    pub fn with_shift_ratio_iso(mut self, ratio: f32) -> Self {
        self.shift_ratio_iso = ratio;
        self
    }

    pub fn with_euler_bounds(mut self, mac_max: i32, windows_min: i32) -> Self {
        self.euler_mac_max = mac_max;
        self.euler_windows_min = windows_min;
        self
    }
}
