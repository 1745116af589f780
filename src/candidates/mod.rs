//! Candidate key detection on a binary mask.
//!
//! Overview
//! - Label connected components (4- or 8-connectivity).
//! - Keep components whose area, aspect ratio, solidity, extent and texture
//!   pass the configured floors. Area bounds may be given relative to the
//!   image resolution so the detector behaves the same at any scale.
//! - Compute the centre row of the survivors (median or mean) and drop the
//!   ones outside a vertical band. The band half-width is the configured
//!   threshold, optionally clamped to `band_sigma` standard deviations.
//!
//! Two detectors share the labeling and the options struct:
//! [`ComponentDetector`] measures each component as-is, [`BoxDetector`]
//! treats it as a filled outer contour. [`DetectorPreset`] builds either with
//! matching options.

mod band;
mod detector;
pub mod labeling;
pub mod options;
pub mod props;

pub use detector::{BoxDetector, ComponentDetector};
pub use labeling::{label_components, Component};
pub use options::{BandCenter, DetectorOptions, SizeThreshold};

use crate::image::BinaryMask;
use crate::types::KeyRegion;
use serde::{Deserialize, Serialize};

/// Detects candidate key regions on a binary mask.
pub trait CandidateDetector: Send + Sync {
    fn options(&self) -> &DetectorOptions;
    fn detect(&self, mask: &BinaryMask) -> CandidateSet;
}

/// Number of components dropped by each filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionCounts {
    pub area: usize,
    pub ratio: usize,
    pub solidity: usize,
    pub extent: usize,
    pub texture: usize,
    pub band: usize,
}

/// Thresholds after resolving relative sizes against the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedThresholds {
    pub area_min: f32,
    pub area_max: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_half_width: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDiagnostics {
    pub image_width: usize,
    pub image_height: usize,
    pub components: usize,
    pub candidates_before_band: usize,
    pub rejected: RejectionCounts,
    pub thresholds: ResolvedThresholds,
    /// Principal-axis angle of the accepted centroids, in degrees.
    pub tilt_deg: f32,
}

/// Accepted key regions plus the row band they were selected with.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSet {
    pub regions: Vec<KeyRegion>,
    pub center_row: f32,
    pub band_min: f32,
    pub band_max: f32,
    pub diagnostics: CandidateDiagnostics,
}

impl CandidateSet {
    /// Empty result with zero scalars.
    pub fn empty(diagnostics: CandidateDiagnostics) -> Self {
        Self {
            regions: Vec::new(),
            center_row: 0.0,
            band_min: 0.0,
            band_max: 0.0,
            diagnostics,
        }
    }

    /// Wrap an externally built region list (e.g. from another segmenter).
    pub fn from_regions(regions: Vec<KeyRegion>) -> Self {
        if regions.is_empty() {
            return Self::default();
        }
        let rows: Vec<f32> = regions.iter().map(|r| r.row()).collect();
        let lo = rows.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = rows.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        Self {
            center_row: crate::geometry::median(&rows),
            band_min: lo,
            band_max: hi,
            diagnostics: CandidateDiagnostics {
                components: regions.len(),
                candidates_before_band: regions.len(),
                ..Default::default()
            },
            regions,
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Which shape model a detector uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorKind {
    #[default]
    Component,
    Box,
}

impl DetectorKind {
    pub fn build(self, options: DetectorOptions) -> Box<dyn CandidateDetector> {
        match self {
            DetectorKind::Component => Box::new(ComponentDetector::new(options)),
            DetectorKind::Box => Box::new(BoxDetector::new(options)),
        }
    }
}

/// Named detector configurations.
///
/// - `Standard`: label-based, relative areas, adaptive median band.
/// - `Exploration`: filled outer contours, ratio window, fixed band on the mean.
/// - `Legacy`: label-based with a small fixed area window and no band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorPreset {
    #[default]
    Standard,
    Exploration,
    Legacy,
}

impl DetectorPreset {
    pub fn kind(self) -> DetectorKind {
        match self {
            DetectorPreset::Standard | DetectorPreset::Legacy => DetectorKind::Component,
            DetectorPreset::Exploration => DetectorKind::Box,
        }
    }

    pub fn options(self) -> DetectorOptions {
        match self {
            DetectorPreset::Standard => DetectorOptions::default(),
            DetectorPreset::Exploration => DetectorOptions::exploration(),
            DetectorPreset::Legacy => DetectorOptions::legacy(),
        }
    }

    pub fn build(self) -> Box<dyn CandidateDetector> {
        self.kind().build(self.options())
    }
}
