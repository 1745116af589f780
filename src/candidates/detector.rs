use super::band::compute_band;
use super::labeling::{label_components, Component};
use super::options::DetectorOptions;
use super::props::{filled_area, filled_region_properties, region_properties};
use super::{CandidateDetector, CandidateDiagnostics, CandidateSet, RejectionCounts, ResolvedThresholds};
use crate::geometry::principal_axis_deg;
use crate::image::BinaryMask;
use crate::types::KeyRegion;
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Label-map detector: every region property is measured on the component
/// itself. This is the default detector.
#[derive(Clone, Debug, Default)]
pub struct ComponentDetector {
    options: DetectorOptions,
}

impl ComponentDetector {
    pub fn new(options: DetectorOptions) -> Self {
        Self { options }
    }
}

impl CandidateDetector for ComponentDetector {
    fn options(&self) -> &DetectorOptions {
        &self.options
    }

    fn detect(&self, mask: &BinaryMask) -> CandidateSet {
        run_detection(mask, &self.options, ShapeModel::Component)
    }
}

/// Outer-contour detector: holes are filled before measuring the area and
/// solidity is reported as 1.
#[derive(Clone, Debug)]
pub struct BoxDetector {
    options: DetectorOptions,
}

impl BoxDetector {
    pub fn new(options: DetectorOptions) -> Self {
        Self { options }
    }
}

impl Default for BoxDetector {
    fn default() -> Self {
        Self::new(DetectorOptions::exploration())
    }
}

impl CandidateDetector for BoxDetector {
    fn options(&self) -> &DetectorOptions {
        &self.options
    }

    fn detect(&self, mask: &BinaryMask) -> CandidateSet {
        run_detection(mask, &self.options, ShapeModel::FilledBox)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ShapeModel {
    Component,
    FilledBox,
}

enum Verdict {
    Keep(KeyRegion),
    Area,
    Ratio,
    Solidity,
    Extent,
    Texture,
}

fn run_detection(mask: &BinaryMask, opts: &DetectorOptions, model: ShapeModel) -> CandidateSet {
    let resolution = mask.resolution() as f32;
    let thresholds = ResolvedThresholds {
        area_min: opts.area_min.resolve(resolution),
        area_max: opts.area_max.resolve(resolution),
        band_half_width: opts
            .band_half_width
            .map(|t| t.resolve(mask.h as f32)),
    };

    let components = label_components(mask, opts.connectivity);
    let verdicts = evaluate_components(&components, mask, opts, &thresholds, model);

    let mut rejected = RejectionCounts::default();
    let mut candidates: Vec<KeyRegion> = Vec::new();
    for verdict in verdicts {
        match verdict {
            Verdict::Keep(region) => candidates.push(region),
            Verdict::Area => rejected.area += 1,
            Verdict::Ratio => rejected.ratio += 1,
            Verdict::Solidity => rejected.solidity += 1,
            Verdict::Extent => rejected.extent += 1,
            Verdict::Texture => rejected.texture += 1,
        }
    }

    let mut diagnostics = CandidateDiagnostics {
        image_width: mask.w,
        image_height: mask.h,
        components: components.len(),
        candidates_before_band: candidates.len(),
        rejected,
        thresholds,
        tilt_deg: 0.0,
    };

    if candidates.is_empty() {
        debug!(
            "CandidateDetector::detect no candidate among {} components",
            components.len()
        );
        return CandidateSet::empty(diagnostics);
    }

    let rows: Vec<f32> = candidates.iter().map(|r| r.row()).collect();
    let band = compute_band(&rows, opts, mask.h);
    let before = candidates.len();
    candidates.retain(|r| band.contains(r.row()));
    diagnostics.rejected.band = before - candidates.len();

    let centroids: Vec<[f32; 2]> = candidates.iter().map(|r| r.centroid).collect();
    diagnostics.tilt_deg = principal_axis_deg(&centroids);

    debug!(
        "CandidateDetector::detect components={} kept={} band=[{:.1}, {:.1}] center={:.1} tilt={:.2}deg",
        diagnostics.components,
        candidates.len(),
        band.min,
        band.max,
        band.center,
        diagnostics.tilt_deg
    );

    CandidateSet {
        regions: candidates,
        center_row: band.center,
        band_min: band.min,
        band_max: band.max,
        diagnostics,
    }
}

fn evaluate_components(
    components: &[Component],
    mask: &BinaryMask,
    opts: &DetectorOptions,
    thresholds: &ResolvedThresholds,
    model: ShapeModel,
) -> Vec<Verdict> {
    #[cfg(feature = "parallel")]
    {
        components
            .par_iter()
            .map(|c| evaluate(c, mask, opts, thresholds, model))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        components
            .iter()
            .map(|c| evaluate(c, mask, opts, thresholds, model))
            .collect()
    }
}

fn evaluate(
    component: &Component,
    mask: &BinaryMask,
    opts: &DetectorOptions,
    thresholds: &ResolvedThresholds,
    model: ShapeModel,
) -> Verdict {
    let area = match model {
        ShapeModel::Component => component.area(),
        ShapeModel::FilledBox => filled_area(component, mask.w),
    } as f32;
    if area < thresholds.area_min || area > thresholds.area_max {
        return Verdict::Area;
    }
    if component.bbox.height() == 0 {
        return Verdict::Ratio;
    }
    let ratio = component.bbox.aspect_ratio();
    if ratio > opts.ratio_max || opts.ratio_min.is_some_and(|min| ratio < min) {
        return Verdict::Ratio;
    }

    let region = match model {
        ShapeModel::Component => region_properties(component, mask, opts.connectivity),
        ShapeModel::FilledBox => filled_region_properties(component, mask),
    };
    if region.solidity <= opts.solidity_min {
        return Verdict::Solidity;
    }
    if region.extent <= opts.extent_min {
        return Verdict::Extent;
    }
    if opts.texture_min.is_some_and(|min| region.texture <= min) {
        return Verdict::Texture;
    }
    Verdict::Keep(region)
}
