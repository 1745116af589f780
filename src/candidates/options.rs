use crate::geometry::Connectivity;
use serde::{Deserialize, Serialize};

/// A size bound given either in pixels or relative to the image.
///
/// When `ratio` is set and positive it wins over `pixels`: areas scale with the
/// total resolution and band widths with the image height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeThreshold {
    pub pixels: f32,
    pub ratio: Option<f32>,
}

impl Default for SizeThreshold {
    fn default() -> Self {
        Self {
            pixels: 0.0,
            ratio: None,
        }
    }
}

impl SizeThreshold {
    pub fn pixels(pixels: f32) -> Self {
        Self {
            pixels,
            ratio: None,
        }
    }

    pub fn relative(pixels: f32, ratio: f32) -> Self {
        Self {
            pixels,
            ratio: Some(ratio),
        }
    }

    /// Resolve against `reference` (resolution for areas, height for bands).
    pub fn resolve(&self, reference: f32) -> f32 {
        match self.ratio {
            Some(r) if r > 0.0 => (reference * r).floor(),
            _ => self.pixels,
        }
    }
}

/// Statistic used as the centre of the vertical acceptance band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandCenter {
    #[default]
    Median,
    Mean,
}

/// Filters applied to connected components before they become key candidates.
///
/// Defaults follow the label-based detector: 8-connectivity, areas relative to
/// the resolution and an adaptive band clamped to `band_sigma` standard
/// deviations of the candidate rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    pub connectivity: Connectivity,
    /// Inclusive lower area bound.
    pub area_min: SizeThreshold,
    /// Inclusive upper area bound.
    pub area_max: SizeThreshold,
    /// Optional inclusive lower bound on width/height.
    pub ratio_min: Option<f32>,
    /// Inclusive upper bound on width/height.
    pub ratio_max: f32,
    /// Solidity must be strictly greater.
    pub solidity_min: f32,
    /// Extent must be strictly greater.
    pub extent_min: f32,
    /// Texture must be strictly greater; `None` disables the check.
    pub texture_min: Option<f32>,
    /// Half-width of the vertical band around the centre row; `None` keeps
    /// every candidate.
    pub band_half_width: Option<SizeThreshold>,
    /// Clamp the half-width to `band_sigma × std(rows)` when set.
    pub band_sigma: Option<f32>,
    pub band_center: BandCenter,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            area_min: SizeThreshold::relative(100.0, 0.0001),
            area_max: SizeThreshold::relative(500_000.0, 0.25),
            ratio_min: None,
            ratio_max: 8.0,
            solidity_min: 0.6,
            extent_min: 0.35,
            texture_min: Some(1e-4),
            band_half_width: Some(SizeThreshold::relative(1000.0, 0.45)),
            band_sigma: Some(2.5),
            band_center: BandCenter::Median,
        }
    }
}

impl DetectorOptions {
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_area_bounds(mut self, min: SizeThreshold, max: SizeThreshold) -> Self {
        self.area_min = min;
        self.area_max = max;
        self
    }

    pub fn with_ratio_bounds(mut self, min: Option<f32>, max: f32) -> Self {
        self.ratio_min = min;
        self.ratio_max = max;
        self
    }

    pub fn with_shape_floors(mut self, solidity_min: f32, extent_min: f32) -> Self {
        self.solidity_min = solidity_min;
        self.extent_min = extent_min;
        self
    }

    pub fn with_texture_min(mut self, texture_min: Option<f32>) -> Self {
        self.texture_min = texture_min;
        self
    }

    pub fn with_band(mut self, half_width: Option<SizeThreshold>, sigma: Option<f32>) -> Self {
        self.band_half_width = half_width;
        self.band_sigma = sigma;
        self
    }

    pub fn with_band_center(mut self, center: BandCenter) -> Self {
        self.band_center = center;
        self
    }

    /// Options of the contour-style exploration detector: absolute thresholds,
    /// a ratio window, no shape floors and a fixed band around the mean row.
    pub fn exploration() -> Self {
        Self {
            area_min: SizeThreshold::pixels(100.0),
            area_max: SizeThreshold::pixels(500_000.0),
            ratio_min: Some(0.5),
            ratio_max: 8.0,
            solidity_min: 0.0,
            extent_min: 0.0,
            texture_min: None,
            band_half_width: Some(SizeThreshold::pixels(1000.0)),
            band_sigma: None,
            band_center: BandCenter::Mean,
            ..Self::default()
        }
    }

    /// Options of the first-generation detector: a small fixed area window,
    /// near-square ratios and no banding.
    pub fn legacy() -> Self {
        Self {
            area_min: SizeThreshold::pixels(101.0),
            area_max: SizeThreshold::pixels(4999.0),
            ratio_min: Some(0.5),
            ratio_max: 3.5,
            solidity_min: 0.0,
            extent_min: 0.0,
            texture_min: None,
            band_half_width: None,
            band_sigma: None,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_wins_over_pixels() {
        let t = SizeThreshold::relative(100.0, 0.0001);
        assert_eq!(t.resolve(1_000_000.0), 100.0);
        assert_eq!(t.resolve(4_000_000.0), 400.0);
        assert_eq!(SizeThreshold::pixels(42.0).resolve(1e9), 42.0);
        let zero = SizeThreshold {
            pixels: 7.0,
            ratio: Some(0.0),
        };
        assert_eq!(zero.resolve(1e6), 7.0);
    }

    #[test]
    fn options_deserialize_partially() {
        let opts: DetectorOptions =
            serde_json::from_str(r#"{"ratio_max": 5.0, "connectivity": "four"}"#).unwrap();
        assert_eq!(opts.ratio_max, 5.0);
        assert_eq!(opts.connectivity, Connectivity::Four);
        assert_eq!(opts.solidity_min, 0.6);
    }
}
