//! Vertical acceptance band around the keyboard rows.
use super::options::{BandCenter, DetectorOptions};
use crate::geometry::{mean_std, median};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct RowBand {
    pub center: f32,
    pub half_width: f32,
    pub min: f32,
    pub max: f32,
}

impl RowBand {
    /// Inclusive membership test.
    #[inline]
    pub fn contains(&self, row: f32) -> bool {
        row >= self.min && row <= self.max
    }
}

/// Compute the band from candidate centroid rows.
///
/// Without a configured half-width the band spans every row.
pub(crate) fn compute_band(rows: &[f32], opts: &DetectorOptions, image_height: usize) -> RowBand {
    if rows.is_empty() {
        return RowBand::default();
    }
    let (mean, std) = mean_std(rows);
    let center = match opts.band_center {
        BandCenter::Median => median(rows),
        BandCenter::Mean => mean,
    };
    let Some(threshold) = opts.band_half_width else {
        let lo = rows.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = rows.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        return RowBand {
            center,
            half_width: (hi - center).max(center - lo),
            min: lo,
            max: hi,
        };
    };
    let mut half = threshold.resolve(image_height as f32);
    if let Some(sigma) = opts.band_sigma {
        half = half.min(sigma * std);
    }
    RowBand {
        center,
        half_width: half,
        min: center - half,
        max: center + half,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::options::SizeThreshold;

    #[test]
    fn sigma_clamps_half_width() {
        let opts = DetectorOptions::default();
        let rows = [100.0, 110.0, 120.0, 130.0, 140.0];
        let band = compute_band(&rows, &opts, 1000);
        assert_eq!(band.center, 120.0);
        let (_, std) = mean_std(&rows);
        assert!((band.half_width - 2.5 * std).abs() < 1e-4);
        assert!(band.contains(100.0) && band.contains(140.0));
    }

    #[test]
    fn single_row_band_is_inclusive() {
        let band = compute_band(&[250.0], &DetectorOptions::default(), 1000);
        assert_eq!(band.half_width, 0.0);
        assert!(band.contains(250.0));
    }

    #[test]
    fn fixed_band_around_mean() {
        let opts = DetectorOptions::default()
            .with_band(Some(SizeThreshold::pixels(15.0)), None)
            .with_band_center(BandCenter::Mean);
        let band = compute_band(&[0.0, 30.0, 90.0], &opts, 1000);
        assert_eq!(band.center, 40.0);
        assert_eq!((band.min, band.max), (25.0, 55.0));
    }
}
