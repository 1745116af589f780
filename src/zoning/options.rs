use super::bands::{RelaxationPolicy, ZoneBandTable};
use serde::{Deserialize, Serialize};

/// Knobs of the zone locator. Horizontal margins are fractions of the
/// spacebar width, vertical ones live in [`ZoneBandTable`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoningOptions {
    /// Fewer candidates than this yields an undetermined anchor map.
    pub min_candidates: usize,
    /// How many bottom-most candidates are searched for the spacebar.
    pub bottom_n: usize,
    /// The spacebar must be wider than this (pixels)...
    pub space_min_width_px: f32,
    /// ...and wider than this many times its height.
    pub space_min_ratio: f32,
    /// Percentile of candidate heights used as `h_ref`.
    pub href_percentile: f32,
    /// `h_ref` below this is implausible.
    pub href_min: f32,
    /// Heights accepted by the `h_ref` fallback median (exclusive bounds).
    pub href_sane_range: (f32, f32),
    /// SHIFT must sit left of the spacebar centre by more than this.
    pub shift_left_margin: f32,
    /// Exclusive width/height range of SHIFT.
    pub shift_ratio: (f32, f32),
    /// Exclusive width/height range of the top-left letter.
    pub letter_ratio: (f32, f32),
    /// A left-most letter-row key wider than this ratio is taken for Tab.
    pub tab_ratio: f32,
    /// OS key horizontal window `(near, far)`: `-far < dx < -near`.
    pub os_window: (f32, f32),
    /// Exclusive width/height range of the OS key.
    pub os_ratio: (f32, f32),
    /// ENTER must sit right of the spacebar centre by more than this.
    pub enter_right_margin: f32,
    pub bands: ZoneBandTable,
    pub relaxation: RelaxationPolicy,
}

impl Default for ZoningOptions {
    fn default() -> Self {
        Self {
            min_candidates: 1,
            bottom_n: 15,
            space_min_width_px: 200.0,
            space_min_ratio: 1.5,
            href_percentile: 40.0,
            href_min: 10.0,
            href_sane_range: (20.0, 200.0),
            shift_left_margin: 0.2,
            shift_ratio: (1.1, 3.5),
            letter_ratio: (0.5, 2.2),
            tab_ratio: 1.35,
            os_window: (0.05, 0.7),
            os_ratio: (0.8, 2.0),
            enter_right_margin: 0.3,
            bands: ZoneBandTable::default(),
            relaxation: RelaxationPolicy::default(),
        }
    }
}

impl ZoningOptions {
    pub fn with_min_candidates(mut self, n: usize) -> Self {
        self.min_candidates = n;
        self
    }

    pub fn with_bands(mut self, bands: ZoneBandTable) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_relaxation(mut self, relaxation: RelaxationPolicy) -> Self {
        self.relaxation = relaxation;
        self
    }

    pub fn with_spacebar_floor(mut self, min_width_px: f32, min_ratio: f32) -> Self {
        self.space_min_width_px = min_width_px;
        self.space_min_ratio = min_ratio;
        self
    }
}

#[inline]
pub(crate) fn in_open_range(value: f32, range: (f32, f32)) -> bool {
    value > range.0 && value < range.1
}
