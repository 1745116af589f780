//! Vertical bands, in multiples of `h_ref`, where each anchor key is searched.
use super::ZoneName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accepted range of the normalized offset `off = (cy_space − cy) / h_ref`
/// (positive above the spacebar). A region is inside iff
/// `row_offset_min − tolerance < off < row_offset_max + tolerance`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneBand {
    pub row_offset_min: f32,
    pub row_offset_max: f32,
    #[serde(default)]
    pub tolerance: f32,
}

impl ZoneBand {
    pub fn new(row_offset_min: f32, row_offset_max: f32, tolerance: f32) -> Self {
        Self {
            row_offset_min,
            row_offset_max,
            tolerance,
        }
    }

    /// Band centred on `offset` with a symmetric tolerance.
    pub fn around(offset: f32, tolerance: f32) -> Self {
        Self::new(offset, offset, tolerance)
    }

    #[inline]
    pub fn contains(&self, offset: f32) -> bool {
        offset > self.row_offset_min - self.tolerance
            && offset < self.row_offset_max + self.tolerance
    }

    fn validate(&self, zone: ZoneName) -> Result<(), String> {
        let finite = self.row_offset_min.is_finite()
            && self.row_offset_max.is_finite()
            && self.tolerance.is_finite();
        if !finite {
            return Err(format!("zone band {zone}: values must be finite"));
        }
        if self.row_offset_min > self.row_offset_max {
            return Err(format!(
                "zone band {zone}: rowOffsetMin {} exceeds rowOffsetMax {}",
                self.row_offset_min, self.row_offset_max
            ));
        }
        if self.tolerance < 0.0 {
            return Err(format!(
                "zone band {zone}: tolerance {} must be non-negative",
                self.tolerance
            ));
        }
        Ok(())
    }
}

/// Validated mapping from every [`ZoneName`] to its [`ZoneBand`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ZoneName, ZoneBand>",
    into = "BTreeMap<ZoneName, ZoneBand>"
)]
pub struct ZoneBandTable {
    bands: [ZoneBand; ZoneName::COUNT],
}

impl ZoneBandTable {
    /// Build a table; every zone must be present exactly once.
    pub fn new<I>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (ZoneName, ZoneBand)>,
    {
        let mut slots: [Option<ZoneBand>; ZoneName::COUNT] = [None; ZoneName::COUNT];
        for (zone, band) in entries {
            band.validate(zone)?;
            if slots[zone.index()].replace(band).is_some() {
                return Err(format!("zone band {zone}: defined twice"));
            }
        }
        let mut bands = [ZoneBand::around(0.0, 0.0); ZoneName::COUNT];
        for zone in ZoneName::ALL {
            bands[zone.index()] =
                slots[zone.index()].ok_or_else(|| format!("zone band {zone}: missing"))?;
        }
        Ok(Self { bands })
    }

    #[inline]
    pub fn get(&self, zone: ZoneName) -> &ZoneBand {
        &self.bands[zone.index()]
    }

    /// Replace one band, validating it.
    pub fn with_band(mut self, zone: ZoneName, band: ZoneBand) -> Result<Self, String> {
        band.validate(zone)?;
        self.bands[zone.index()] = band;
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ZoneName, &ZoneBand)> {
        ZoneName::ALL.into_iter().map(move |z| (z, self.get(z)))
    }
}

impl Default for ZoneBandTable {
    fn default() -> Self {
        let mut bands = [ZoneBand::around(0.0, 0.0); ZoneName::COUNT];
        bands[ZoneName::Space.index()] = ZoneBand::around(0.0, 0.5);
        bands[ZoneName::Shift.index()] = ZoneBand::new(0.9, 2.3, 0.0);
        bands[ZoneName::TopLeftLetter.index()] = ZoneBand::new(3.3, 5.5, 0.0);
        bands[ZoneName::OsKey.index()] = ZoneBand::around(0.0, 0.5);
        bands[ZoneName::EnterKey.index()] = ZoneBand::around(3.2, 0.9);
        Self { bands }
    }
}

impl TryFrom<BTreeMap<ZoneName, ZoneBand>> for ZoneBandTable {
    type Error = String;

    fn try_from(map: BTreeMap<ZoneName, ZoneBand>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<ZoneBandTable> for BTreeMap<ZoneName, ZoneBand> {
    fn from(table: ZoneBandTable) -> Self {
        table.iter().map(|(z, b)| (z, *b)).collect()
    }
}

/// How the tolerant second attempt widens the SHIFT and OS_KEY searches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxationPolicy {
    pub shift_min_scale: f32,
    pub shift_min_floor: f32,
    pub shift_max_scale: f32,
    pub os_tolerance_scale: f32,
    /// Replaces the outer OS window bound (fraction of the spacebar width).
    pub os_window_max: f32,
}

impl Default for RelaxationPolicy {
    fn default() -> Self {
        Self {
            shift_min_scale: 0.8,
            shift_min_floor: 0.3,
            shift_max_scale: 1.2,
            os_tolerance_scale: 1.3,
            os_window_max: 0.8,
        }
    }
}

impl RelaxationPolicy {
    /// Relaxed copy of `table`. Bands other than SHIFT and OS_KEY are untouched.
    pub fn apply(&self, table: &ZoneBandTable) -> ZoneBandTable {
        let mut out = table.clone();
        let shift = *table.get(ZoneName::Shift);
        let min = (shift.row_offset_min * self.shift_min_scale).max(self.shift_min_floor);
        let max = (shift.row_offset_max * self.shift_max_scale).max(min);
        out.bands[ZoneName::Shift.index()] = ZoneBand::new(min, max, shift.tolerance);

        let os = *table.get(ZoneName::OsKey);
        out.bands[ZoneName::OsKey.index()] = ZoneBand {
            tolerance: os.tolerance * self.os_tolerance_scale,
            ..os
        };
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_bounds_are_exclusive() {
        let b = ZoneBand::new(0.9, 2.3, 0.0);
        assert!(b.contains(1.5));
        assert!(!b.contains(0.9));
        assert!(!b.contains(2.3));
        let os = ZoneBand::around(0.0, 0.5);
        assert!(os.contains(-0.4) && os.contains(0.4));
        assert!(!os.contains(0.5));
    }

    #[test]
    fn table_rejects_invalid_entries() {
        let mut entries: Vec<_> = ZoneBandTable::default()
            .iter()
            .map(|(z, b)| (z, *b))
            .collect();
        assert!(ZoneBandTable::new(entries.clone()).is_ok());

        entries[1].1 = ZoneBand::new(2.0, 1.0, 0.0);
        assert!(ZoneBandTable::new(entries.clone()).is_err());

        entries[1].1 = ZoneBand::new(1.0, 2.0, -0.1);
        assert!(ZoneBandTable::new(entries.clone()).is_err());

        entries[1].1 = ZoneBand::new(f32::NAN, 2.0, 0.0);
        assert!(ZoneBandTable::new(entries.clone()).is_err());

        entries.pop();
        let err = ZoneBandTable::new(entries).unwrap_err();
        assert!(err.contains("missing"), "{err}");
    }

    #[test]
    fn table_deserializes_through_validation() {
        let json = serde_json::to_string(&ZoneBandTable::default()).unwrap();
        assert!(json.contains("TOP_LEFT_LETTER"));
        let back: ZoneBandTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ZoneBandTable::default());

        let bad = json.replace("\"tolerance\":0.9", "\"tolerance\":-1.0");
        assert!(serde_json::from_str::<ZoneBandTable>(&bad).is_err());
    }

    #[test]
    fn relaxation_widens_shift_and_os() {
        let relaxed = RelaxationPolicy::default().apply(&ZoneBandTable::default());
        let shift = relaxed.get(ZoneName::Shift);
        assert!((shift.row_offset_min - 0.72).abs() < 1e-6);
        assert!((shift.row_offset_max - 2.76).abs() < 1e-6);
        assert!((relaxed.get(ZoneName::OsKey).tolerance - 0.65).abs() < 1e-6);
        assert_eq!(
            relaxed.get(ZoneName::EnterKey),
            ZoneBandTable::default().get(ZoneName::EnterKey)
        );
    }
}
