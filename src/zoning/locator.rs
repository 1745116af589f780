use super::bands::ZoneBandTable;
use super::options::{in_open_range, ZoningOptions};
use super::{AnchorMap, ZoneName, ZoningAttempt};
use crate::geometry::{median, percentile};
use crate::types::KeyRegion;
use log::debug;
use std::cmp::Ordering;

/// Locates the anchor keys of one candidate list.
///
/// ```
/// use keyboard_detector::types::{BBox, KeyRegion};
/// use keyboard_detector::zoning::{ZoneLocator, ZoningOptions};
///
/// let regions = vec![KeyRegion::from_bbox(1, BBox::new(460, 100, 540, 700), 48_000)];
/// let anchors = ZoneLocator::new(ZoningOptions::default()).locate(&regions);
/// assert!(anchors.space().is_some());
/// assert!(anchors.shift().is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneLocator {
    options: ZoningOptions,
}

/// Spacebar reference frame shared by every anchor search.
#[derive(Clone, Copy, Debug)]
struct SpaceFrame {
    cy: f32,
    cx: f32,
    width: f32,
    h_ref: f32,
}

impl SpaceFrame {
    /// Normalized offset above the spacebar.
    #[inline]
    fn offset(&self, r: &KeyRegion) -> f32 {
        (self.cy - r.row()) / self.h_ref
    }

    #[inline]
    fn dx(&self, r: &KeyRegion) -> f32 {
        r.col() - self.cx
    }
}

/// Per-attempt search geometry.
struct PassGeometry {
    bands: ZoneBandTable,
    os_window_max: f32,
}

impl ZoneLocator {
    pub fn new(options: ZoningOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ZoningOptions {
        &self.options
    }

    pub fn locate<'a>(&self, regions: &'a [KeyRegion]) -> AnchorMap<'a> {
        let opts = &self.options;
        if regions.is_empty() || regions.len() < opts.min_candidates {
            debug!(
                "ZoneLocator::locate undetermined: {} candidates (min {})",
                regions.len(),
                opts.min_candidates
            );
            return AnchorMap::undetermined();
        }

        let Some(space) = self.find_space(regions) else {
            return AnchorMap::undetermined();
        };
        let h_ref = self.reference_height(regions, space);
        let frame = SpaceFrame {
            cy: space.row(),
            cx: space.col(),
            width: space.width(),
            h_ref,
        };
        debug!(
            "ZoneLocator::locate space=#{} center=({:.1}, {:.1}) w={:.0} h_ref={:.1}",
            space.label, frame.cx, frame.cy, frame.width, h_ref
        );

        let mut map = AnchorMap {
            h_ref,
            ..AnchorMap::default()
        };
        map.set(ZoneName::Space, Some(space));

        let mut attempt = ZoningAttempt::Strict;
        loop {
            map.attempt = attempt;
            let pass = self.pass_geometry(attempt);
            // Each search skips regions already assigned; the top-left letter
            // goes last so its fallback only sees leftovers.
            if map.shift().is_none() {
                let shift = self.find_shift(regions, &frame, &pass, &map);
                map.set(ZoneName::Shift, shift);
            }
            if map.os_key().is_none() {
                let os = self.find_os_key(regions, &frame, &pass, &map);
                map.set(ZoneName::OsKey, os);
            }
            if attempt == ZoningAttempt::Strict {
                let enter = self.find_enter(regions, &frame, &pass, &map);
                map.set(ZoneName::EnterKey, enter);
                let tl = self.find_top_left_letter(regions, &frame, &pass, &map);
                map.set(ZoneName::TopLeftLetter, tl);
            }

            let found = map.critical_found();
            debug!("ZoneLocator::locate {attempt:?} pass: {found}/4 critical anchors");
            match attempt {
                ZoningAttempt::Strict if found == 2 => attempt = ZoningAttempt::Relaxed,
                _ => break,
            }
        }
        map
    }

    fn pass_geometry(&self, attempt: ZoningAttempt) -> PassGeometry {
        match attempt {
            ZoningAttempt::Strict => PassGeometry {
                bands: self.options.bands.clone(),
                os_window_max: self.options.os_window.1,
            },
            ZoningAttempt::Relaxed => PassGeometry {
                bands: self.options.relaxation.apply(&self.options.bands),
                os_window_max: self.options.relaxation.os_window_max,
            },
        }
    }

    /// Widest qualifying region among the bottom-most candidates, else the
    /// widest of them.
    fn find_space<'a>(&self, regions: &'a [KeyRegion]) -> Option<&'a KeyRegion> {
        let opts = &self.options;
        let mut bottom: Vec<&KeyRegion> = regions.iter().collect();
        bottom.sort_by(|a, b| b.row().partial_cmp(&a.row()).unwrap_or(Ordering::Equal));
        bottom.truncate(opts.bottom_n.max(1));

        let mut best: Option<&KeyRegion> = None;
        for r in &bottom {
            let qualifies = r.width() > opts.space_min_width_px
                && r.aspect_ratio() > opts.space_min_ratio;
            if qualifies && best.map_or(true, |b| r.width() > b.width()) {
                best = Some(r);
            }
        }
        if best.is_none() {
            debug!("ZoneLocator::locate no qualifying spacebar, falling back to widest");
            best = first_max_by(bottom.iter().copied(), |a, b| cmp_f32(a.width(), b.width()));
        }
        best
    }

    fn reference_height(&self, regions: &[KeyRegion], space: &KeyRegion) -> f32 {
        let opts = &self.options;
        let heights: Vec<f32> = regions.iter().map(|r| r.height()).collect();
        let mut h_ref = percentile(&heights, opts.href_percentile);
        if h_ref < opts.href_min || h_ref > 2.0 * space.height() {
            let sane: Vec<f32> = heights
                .iter()
                .copied()
                .filter(|&h| in_open_range(h, opts.href_sane_range))
                .collect();
            if !sane.is_empty() {
                h_ref = median(&sane);
                debug!("ZoneLocator::locate h_ref recomputed from sane heights: {h_ref:.1}");
            }
        }
        h_ref.max(f32::EPSILON)
    }

    fn find_shift<'a>(
        &self,
        regions: &'a [KeyRegion],
        frame: &SpaceFrame,
        pass: &PassGeometry,
        map: &AnchorMap<'a>,
    ) -> Option<&'a KeyRegion> {
        let band = pass.bands.get(ZoneName::Shift);
        let margin = frame.width * self.options.shift_left_margin;
        let survivors = regions.iter().filter(|r| {
            !map.is_assigned(r)
                && band.contains(frame.offset(r))
                && r.col() < frame.cx - margin
                && in_open_range(r.aspect_ratio(), self.options.shift_ratio)
        });
        first_max_by(survivors, |a, b| a.area.cmp(&b.area))
    }

    fn find_top_left_letter<'a>(
        &self,
        regions: &'a [KeyRegion],
        frame: &SpaceFrame,
        pass: &PassGeometry,
        map: &AnchorMap<'a>,
    ) -> Option<&'a KeyRegion> {
        let band = pass.bands.get(ZoneName::TopLeftLetter);
        let mut row: Vec<&KeyRegion> = regions
            .iter()
            .filter(|r| {
                !map.is_assigned(r)
                    && band.contains(frame.offset(r))
                    && in_open_range(r.aspect_ratio(), self.options.letter_ratio)
            })
            .collect();
        row.sort_by(|a, b| cmp_f32(a.col(), b.col()));

        if let Some(first) = row.first() {
            if row.len() > 1 && first.aspect_ratio() > self.options.tab_ratio {
                return Some(row[1]);
            }
            return Some(first);
        }
        regions
            .iter()
            .filter(|r| !map.is_assigned(r))
            .min_by(|a, b| cmp_f32(a.row() + a.col(), b.row() + b.col()))
    }

    fn find_os_key<'a>(
        &self,
        regions: &'a [KeyRegion],
        frame: &SpaceFrame,
        pass: &PassGeometry,
        map: &AnchorMap<'a>,
    ) -> Option<&'a KeyRegion> {
        let band = pass.bands.get(ZoneName::OsKey);
        let near = frame.width * self.options.os_window.0;
        let far = frame.width * pass.os_window_max;
        let survivors = regions.iter().filter(|r| {
            let dx = frame.dx(r);
            !map.is_assigned(r)
                && band.contains(frame.offset(r))
                && dx > -far
                && dx < -near
                && in_open_range(r.aspect_ratio(), self.options.os_ratio)
        });
        first_max_by(survivors, |a, b| cmp_f32(a.col(), b.col()))
    }

    fn find_enter<'a>(
        &self,
        regions: &'a [KeyRegion],
        frame: &SpaceFrame,
        pass: &PassGeometry,
        map: &AnchorMap<'a>,
    ) -> Option<&'a KeyRegion> {
        let band = pass.bands.get(ZoneName::EnterKey);
        let margin = frame.width * self.options.enter_right_margin;
        let survivors = regions.iter().filter(|r| {
            !map.is_assigned(r) && band.contains(frame.offset(r)) && r.col() > frame.cx + margin
        });
        first_max_by(survivors, |a, b| {
            cmp_f32(a.height(), b.height()).then(a.area.cmp(&b.area))
        })
    }
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Maximum by `cmp`, keeping the first element among equals.
fn first_max_by<'a, I, F>(iter: I, mut cmp: F) -> Option<&'a KeyRegion>
where
    I: IntoIterator<Item = &'a KeyRegion>,
    F: FnMut(&KeyRegion, &KeyRegion) -> Ordering,
{
    let mut best: Option<&'a KeyRegion> = None;
    for r in iter {
        match best {
            Some(b) if cmp(r, b) != Ordering::Greater => {}
            _ => best = Some(r),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BBox;

    fn key(label: u32, row: usize, col: usize, h: usize, w: usize) -> KeyRegion {
        KeyRegion::from_bbox(label, BBox::new(row, col, row + h, col + w), w * h)
    }

    #[test]
    fn space_falls_back_to_widest_of_bottom() {
        let regions = vec![key(1, 400, 100, 60, 150), key(2, 400, 300, 60, 80)];
        let anchors = ZoneLocator::default().locate(&regions);
        assert_eq!(anchors.space().map(|r| r.label), Some(1));
    }

    #[test]
    fn tab_is_skipped_for_top_left_letter() {
        let mut regions = vec![key(1, 500, 200, 80, 600)];
        // top row ~4.3 h_ref above the spacebar; h_ref = 70
        regions.push(key(2, 200, 50, 70, 105)); // Tab, ratio 1.5
        regions.push(key(3, 200, 170, 70, 70));
        regions.push(key(4, 200, 250, 70, 70));
        let anchors = ZoneLocator::default().locate(&regions);
        assert_eq!(anchors.top_left_letter().map(|r| r.label), Some(3));
    }

    #[test]
    fn enter_prefers_tallest() {
        let mut regions = vec![key(1, 500, 200, 80, 600)];
        for i in 0..6 {
            regions.push(key(10 + i, 400, 100 + i as usize * 80, 70, 70));
        }
        // ISO-like tall enter and a short neighbour, both ~3.2 h_ref up and right
        regions.push(key(2, 250, 800, 140, 90));
        regions.push(key(3, 280, 700, 70, 70));
        let anchors = ZoneLocator::default().locate(&regions);
        assert_eq!(anchors.enter_key().map(|r| r.label), Some(2));
    }

    #[test]
    fn os_key_prefers_closest_to_space() {
        let mut regions = vec![key(1, 500, 300, 80, 600)];
        regions.push(key(2, 505, 60, 70, 80)); // dx ≈ -500: past the window
        regions.push(key(3, 505, 150, 70, 80)); // dx ≈ -410
        regions.push(key(4, 505, 230, 70, 80)); // dx ≈ -330
        let anchors = ZoneLocator::default().locate(&regions);
        assert_eq!(anchors.os_key().map(|r| r.label), Some(4));
    }

    #[test]
    fn top_left_fallback_never_takes_another_anchor() {
        let regions = vec![
            key(1, 460, 100, 80, 600),
            key(4, 466, 10, 70, 80), // OS key, smallest row + col
            key(5, 100, 600, 30, 100), // too wide for the letter row
        ];
        let anchors = ZoneLocator::default().locate(&regions);
        assert_eq!(anchors.os_key().map(|r| r.label), Some(4));
        assert_eq!(anchors.top_left_letter().map(|r| r.label), Some(5));
        let mut labels: Vec<u32> = anchors.iter().map(|(_, r)| r.label).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec![1, 4, 5]);
    }

    #[test]
    fn first_max_keeps_first_of_equals() {
        let a = key(1, 0, 0, 10, 10);
        let b = key(2, 0, 20, 10, 10);
        let best = first_max_by([&a, &b], |x, y| x.area.cmp(&y.area));
        assert_eq!(best.map(|r| r.label), Some(1));
    }
}
