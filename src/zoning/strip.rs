use super::AnchorMap;
use crate::types::{BBox, KeyRegion};
use std::cmp::Ordering;

/// Bounding box of the letter row starting at TOP_LEFT_LETTER.
///
/// Keys whose centroid lies within half a reference height of the top-left
/// letter's row and at or right of its left edge are taken left to right,
/// at most `max_keys` of them.
pub fn row_strip_bbox(
    regions: &[KeyRegion],
    anchors: &AnchorMap<'_>,
    max_keys: usize,
) -> Option<BBox> {
    let tl = anchors.top_left_letter()?;
    let tolerance = 0.5 * anchors.h_ref.max(tl.height());
    let mut row: Vec<&KeyRegion> = regions
        .iter()
        .filter(|r| (r.row() - tl.row()).abs() <= tolerance && r.bbox.min_col >= tl.bbox.min_col)
        .collect();
    row.sort_by(|a, b| a.col().partial_cmp(&b.col()).unwrap_or(Ordering::Equal));
    row.into_iter()
        .take(max_keys.max(1))
        .map(|r| r.bbox)
        .reduce(|acc, b| acc.union(&b))
}
