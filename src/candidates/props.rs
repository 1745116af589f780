//! Shape metrics of a labeled component.
use super::labeling::Component;
use crate::geometry::{convex_hull_area, euler_number, Connectivity};
use crate::image::{BinaryMask, ImageView};
use crate::types::{BBox, KeyRegion};

/// Build the [`KeyRegion`] of a component.
///
/// `area` is the pixel count, solidity uses the convex hull of the pixel
/// footprints and the Euler number is computed on the component alone.
pub fn region_properties(
    component: &Component,
    mask: &BinaryMask,
    connectivity: Connectivity,
) -> KeyRegion {
    let bbox = component.bbox;
    let area = component.area();
    let hull = convex_hull_area(&row_spans(component, mask.w));
    let solidity = if hull > 0.0 {
        (area as f64 / hull).min(1.0) as f32
    } else {
        0.0
    };
    let patch = component.patch(mask.w);
    let euler = euler_number(&patch, bbox.width(), bbox.height(), connectivity);
    KeyRegion {
        label: component.label,
        bbox,
        area,
        centroid: component.centroid,
        solidity,
        extent: ratio(area, bbox.area()),
        texture: mask_texture(mask, &bbox),
        euler: Some(euler),
    }
}

/// Region with external-contour semantics: holes are filled for the area and
/// extent, solidity is fixed at 1.
pub fn filled_region_properties(component: &Component, mask: &BinaryMask) -> KeyRegion {
    let bbox = component.bbox;
    let area = filled_area(component, mask.w);
    KeyRegion {
        label: component.label,
        bbox,
        area,
        centroid: component.centroid,
        solidity: 1.0,
        extent: ratio(area, bbox.area()),
        texture: mask_texture(mask, &bbox),
        euler: None,
    }
}

/// Pixel count of the component with its holes filled.
///
/// Background pixels of the bounding box that cannot reach the box border
/// through 4-connected background are holes.
pub fn filled_area(component: &Component, mask_width: usize) -> usize {
    let (w, h) = (component.bbox.width(), component.bbox.height());
    if w == 0 || h == 0 {
        return 0;
    }
    let patch = component.patch(mask_width);
    let mut outside = vec![false; w * h];
    let mut stack: Vec<usize> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let border = x == 0 || y == 0 || x + 1 == w || y + 1 == h;
            let idx = y * w + x;
            if border && !patch[idx] && !outside[idx] {
                outside[idx] = true;
                stack.push(idx);
            }
        }
    }
    while let Some(idx) = stack.pop() {
        let (x, y) = (idx % w, idx / w);
        let mut visit = |nx: usize, ny: usize| {
            let n = ny * w + nx;
            if !patch[n] && !outside[n] {
                outside[n] = true;
                stack.push(n);
            }
        };
        if x > 0 {
            visit(x - 1, y);
        }
        if x + 1 < w {
            visit(x + 1, y);
        }
        if y > 0 {
            visit(x, y - 1);
        }
        if y + 1 < h {
            visit(x, y + 1);
        }
    }
    w * h - outside.iter().filter(|&&v| v).count()
}

/// Variance of the mask values (0/1) inside `bbox`, i.e. `p·(1 − p)` with `p`
/// the fraction of set pixels.
pub fn mask_texture(mask: &BinaryMask, bbox: &BBox) -> f32 {
    let total = bbox.area();
    if total == 0 {
        return 0.0;
    }
    let mut set = 0usize;
    for y in bbox.min_row..bbox.max_row.min(mask.h) {
        set += mask.row(y)[bbox.min_col..bbox.max_col.min(mask.w)]
            .iter()
            .filter(|&&v| v)
            .count();
    }
    let p = set as f64 / total as f64;
    (p * (1.0 - p)) as f32
}

fn row_spans(component: &Component, mask_width: usize) -> Vec<(usize, usize, usize)> {
    let h = component.bbox.height();
    let mut spans: Vec<Option<(usize, usize)>> = vec![None; h];
    for &idx in &component.pixels {
        let (x, y) = (idx % mask_width, idx / mask_width);
        let slot = &mut spans[y - component.bbox.min_row];
        *slot = Some(match *slot {
            Some((lo, hi)) => (lo.min(x), hi.max(x)),
            None => (x, x),
        });
    }
    spans
        .into_iter()
        .enumerate()
        .filter_map(|(dy, s)| s.map(|(lo, hi)| (component.bbox.min_row + dy, lo, hi)))
        .collect()
}

fn ratio(num: usize, den: usize) -> f32 {
    if den == 0 {
        0.0
    } else {
        num as f32 / den as f32
    }
}
