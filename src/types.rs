use serde::{Deserialize, Serialize};

/// Axis-aligned box in `(row, col)` pixel coordinates. Max bounds are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BBox {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
}

impl BBox {
    pub fn new(min_row: usize, min_col: usize, max_row: usize, max_col: usize) -> Self {
        Self {
            min_row,
            min_col,
            max_row: max_row.max(min_row),
            max_col: max_col.max(min_col),
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.max_row - self.min_row
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.max_col - self.min_col
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Width over height; `0.0` for degenerate boxes.
    pub fn aspect_ratio(&self) -> f32 {
        let h = self.height();
        if h == 0 {
            0.0
        } else {
            self.width() as f32 / h as f32
        }
    }

    /// Height over width; `0.0` for degenerate boxes.
    pub fn inverse_aspect_ratio(&self) -> f32 {
        let w = self.width();
        if w == 0 {
            0.0
        } else {
            self.height() as f32 / w as f32
        }
    }

    /// Grow by `pad` pixels on every side, clipped to a `width × height` image.
    pub fn padded(&self, pad: usize, width: usize, height: usize) -> Self {
        Self::new(
            self.min_row.saturating_sub(pad).min(height),
            self.min_col.saturating_sub(pad).min(width),
            (self.max_row + pad).min(height),
            (self.max_col + pad).min(width),
        )
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> Self {
        Self::new(
            self.min_row.min(other.min_row),
            self.min_col.min(other.min_col),
            self.max_row.max(other.max_row),
            self.max_col.max(other.max_col),
        )
    }
}

/// A detected connected component with the shape metrics used by zoning and
/// classification.
///
/// Regions are created once per detection pass and never mutated afterwards;
/// downstream stages only borrow them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRegion {
    /// Component label in the detection pass that produced the region.
    pub label: u32,
    pub bbox: BBox,
    /// Pixel count of the component.
    pub area: usize,
    /// Centroid as `[row, col]`.
    pub centroid: [f32; 2],
    /// Area over convex-hull area.
    pub solidity: f32,
    /// Area over bounding-box area.
    pub extent: f32,
    /// Variance of the mask inside the bounding box.
    pub texture: f32,
    /// Components minus holes, when the region was binarized on its own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub euler: Option<i32>,
}

impl KeyRegion {
    /// Build a region from a box and a pixel count, with the centroid at the
    /// box centre and convex shape metrics. Mostly useful for synthetic
    /// candidate sets.
    pub fn from_bbox(label: u32, bbox: BBox, area: usize) -> Self {
        let box_area = bbox.area();
        let extent = if box_area == 0 {
            0.0
        } else {
            area as f32 / box_area as f32
        };
        Self {
            label,
            bbox,
            area,
            centroid: [
                0.5 * (bbox.min_row + bbox.max_row) as f32,
                0.5 * (bbox.min_col + bbox.max_col) as f32,
            ],
            solidity: 1.0,
            extent,
            texture: 0.0,
            euler: None,
        }
    }

    pub fn with_centroid(mut self, row: f32, col: f32) -> Self {
        self.centroid = [row, col];
        self
    }

    pub fn with_extent(mut self, extent: f32) -> Self {
        self.extent = extent;
        self
    }

    #[inline]
    pub fn row(&self) -> f32 {
        self.centroid[0]
    }

    #[inline]
    pub fn col(&self) -> f32 {
        self.centroid[1]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.bbox.width() as f32
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bbox.height() as f32
    }

    /// Width over height.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.bbox.aspect_ratio()
    }

    /// Centroid row relative to the box, in `[0, 1]` from top to bottom.
    pub fn normalized_center_row(&self) -> f32 {
        let h = self.bbox.height();
        if h == 0 {
            0.0
        } else {
            (self.centroid[0] - self.bbox.min_row as f32) / h as f32
        }
    }

    /// Uniformly rescale box, centroid and area by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        let s = |v: usize| (v as f32 * factor).round().max(0.0) as usize;
        Self {
            label: self.label,
            bbox: BBox::new(
                s(self.bbox.min_row),
                s(self.bbox.min_col),
                s(self.bbox.max_row),
                s(self.bbox.max_col),
            ),
            area: (self.area as f32 * factor * factor).round() as usize,
            centroid: [self.centroid[0] * factor, self.centroid[1] * factor],
            ..self.clone()
        }
    }
}
