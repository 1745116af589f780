//! Connected-component labeling of a binary mask.
//!
//! Components are discovered in raster order, so labels (1-based) and the
//! output order are deterministic for a given mask.
use crate::geometry::Connectivity;
use crate::image::BinaryMask;
use crate::types::BBox;

const OFFSETS_4: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const OFFSETS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Running sums for the component currently being grown.
pub(crate) struct ComponentAccumulator {
    pub indices: Vec<usize>,
    pub sum_x: f64,
    pub sum_y: f64,
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl ComponentAccumulator {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            sum_x: 0.0,
            sum_y: 0.0,
            min_x: usize::MAX,
            min_y: usize::MAX,
            max_x: 0,
            max_y: 0,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.indices.clear();
        self.sum_x = 0.0;
        self.sum_y = 0.0;
        self.min_x = usize::MAX;
        self.min_y = usize::MAX;
        self.max_x = 0;
        self.max_y = 0;
    }

    pub(crate) fn push(&mut self, idx: usize, x: usize, y: usize) {
        self.indices.push(idx);
        self.sum_x += x as f64;
        self.sum_y += y as f64;
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    /// Freeze the accumulated pixels into a [`Component`].
    pub(crate) fn finish(&self, label: u32) -> Component {
        let n = self.len().max(1) as f64;
        Component {
            label,
            pixels: self.indices.clone(),
            bbox: BBox::new(self.min_y, self.min_x, self.max_y + 1, self.max_x + 1),
            centroid: [(self.sum_y / n) as f32, (self.sum_x / n) as f32],
        }
    }
}

/// One labeled component: its pixel indices into the mask, bounding box and
/// centroid `[row, col]`.
#[derive(Clone, Debug)]
pub struct Component {
    pub label: u32,
    pub pixels: Vec<usize>,
    pub bbox: BBox,
    pub centroid: [f32; 2],
}

impl Component {
    pub fn area(&self) -> usize {
        self.pixels.len()
    }

    /// Membership patch over the bounding box (row-major, `bbox.width()` wide).
    pub fn patch(&self, mask_width: usize) -> Vec<bool> {
        let (w, h) = (self.bbox.width(), self.bbox.height());
        let mut out = vec![false; w * h];
        for &idx in &self.pixels {
            let x = idx % mask_width - self.bbox.min_col;
            let y = idx / mask_width - self.bbox.min_row;
            out[y * w + x] = true;
        }
        out
    }
}

/// Label every foreground component of `mask`.
pub fn label_components(mask: &BinaryMask, connectivity: Connectivity) -> Vec<Component> {
    let (w, h) = (mask.w, mask.h);
    let offsets: &[(isize, isize)] = match connectivity {
        Connectivity::Four => &OFFSETS_4,
        Connectivity::Eight => &OFFSETS_8,
    };
    let mut visited = vec![false; w * h];
    let mut stack: Vec<usize> = Vec::new();
    let mut acc = ComponentAccumulator::with_capacity(1024);
    let mut components = Vec::new();
    let mut next_label: u32 = 1;

    for seed in 0..w * h {
        if !mask.data[seed] || visited[seed] {
            continue;
        }
        acc.reset();
        visited[seed] = true;
        stack.push(seed);
        while let Some(idx) = stack.pop() {
            let x = idx % w;
            let y = idx / w;
            acc.push(idx, x, y);
            for &(dx, dy) in offsets {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if mask.data[nidx] && !visited[nidx] {
                    visited[nidx] = true;
                    stack.push(nidx);
                }
            }
        }
        components.push(acc.finish(next_label));
        next_label += 1;
    }
    components
}
