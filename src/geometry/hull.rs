//! Convex hull of pixel footprints.
//!
//! Every pixel `(row, col)` covers the unit square `[col, col+1) × [row, row+1)`.
//! Feeding the outer corners of each row span is enough to recover the hull
//! of the full footprint, so a solid axis-aligned rectangle has a hull area
//! equal to its pixel count.
use nalgebra::Point2;

/// Area of the convex hull of a set of row spans `(row, col_min, col_max)`,
/// with `col_max` inclusive.
pub fn convex_hull_area(spans: &[(usize, usize, usize)]) -> f64 {
    let mut pts: Vec<Point2<f64>> = Vec::with_capacity(spans.len() * 4);
    for &(row, c0, c1) in spans {
        let (y0, y1) = (row as f64, row as f64 + 1.0);
        let (x0, x1) = (c0 as f64, c1 as f64 + 1.0);
        pts.push(Point2::new(x0, y0));
        pts.push(Point2::new(x1, y0));
        pts.push(Point2::new(x0, y1));
        pts.push(Point2::new(x1, y1));
    }
    let hull = monotone_chain(pts);
    polygon_area(&hull)
}

fn cross(o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Andrew's monotone chain; returns the hull in counter-clockwise order.
fn monotone_chain(mut pts: Vec<Point2<f64>>) -> Vec<Point2<f64>> {
    pts.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Point2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Shoelace formula.
fn polygon_area(poly: &[Point2<f64>]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..poly.len() {
        let a = &poly[i];
        let b = &poly[(i + 1) % poly.len()];
        acc += a.x * b.y - b.x * a.y;
    }
    0.5 * acc.abs()
}
