//! Small statistics helpers on `f32` samples.
use nalgebra::Matrix2;

fn sorted(values: &[f32]) -> Vec<f32> {
    let mut v: Vec<f32> = values.iter().copied().filter(|x| x.is_finite()).collect();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    v
}

/// Median of the finite samples; `0.0` when empty.
pub fn median(values: &[f32]) -> f32 {
    let v = sorted(values);
    let m = v.len();
    if m == 0 {
        0.0
    } else if m % 2 == 1 {
        v[m / 2]
    } else {
        0.5 * (v[m / 2 - 1] + v[m / 2])
    }
}

/// Percentile `q ∈ [0, 100]` with linear interpolation between closest ranks.
pub fn percentile(values: &[f32], q: f32) -> f32 {
    let v = sorted(values);
    if v.is_empty() {
        return 0.0;
    }
    let rank = (q.clamp(0.0, 100.0) / 100.0) * (v.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f32;
    v[lo] + (v[hi] - v[lo]) * frac
}

/// Mean and population standard deviation; `(0, 0)` when empty.
pub fn mean_std(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean as f32, var.sqrt() as f32)
}

/// Angle in degrees of the dominant axis of `(row, col)` points, measured from
/// the image x-axis and folded into `(-90, 90]`. `0.0` for fewer than two points.
pub fn principal_axis_deg(points: &[[f32; 2]]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let n = points.len() as f64;
    let (mut sx, mut sy) = (0.0f64, 0.0f64);
    for p in points {
        sy += p[0] as f64;
        sx += p[1] as f64;
    }
    let (mx, my) = (sx / n, sy / n);
    let (mut cxx, mut cyy, mut cxy) = (0.0f64, 0.0f64, 0.0f64);
    for p in points {
        let dx = p[1] as f64 - mx;
        let dy = p[0] as f64 - my;
        cxx += dx * dx;
        cyy += dy * dy;
        cxy += dx * dy;
    }
    let cov = Matrix2::new(cxx / n, cxy / n, cxy / n, cyy / n);
    let eig = cov.symmetric_eigen();
    let idx = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        0
    } else {
        1
    };
    let axis = eig.eigenvectors.column(idx);
    let mut deg = axis[1].atan2(axis[0]).to_degrees();
    if deg > 90.0 {
        deg -= 180.0;
    } else if deg <= -90.0 {
        deg += 180.0;
    }
    deg as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates_like_numpy() {
        let v = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert!((percentile(&v, 40.0) - 26.0).abs() < 1e-5);
        assert!((percentile(&v, 100.0) - 50.0).abs() < 1e-5);
        assert_eq!(percentile(&[], 40.0), 0.0);
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
    }

    #[test]
    fn population_std() {
        let (m, s) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((m - 5.0).abs() < 1e-6);
        assert!((s - 2.0).abs() < 1e-6);
    }

    #[test]
    fn horizontal_row_has_zero_tilt() {
        let pts: Vec<[f32; 2]> = (0..10).map(|i| [100.0, i as f32 * 50.0]).collect();
        assert!(principal_axis_deg(&pts).abs() < 1e-3);
        let tilted: Vec<[f32; 2]> = (0..10).map(|i| [i as f32 * 10.0, i as f32 * 10.0]).collect();
        assert!((principal_axis_deg(&tilted) - 45.0).abs() < 1e-3);
    }
}
