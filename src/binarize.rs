//! Default binarization collaborators.
//!
//! The detector only needs a [`BinaryMask`] where `true` marks a candidate key
//! pixel. These implementations cover the common cases: light keycaps on a
//! darker deck (or the reverse) under even lighting (Otsu) and uneven lighting
//! (adaptive mean over an integral image).
use crate::image::{BinaryMask, ImageU8, ImageView};
use serde::{Deserialize, Serialize};

/// Which side of the threshold holds the pixels of interest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Pixels brighter than the threshold are foreground.
    #[default]
    Light,
    /// Pixels at or below the threshold are foreground.
    Dark,
}

impl Polarity {
    #[inline]
    pub fn is_foreground(self, value: f64, threshold: f64) -> bool {
        match self {
            Polarity::Light => value > threshold,
            Polarity::Dark => value <= threshold,
        }
    }
}

/// Turns a grayscale image into a key mask.
pub trait Binarizer: Send + Sync {
    fn binarize(&self, gray: &ImageU8<'_>) -> BinaryMask;
}

/// Otsu threshold over a stream of 8-bit samples.
///
/// Returns the level `t` maximizing the between-class variance of the classes
/// `≤ t` and `> t`. Empty input yields 128.
pub fn otsu_threshold<I: IntoIterator<Item = u8>>(pixels: I) -> u8 {
    let mut histogram = [0u64; 256];
    let mut total: u64 = 0;
    for p in pixels {
        histogram[p as usize] += 1;
        total += 1;
    }
    if total == 0 {
        return 128;
    }

    let sum_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut sum_background = 0.0f64;
    let mut weight_background: u64 = 0;
    let mut max_variance = 0.0f64;
    let mut best: u8 = 0;
    for (t, &count) in histogram.iter().enumerate() {
        weight_background += count;
        if weight_background == 0 {
            continue;
        }
        let weight_foreground = total - weight_background;
        if weight_foreground == 0 {
            break;
        }
        sum_background += t as f64 * count as f64;
        let mean_bg = sum_background / weight_background as f64;
        let mean_fg = (sum_total - sum_background) / weight_foreground as f64;
        let between =
            weight_background as f64 * weight_foreground as f64 * (mean_bg - mean_fg).powi(2);
        if between > max_variance {
            max_variance = between;
            best = t as u8;
        }
    }
    best
}

/// Global Otsu binarization.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OtsuBinarizer {
    pub key_polarity: Polarity,
}

impl Binarizer for OtsuBinarizer {
    fn binarize(&self, gray: &ImageU8<'_>) -> BinaryMask {
        let t = otsu_threshold(gray.pixels()) as f64;
        let mut mask = BinaryMask::new(gray.w, gray.h);
        for (y, row) in gray.rows().enumerate() {
            let out = &mut mask.data[y * gray.w..(y + 1) * gray.w];
            for (dst, &v) in out.iter_mut().zip(row) {
                *dst = self.key_polarity.is_foreground(v as f64, t);
            }
        }
        mask
    }
}

/// Local mean thresholding over a `block_size × block_size` window.
///
/// A pixel is foreground when it is brighter than `mean + offset`
/// ([`Polarity::Light`]) or at most `mean − offset` ([`Polarity::Dark`]).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveMeanBinarizer {
    pub block_size: usize,
    pub offset: f64,
    pub key_polarity: Polarity,
}

impl Default for AdaptiveMeanBinarizer {
    fn default() -> Self {
        Self {
            block_size: 51,
            offset: 5.0,
            key_polarity: Polarity::Light,
        }
    }
}

impl Binarizer for AdaptiveMeanBinarizer {
    fn binarize(&self, gray: &ImageU8<'_>) -> BinaryMask {
        let (w, h) = (gray.w, gray.h);
        let mut mask = BinaryMask::new(w, h);
        if w == 0 || h == 0 {
            return mask;
        }
        // integral[y+1][x+1] = sum of gray[0..=y][0..=x]
        let iw = w + 1;
        let mut integral = vec![0i64; iw * (h + 1)];
        for (y, row) in gray.rows().enumerate() {
            let mut row_sum = 0i64;
            for (x, &v) in row.iter().enumerate() {
                row_sum += v as i64;
                integral[(y + 1) * iw + (x + 1)] = row_sum + integral[y * iw + (x + 1)];
            }
        }

        let half = (self.block_size.max(1) / 2) as isize;
        for y in 0..h {
            let row = gray.row(y);
            for x in 0..w {
                let y0 = (y as isize - half).max(0) as usize;
                let x0 = (x as isize - half).max(0) as usize;
                let y1 = ((y as isize + half).min(h as isize - 1) + 1) as usize;
                let x1 = ((x as isize + half).min(w as isize - 1) + 1) as usize;
                let area = ((y1 - y0) * (x1 - x0)) as f64;
                let sum = integral[y1 * iw + x1] - integral[y0 * iw + x1]
                    - integral[y1 * iw + x0]
                    + integral[y0 * iw + x0];
                let mean = sum as f64 / area;
                let thresh = match self.key_polarity {
                    Polarity::Light => mean + self.offset,
                    Polarity::Dark => mean - self.offset,
                };
                mask.data[y * w + x] = self.key_polarity.is_foreground(row[x] as f64, thresh);
            }
        }
        mask
    }
}

/// Serializable choice between the built-in binarizers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BinarizerChoice {
    Otsu(OtsuBinarizer),
    Adaptive(AdaptiveMeanBinarizer),
}

impl Default for BinarizerChoice {
    fn default() -> Self {
        BinarizerChoice::Otsu(OtsuBinarizer::default())
    }
}

impl Binarizer for BinarizerChoice {
    fn binarize(&self, gray: &ImageU8<'_>) -> BinaryMask {
        match self {
            BinarizerChoice::Otsu(b) => b.binarize(gray),
            BinarizerChoice::Adaptive(b) => b.binarize(gray),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otsu_splits_bimodal_histogram() {
        let mut px = vec![20u8; 500];
        px.extend(std::iter::repeat(220u8).take(500));
        let t = otsu_threshold(px.iter().copied());
        assert!((20..220).contains(&t), "t={t}");
    }

    #[test]
    fn otsu_marks_light_keys() {
        let (w, h) = (20usize, 10usize);
        let mut data = vec![30u8; w * h];
        for y in 2..8 {
            for x in 4..12 {
                data[y * w + x] = 200;
            }
        }
        let img = ImageU8::packed(w, h, &data);
        let mask = OtsuBinarizer::default().binarize(&img);
        assert_eq!(mask.count_set(), 48);
        assert!(mask.get(5, 3));
        assert!(!mask.get(0, 0));

        let inv = OtsuBinarizer {
            key_polarity: Polarity::Dark,
        }
        .binarize(&img);
        assert_eq!(inv.count_set(), w * h - 48);
    }

    #[test]
    fn adaptive_finds_bright_square_on_gradient() {
        let (w, h) = (64usize, 64usize);
        let mut data: Vec<u8> = (0..w * h).map(|i| ((i % w) as u8) / 2 + 20).collect();
        for y in 20..30 {
            for x in 20..30 {
                data[y * w + x] = 220;
            }
        }
        let img = ImageU8::packed(w, h, &data);
        let mask = AdaptiveMeanBinarizer {
            block_size: 31,
            ..Default::default()
        }
        .binarize(&img);
        assert!(mask.get(25, 25));
        assert!(!mask.get(5, 50));
    }

    #[test]
    fn choice_deserializes_by_kind() {
        let choice: BinarizerChoice =
            serde_json::from_str(r#"{"kind": "adaptive", "block_size": 31}"#).unwrap();
        match choice {
            BinarizerChoice::Adaptive(b) => {
                assert_eq!(b.block_size, 31);
                assert_eq!(b.offset, 5.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        let otsu: BinarizerChoice = serde_json::from_str(r#"{"kind": "otsu"}"#).unwrap();
        assert!(matches!(otsu, BinarizerChoice::Otsu(_)));
    }
}
