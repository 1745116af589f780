//! Euler number of a binary patch by bit-quad counting.
//!
//! The patch is implicitly padded with one background pixel on every side and
//! every 2×2 window is classified by its number of foreground pixels. With
//! `Q1`, `Q3` the counts of windows holding one or three foreground pixels and
//! `QD` the count of diagonal pairs:
//!
//! - 8-connectivity: `E = (Q1 − Q3 − 2·QD) / 4`
//! - 4-connectivity: `E = (Q1 − Q3 + 2·QD) / 4`
use super::Connectivity;

/// Components minus holes of the foreground in a row-major `w × h` patch.
pub fn euler_number(patch: &[bool], w: usize, h: usize, connectivity: Connectivity) -> i32 {
    if w == 0 || h == 0 || patch.len() < w * h {
        return 0;
    }
    let at = |x: isize, y: isize| -> u8 {
        if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
            0
        } else {
            patch[y as usize * w + x as usize] as u8
        }
    };
    let (mut q1, mut q3, mut qd) = (0i64, 0i64, 0i64);
    for y in -1..h as isize {
        for x in -1..w as isize {
            let a = at(x, y);
            let b = at(x + 1, y);
            let c = at(x, y + 1);
            let d = at(x + 1, y + 1);
            match a + b + c + d {
                1 => q1 += 1,
                3 => q3 += 1,
                2 if a == d => qd += 1,
                _ => {}
            }
        }
    }
    let num = match connectivity {
        Connectivity::Eight => q1 - q3 - 2 * qd,
        Connectivity::Four => q1 - q3 + 2 * qd,
    };
    (num / 4) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(w: usize, h: usize, f: impl Fn(usize, usize) -> bool) -> Vec<bool> {
        (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect()
    }

    #[test]
    fn ring_blob_and_pair() {
        let ring = patch(7, 7, |x, y| !((2..5).contains(&x) && (2..5).contains(&y)));
        assert_eq!(euler_number(&ring, 7, 7, Connectivity::Eight), 0);

        let blob = patch(4, 4, |_, _| true);
        assert_eq!(euler_number(&blob, 4, 4, Connectivity::Eight), 1);

        let pair = patch(9, 5, |x, y| (1..4).contains(&y) && ((1..3).contains(&x) || (5..8).contains(&x)));
        assert_eq!(euler_number(&pair, 9, 5, Connectivity::Eight), 2);
    }

    #[test]
    fn diagonal_pixels_depend_on_connectivity() {
        let diag = patch(4, 4, |x, y| (x, y) == (1, 1) || (x, y) == (2, 2));
        assert_eq!(euler_number(&diag, 4, 4, Connectivity::Eight), 1);
        assert_eq!(euler_number(&diag, 4, 4, Connectivity::Four), 2);
    }

    #[test]
    fn empty_patch_is_zero() {
        assert_eq!(euler_number(&[], 0, 0, Connectivity::Eight), 0);
    }
}
