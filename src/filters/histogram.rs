//! Histogram operations: computation, equalization, specification.
//!
//! All operations work on grayscale images quantized to 256 intensity levels;
//! samples are rounded and clamped into 0-255 when binned.

use ndarray::{Array3, ArrayView3};

use crate::error::Result;
use crate::image::expect_grayscale;

/// Number of intensity levels used by the histogram operations.
pub const LEVELS: usize = 256;

#[inline]
fn bin(v: f64) -> usize {
    v.clamp(0.0, 255.0).round() as usize
}

/// Intensity histogram of a grayscale image.
///
/// # Arguments
/// * `input` - Grayscale image
///
/// # Returns
/// Count per intensity level, 256 entries
pub fn histogram(input: ArrayView3<f64>) -> Result<Vec<usize>> {
    expect_grayscale(input)?;
    let mut counts = vec![0usize; LEVELS];
    for &v in input.iter() {
        counts[bin(v)] += 1;
    }
    Ok(counts)
}

fn cumulative(counts: &[usize]) -> Vec<usize> {
    let mut cdf = Vec::with_capacity(counts.len());
    let mut total = 0;
    for &c in counts {
        total += c;
        cdf.push(total);
    }
    cdf
}

/// Histogram equalization: remap intensities through the normalized
/// cumulative distribution so the output histogram is as flat as the input
/// allows.
///
/// # Arguments
/// * `input` - Grayscale image
///
/// # Returns
/// Equalized image, intensities in 0-255
pub fn equalize(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    let cdf = cumulative(&histogram(input)?);
    let total = input.len() as f64;

    let map: Vec<f64> = cdf
        .iter()
        .map(|&c| (c as f64 * (LEVELS - 1) as f64 / total).floor())
        .collect();

    Ok(input.mapv(|v| map[bin(v)]))
}

/// Histogram specification: remap the input's intensities so its histogram
/// approximates the reference image's.
///
/// For every input level the output level is the one whose reference
/// cumulative distribution is closest to the input's.
///
/// # Arguments
/// * `input` - Grayscale image to remap
/// * `reference` - Grayscale image supplying the target histogram
///
/// # Returns
/// Remapped image, intensities in 0-255
pub fn specify(input: ArrayView3<f64>, reference: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    expect_grayscale(reference)?;

    let src_cdf = normalized_cdf(input)?;
    let ref_cdf = normalized_cdf(reference)?;

    let map: Vec<f64> = src_cdf
        .iter()
        .map(|&s| {
            let mut best = 0usize;
            let mut best_gap = f64::INFINITY;
            for (level, &r) in ref_cdf.iter().enumerate() {
                let gap = (s - r).abs();
                if gap < best_gap {
                    best_gap = gap;
                    best = level;
                }
            }
            best as f64
        })
        .collect();

    Ok(input.mapv(|v| map[bin(v)]))
}

fn normalized_cdf(input: ArrayView3<f64>) -> Result<Vec<f64>> {
    let total = input.len() as f64;
    Ok(cumulative(&histogram(input)?)
        .into_iter()
        .map(|c| c as f64 / total)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_histogram_counts_levels() {
        let mut img = Array3::<f64>::zeros((2, 2, 1));
        img[[0, 1, 0]] = 255.0;
        img[[1, 0, 0]] = 255.0;

        let counts = histogram(img.view()).unwrap();

        assert_eq!(counts[0], 2);
        assert_eq!(counts[255], 2);
        assert_eq!(counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_equalize_spreads_two_levels() {
        // Half the pixels at 100, half at 110: equalization pushes them to
        // the extremes of the range.
        let img = Array3::from_shape_fn(
            (2, 4, 1),
            |(_, x, _)| if x < 2 { 100.0 } else { 110.0 },
        );

        let result = equalize(img.view()).unwrap();

        assert_eq!(result[[0, 0, 0]], 127.0);
        assert_eq!(result[[0, 3, 0]], 255.0);
    }

    #[test]
    fn test_equalize_flat_image_is_constant() {
        let img = Array3::from_elem((3, 3, 1), 42.0);
        let result = equalize(img.view()).unwrap();

        assert!(result.iter().all(|&v| v == 255.0));
    }

    #[test]
    fn test_specify_with_self_is_identity_on_quantized_levels() {
        let img = Array3::from_shape_fn((4, 4, 1), |(y, x, _)| ((y * 4 + x) * 16) as f64);

        let result = specify(img.view(), img.view()).unwrap();

        for (a, b) in img.iter().zip(result.iter()) {
            assert_eq!(*a, *b);
        }
    }

    #[test]
    fn test_specify_pulls_levels_toward_reference() {
        let dark = Array3::from_elem((4, 4, 1), 10.0);
        let bright = Array3::from_elem((4, 4, 1), 200.0);

        let result = specify(dark.view(), bright.view()).unwrap();

        assert!(result.iter().all(|&v| v == 200.0));
    }

    #[test]
    fn test_rgb_rejected() {
        let img = Array3::<f64>::zeros((2, 2, 3));
        assert!(histogram(img.view()).is_err());
        assert!(equalize(img.view()).is_err());
    }
}
