//! Thresholding: manual cutoff and Otsu's method.

use log::debug;
use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};
use crate::filters::histogram::{histogram, LEVELS};
use crate::image::expect_grayscale;

/// Binarize a grayscale image: samples at or below the cutoff become 0,
/// the rest 255.
///
/// # Arguments
/// * `input` - Grayscale image
/// * `cutoff` - Intensity cutoff in 0-255
///
/// # Returns
/// Binary image with values 0 and 255
pub fn threshold(input: ArrayView3<f64>, cutoff: f64) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    if !cutoff.is_finite() {
        return Err(FilterError::invalid_parameter(
            "cutoff",
            format!("must be finite, got {cutoff}"),
        ));
    }
    Ok(input.mapv(|v| if v <= cutoff { 0.0 } else { 255.0 }))
}

/// Pick the threshold maximizing between-class variance (Otsu's method).
///
/// # Arguments
/// * `input` - Grayscale image
///
/// # Returns
/// The selected intensity cutoff
pub fn otsu_threshold(input: ArrayView3<f64>) -> Result<f64> {
    let counts = histogram(input)?;
    let total = input.len() as f64;

    let weighted_sum: f64 = counts
        .iter()
        .enumerate()
        .map(|(level, &c)| level as f64 * c as f64)
        .sum();

    let mut background_count = 0.0;
    let mut background_sum = 0.0;
    let mut best_sigma = 0.0;
    let mut best_cutoff = 0.0;

    for (level, &count) in counts.iter().enumerate().take(LEVELS - 1) {
        background_count += count as f64;
        background_sum += level as f64 * count as f64;

        let w0 = background_count / total;
        let w1 = 1.0 - w0;
        if w0 == 0.0 || w1 == 0.0 {
            continue;
        }

        let mu0 = background_sum / background_count;
        let mu1 = (weighted_sum - background_sum) / (total - background_count);
        let sigma = w0 * w1 * (mu0 - mu1) * (mu0 - mu1);

        if sigma > best_sigma {
            best_sigma = sigma;
            best_cutoff = level as f64;
        }
    }

    debug!("otsu: cutoff {best_cutoff}, between-class variance {best_sigma}");
    Ok(best_cutoff)
}

/// Binarize with the cutoff chosen by Otsu's method.
pub fn otsu(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    let cutoff = otsu_threshold(input)?;
    threshold(input, cutoff)
}
