//! Frequency-domain enhancement operations.
//!
//! Every operation here follows the same pipeline: forward transform, center
//! the spectrum, multiply by a transfer function designed over the centered
//! grid, uncenter, inverse transform, normalize into the display range.

use log::debug;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

use crate::error::{FilterError, Result};
use crate::image::{channel_plane, expect_grayscale, plane_to_image};
use crate::normalize::{normalize_plane, DISPLAY_RANGE};

use super::fft;
use super::spectrum::ComplexSpectrum;
use super::transfer::{ButterworthFilter, HomomorphicFilter, IdealFilter};

/// Run one plane through the centered-transfer pipeline:
/// FFT, shift, multiply by `transfer`, unshift, inverse FFT.
///
/// The transfer function must match the plane's dimensions; the result is the
/// raw (unnormalized) spatial plane.
pub fn apply_centered_transfer(
    plane: ArrayView2<f64>,
    transfer: ArrayView2<f64>,
) -> Result<Array2<f64>> {
    if plane.dim() != transfer.dim() {
        return Err(FilterError::DimensionMismatch {
            expected: plane.dim(),
            actual: transfer.dim(),
        });
    }
    let centered = fft::shift(&fft::forward(plane)?);
    let filtered = fft::unshift(&centered.mul_plane(transfer)?);
    fft::inverse(&filtered)
}

fn filter_grayscale(
    input: ArrayView3<f64>,
    transfer: impl FnOnce(usize, usize) -> Array2<f64>,
) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    let plane = channel_plane(input, 0);
    let (height, width) = plane.dim();
    let result = apply_centered_transfer(plane.view(), transfer(height, width).view())?;
    let (lo, hi) = DISPLAY_RANGE;
    Ok(plane_to_image(normalize_plane(result.view(), lo, hi)))
}

// ============================================================================
// Ideal filters
// ============================================================================

/// Apply an ideal low-pass filter (`D <= D0` passes).
///
/// # Arguments
/// * `input` - Grayscale image
/// * `filter` - Cutoff radius
///
/// # Returns
/// Filtered image normalized into 0-255
pub fn ideal_low_pass(input: ArrayView3<f64>, filter: &IdealFilter) -> Result<Array3<f64>> {
    filter_grayscale(input, |h, w| filter.low_pass(h, w))
}

/// Apply an ideal high-pass filter (`D > D0` passes).
pub fn ideal_high_pass(input: ArrayView3<f64>, filter: &IdealFilter) -> Result<Array3<f64>> {
    filter_grayscale(input, |h, w| filter.high_pass(h, w))
}

// ============================================================================
// Butterworth filters
// ============================================================================

/// Apply a Butterworth low-pass filter.
pub fn butterworth_low_pass(
    input: ArrayView3<f64>,
    filter: &ButterworthFilter,
) -> Result<Array3<f64>> {
    filter_grayscale(input, |h, w| filter.low_pass(h, w))
}

/// Apply a Butterworth high-pass filter.
pub fn butterworth_high_pass(
    input: ArrayView3<f64>,
    filter: &ButterworthFilter,
) -> Result<Array3<f64>> {
    filter_grayscale(input, |h, w| filter.high_pass(h, w))
}

// ============================================================================
// Homomorphic filter
// ============================================================================

/// Apply a homomorphic filter.
///
/// The image moves to the log domain (`ln(1 + v)`, so zero gray levels stay
/// defined) before the transform and back (`exp(v) - 1`) after the inverse,
/// separating multiplicative illumination from reflectance.
///
/// # Arguments
/// * `input` - Grayscale image with non-negative samples
/// * `filter` - Gamma range, sharpness and cutoff
///
/// # Returns
/// Filtered image normalized into 0-255
pub fn homomorphic(input: ArrayView3<f64>, filter: &HomomorphicFilter) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    let plane = channel_plane(input, 0).mapv(f64::ln_1p);
    let (height, width) = plane.dim();

    let transfer = filter.transfer(height, width);
    let mut result = apply_centered_transfer(plane.view(), transfer.view())?;
    result.mapv_inplace(|v| v.exp() - 1.0);

    let (min, max) = result
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    debug!("homomorphic result range: min {min}, max {max}");

    let (lo, hi) = DISPLAY_RANGE;
    Ok(plane_to_image(normalize_plane(result.view(), lo, hi)))
}

// ============================================================================
// Spectrum inspection
// ============================================================================

/// Log-magnitude view of an image's spectrum, centered and normalized for
/// display.
///
/// # Arguments
/// * `input` - Grayscale image
///
/// # Returns
/// `log(1 + |F|)` with the DC term at the center, normalized into 0-255
pub fn spectrum_magnitude(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    let plane = channel_plane(input, 0);

    let magnitude = fft::forward(plane.view())?.magnitude().mapv(f64::ln_1p);
    let centered = fft::shift_plane(magnitude.view());

    let (lo, hi) = DISPLAY_RANGE;
    Ok(plane_to_image(normalize_plane(centered.view(), lo, hi)))
}

fn reconstruct(
    input: ArrayView3<f64>,
    strip: impl FnOnce(&ComplexSpectrum) -> ComplexSpectrum,
) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    let plane = channel_plane(input, 0);
    let spectrum = fft::forward(plane.view())?;
    let restored = fft::inverse(&strip(&spectrum))?;
    let (lo, hi) = DISPLAY_RANGE;
    Ok(plane_to_image(normalize_plane(restored.view(), lo, hi)))
}

/// Reconstruct an image from its spectrum magnitude alone (phase zeroed).
pub fn reconstruct_from_magnitude(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    reconstruct(input, ComplexSpectrum::keep_magnitude)
}

/// Reconstruct an image from its spectrum phase alone (magnitude set to one).
pub fn reconstruct_from_phase(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    reconstruct(input, ComplexSpectrum::keep_phase)
}
