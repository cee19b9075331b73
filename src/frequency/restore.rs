//! Restoration filters: inverse filtering and Wiener deconvolution.
//!
//! Both estimate the original spectrum from a degraded observation and the
//! optical transfer function of the blur that produced it.

use log::debug;
use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};
use crate::image::{channel_plane, expect_grayscale, plane_to_image};
use crate::normalize::{normalize_plane, DISPLAY_RANGE};

use super::fft;
use super::psf::MotionBlurPsf;
use super::spectrum::guard_denominator;

/// Unregularized inverse filter restricted to a cutoff radius.
///
/// Outside the cutoff the OTF magnitude is near zero and direct division
/// would amplify noise without bound, so those frequencies are passed through
/// unfiltered (explicit policy; the alternative of zeroing them discards
/// the high band entirely).
#[derive(Debug, Clone, Copy)]
pub struct InverseFilter {
    cutoff: f64,
}

impl InverseFilter {
    pub fn new(cutoff: f64) -> Result<Self> {
        if !(cutoff > 0.0) || !cutoff.is_finite() {
            return Err(FilterError::invalid_parameter(
                "cutoff",
                format!("must be positive, got {cutoff}"),
            ));
        }
        Ok(InverseFilter { cutoff })
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

/// Wiener deconvolution with scalar regularization constant `K`, an
/// approximation of the noise-to-signal power ratio.
#[derive(Debug, Clone, Copy)]
pub struct WienerFilter {
    k: f64,
}

impl WienerFilter {
    pub fn new(k: f64) -> Result<Self> {
        if !(k >= 0.0) || !k.is_finite() {
            return Err(FilterError::invalid_parameter(
                "k",
                format!("must be finite and non-negative, got {k}"),
            ));
        }
        Ok(WienerFilter { k })
    }

    pub fn k(&self) -> f64 {
        self.k
    }
}

/// Restore a degraded image by dividing its spectrum by the blur OTF inside
/// the cutoff radius.
///
/// Both spectra are centered before the radial cutoff test; within the
/// cutoff, `|OTF|` is clamped to an epsilon floor before dividing, so
/// degenerate cells never produce infinities.
///
/// # Arguments
/// * `degraded` - Grayscale degraded observation
/// * `psf` - PSF of the blur being undone
/// * `filter` - Cutoff configuration
///
/// # Returns
/// Restored image normalized into 0-255
pub fn inverse_filter(
    degraded: ArrayView3<f64>,
    psf: &MotionBlurPsf,
    filter: &InverseFilter,
) -> Result<Array3<f64>> {
    expect_grayscale(degraded)?;
    let plane = channel_plane(degraded, 0);
    let (height, width) = plane.dim();

    let observed = fft::shift(&fft::forward(plane.view())?);
    let otf = fft::shift(&psf.otf(height, width)?);

    let cy = (height / 2) as f64;
    let cx = (width / 2) as f64;
    let mut estimate = observed.clone();
    for y in 0..height {
        for x in 0..width {
            let d = (y as f64 - cy).hypot(x as f64 - cx);
            if d <= filter.cutoff {
                let h = guard_denominator(otf.at(y, x));
                estimate.set(y, x, observed.at(y, x) / h);
            }
        }
    }

    let restored = fft::inverse(&fft::unshift(&estimate))?;
    let (lo, hi) = DISPLAY_RANGE;
    Ok(plane_to_image(normalize_plane(restored.view(), lo, hi)))
}

/// Restore a degraded image with the Wiener filter
/// `F = (conj(H) / (|H|^2 + K)) * G`.
///
/// With `K = 0` and a well-conditioned OTF this degenerates to the
/// unregularized inverse filter.
///
/// # Arguments
/// * `degraded` - Grayscale degraded observation
/// * `psf` - PSF of the blur being undone
/// * `filter` - Regularization constant
///
/// # Returns
/// Restored image normalized into 0-255
pub fn wiener_filter(
    degraded: ArrayView3<f64>,
    psf: &MotionBlurPsf,
    filter: &WienerFilter,
) -> Result<Array3<f64>> {
    expect_grayscale(degraded)?;
    let plane = channel_plane(degraded, 0);
    let (height, width) = plane.dim();
    debug!("wiener restoration, K = {}", filter.k);

    let observed = fft::forward(plane.view())?;
    let otf = psf.otf(height, width)?;

    let numerator = otf.conj();
    let denominator = otf.mul(&otf.conj())?.add_real(filter.k);
    let estimate = numerator.div(&denominator)?.mul(&observed)?;

    let restored = fft::inverse(&estimate)?;
    let (lo, hi) = DISPLAY_RANGE;
    Ok(plane_to_image(normalize_plane(restored.view(), lo, hi)))
}
