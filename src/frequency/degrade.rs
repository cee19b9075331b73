//! Degradation model: synthetic blur and noise.
//!
//! Blur is applied in the frequency domain by multiplying the image spectrum
//! with the optical transfer function of a PSF; noise is zero-mean Gaussian
//! added to the spatial result. Degradations produced here are what the
//! restoration filters are asked to undo.

use ndarray::{Array2, Array3, ArrayView3};

use crate::error::{FilterError, Result};
use crate::filters::convolve::convolve;
use crate::image::{channel_plane, expect_grayscale, plane_to_image};
use crate::normalize::{normalize_image, normalize_plane, DISPLAY_RANGE};

use super::fft;
use super::psf::MotionBlurPsf;
use super::transfer::TurbulenceBlur;

// ============================================================================
// Deterministic noise source
// ============================================================================

/// Simple linear congruential generator for deterministic noise.
/// Uses MINSTD parameters.
struct NoiseRng {
    state: u64,
}

impl NoiseRng {
    fn new(seed: u64) -> Self {
        NoiseRng {
            state: seed.wrapping_add(1), // Avoid zero
        }
    }

    fn next_u32(&mut self) -> u32 {
        // MINSTD LCG
        self.state = self.state.wrapping_mul(48271).wrapping_add(1) % 2147483647;
        self.state as u32
    }

    /// Generate uniform random f64 in [0, 1).
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 2147483647.0
    }

    /// Generate standard-normal random f64 using Box-Muller transform.
    fn next_gaussian(&mut self) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Zero-mean Gaussian noise of a given variance, seeded for determinism.
#[derive(Debug, Clone, Copy)]
pub struct GaussianNoise {
    variance: f64,
    seed: u64,
}

impl GaussianNoise {
    pub fn new(variance: f64, seed: u64) -> Result<Self> {
        if !(variance >= 0.0) || !variance.is_finite() {
            return Err(FilterError::invalid_parameter(
                "variance",
                format!("must be finite and non-negative, got {variance}"),
            ));
        }
        Ok(GaussianNoise { variance, seed })
    }

    fn apply(&self, plane: &mut Array2<f64>) {
        let sigma = self.variance.sqrt();
        let mut rng = NoiseRng::new(self.seed);
        plane.mapv_inplace(|v| v + rng.next_gaussian() * sigma);
    }
}

// ============================================================================
// Degradation operations
// ============================================================================

/// Simulate a degraded observation: blur by the PSF's optical transfer
/// function, then optionally add Gaussian noise.
///
/// # Arguments
/// * `input` - Grayscale image
/// * `psf` - Point-spread function of the simulated blur
/// * `noise` - Optional additive noise applied after the blur
///
/// # Returns
/// Degraded image normalized into 0-255
pub fn degrade(
    input: ArrayView3<f64>,
    psf: &MotionBlurPsf,
    noise: Option<&GaussianNoise>,
) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    let plane = channel_plane(input, 0);
    let (height, width) = plane.dim();

    let spectrum = fft::forward(plane.view())?;
    let otf = psf.otf(height, width)?;
    let mut blurred = fft::inverse(&spectrum.mul(&otf)?)?;

    if let Some(noise) = noise {
        noise.apply(&mut blurred);
    }

    let (lo, hi) = DISPLAY_RANGE;
    Ok(plane_to_image(normalize_plane(blurred.view(), lo, hi)))
}

/// Motion-blur an image by spatial convolution with the PSF kernel.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels
/// * `psf` - Motion-blur point-spread function
///
/// # Returns
/// Blurred image normalized into 0-255
pub fn motion_blur(input: ArrayView3<f64>, psf: &MotionBlurPsf) -> Result<Array3<f64>> {
    let kernel = psf.kernel();
    let blurred = convolve(input, kernel.view())?;
    let (lo, hi) = DISPLAY_RANGE;
    Ok(normalize_image(blurred.view(), lo, hi))
}

/// Add zero-mean Gaussian noise to an image.
///
/// # Arguments
/// * `input` - Grayscale image
/// * `noise` - Noise variance and seed
///
/// # Returns
/// Noisy image normalized into 0-255
pub fn gaussian_noise(input: ArrayView3<f64>, noise: &GaussianNoise) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    let mut plane = channel_plane(input, 0);
    noise.apply(&mut plane);
    let (lo, hi) = DISPLAY_RANGE;
    Ok(plane_to_image(normalize_plane(plane.view(), lo, hi)))
}

/// Simulate atmospheric turbulence blur, `H = exp(-k * D^(5/6))` over the
/// centered spectrum.
///
/// # Arguments
/// * `input` - Grayscale image
/// * `blur` - Turbulence severity constant
///
/// # Returns
/// Blurred image normalized into 0-255
pub fn turbulence_blur(input: ArrayView3<f64>, blur: &TurbulenceBlur) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    let plane = channel_plane(input, 0);
    let (height, width) = plane.dim();

    let centered = fft::shift(&fft::forward(plane.view())?);
    let transfer = blur.transfer(height, width);
    let filtered = fft::unshift(&centered.mul_plane(transfer.view())?);
    let restored = fft::inverse(&filtered)?;

    let (lo, hi) = DISPLAY_RANGE;
    Ok(plane_to_image(normalize_plane(restored.view(), lo, hi)))
}
