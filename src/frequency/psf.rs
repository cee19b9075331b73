//! Point-spread function generation.
//!
//! Motion blur is modeled as a unit-weight line through the center of an
//! odd-sized square kernel, rotated to the blur direction and normalized so
//! the weights sum to one (the GNU Octave `fspecial("motion", ..)` recipe).

use ndarray::{s, Array2};

use crate::error::{FilterError, Result};

use super::fft;
use super::spectrum::ComplexSpectrum;

/// Motion-blur point-spread function: a line of `length` pixels at `angle`
/// degrees.
#[derive(Debug, Clone, Copy)]
pub struct MotionBlurPsf {
    length: usize,
    angle: f64,
}

impl MotionBlurPsf {
    pub fn new(length: usize, angle: f64) -> Result<Self> {
        if length == 0 {
            return Err(FilterError::invalid_parameter("length", "must be at least 1"));
        }
        if !angle.is_finite() {
            return Err(FilterError::invalid_parameter(
                "angle",
                format!("must be finite, got {angle}"),
            ));
        }
        Ok(MotionBlurPsf { length, angle })
    }

    /// Build the spatial kernel.
    ///
    /// An even length is bumped to the next odd value so the kernel center is
    /// well-defined. The kernel starts as a horizontal unit line through the
    /// middle row, is rotated by the negative of the requested angle
    /// (nearest-neighbor about the center, corners cropped), and is divided
    /// by its total weight so the sum is exactly 1. Length 1 yields the 1x1
    /// identity kernel.
    pub fn kernel(&self) -> Array2<f64> {
        let len = if self.length % 2 == 0 {
            self.length + 1
        } else {
            self.length
        };

        let mut psf = Array2::<f64>::zeros((len, len));
        for x in 0..len {
            psf[[len / 2, x]] = 1.0;
        }

        let mut psf = rotate_kernel(&psf, -self.angle);
        let sum = psf.sum();
        psf.mapv_inplace(|v| v / sum);
        psf
    }

    /// Optical transfer function of this PSF on a `(height, width)` grid.
    ///
    /// The kernel is zero-padded to the image dimensions (anchored at the
    /// top-left) and forward-transformed. Fails with `DimensionMismatch` if
    /// the kernel does not fit inside the grid.
    pub fn otf(&self, height: usize, width: usize) -> Result<ComplexSpectrum> {
        psf_to_otf(self.kernel().view(), height, width)
    }
}

/// Zero-pad a spatial kernel to `(height, width)` and forward-transform it.
pub fn psf_to_otf(
    kernel: ndarray::ArrayView2<f64>,
    height: usize,
    width: usize,
) -> Result<ComplexSpectrum> {
    let (kh, kw) = kernel.dim();
    if kh > height || kw > width {
        return Err(FilterError::DimensionMismatch {
            expected: (height, width),
            actual: (kh, kw),
        });
    }

    let mut padded = Array2::<f64>::zeros((height, width));
    padded.slice_mut(s![..kh, ..kw]).assign(&kernel);
    fft::forward(padded.view())
}

/// Rotate a square kernel about its center by `degrees` (counterclockwise),
/// sampling nearest-neighbor. Cells rotated outside the kernel are dropped;
/// the size does not change.
fn rotate_kernel(kernel: &Array2<f64>, degrees: f64) -> Array2<f64> {
    let n = kernel.nrows();
    let center = (n / 2) as f64;
    let (sin, cos) = degrees.to_radians().sin_cos();

    Array2::from_shape_fn((n, n), |(y, x)| {
        let dy = y as f64 - center;
        let dx = x as f64 - center;
        // Inverse rotation maps each destination cell onto the source grid.
        let sx = (cos * dx + sin * dy + center).round();
        let sy = (-sin * dx + cos * dy + center).round();
        if sx >= 0.0 && sy >= 0.0 && (sx as usize) < n && (sy as usize) < n {
            kernel[[sy as usize, sx as usize]]
        } else {
            0.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_one_is_identity_kernel() {
        for angle in [0.0, 30.0, 45.0, 90.0, 123.4] {
            let psf = MotionBlurPsf::new(1, angle).unwrap();
            let kernel = psf.kernel();

            assert_eq!(kernel.dim(), (1, 1));
            assert_eq!(kernel[[0, 0]], 1.0);
        }
    }

    #[test]
    fn test_weights_always_sum_to_one() {
        for length in [2, 3, 5, 9, 14] {
            for angle in [0.0, 15.0, 45.0, 60.0, 90.0, 180.0, -30.0] {
                let psf = MotionBlurPsf::new(length, angle).unwrap();
                let sum = psf.kernel().sum();
                assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_even_length_bumped_to_odd() {
        let psf = MotionBlurPsf::new(4, 0.0).unwrap();
        assert_eq!(psf.kernel().dim(), (5, 5));
    }

    #[test]
    fn test_zero_angle_is_horizontal_line() {
        let psf = MotionBlurPsf::new(5, 0.0).unwrap();
        let kernel = psf.kernel();

        for x in 0..5 {
            assert_relative_eq!(kernel[[2, x]], 0.2);
        }
        assert_eq!(kernel[[0, 0]], 0.0);
    }

    #[test]
    fn test_ninety_degrees_is_vertical_line() {
        let psf = MotionBlurPsf::new(5, 90.0).unwrap();
        let kernel = psf.kernel();

        for y in 0..5 {
            assert_relative_eq!(kernel[[y, 2]], 0.2);
        }
        assert_eq!(kernel[[2, 0]], 0.0);
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(MotionBlurPsf::new(0, 0.0).is_err());
    }

    #[test]
    fn test_otf_dc_term_is_kernel_sum() {
        let psf = MotionBlurPsf::new(3, 0.0).unwrap();
        let otf = psf.otf(8, 8).unwrap();

        // Normalized kernel: the DC coefficient equals the weight sum, 1.
        assert_relative_eq!(otf.re[[0, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(otf.im[[0, 0]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_oversized_kernel_rejected() {
        let psf = MotionBlurPsf::new(9, 0.0).unwrap();
        assert!(psf.otf(4, 4).is_err());
    }
}
