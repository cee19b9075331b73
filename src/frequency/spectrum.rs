//! Complex spectrum representation and arithmetic.
//!
//! A spectrum is stored as two same-shaped real planes (real and imaginary
//! part), the layout every frequency-domain filter in the crate works with.
//! All complex arithmetic between spectra goes through this module so that
//! each filter combines planes the same way instead of re-rolling per-cell
//! complex math at its call site.

use ndarray::{Array2, ArrayView2, Zip};
use num_complex::Complex64;

use crate::error::{FilterError, Result};
use crate::image::expect_nonempty;

/// Denominator floor for spectral division.
///
/// Cells whose magnitude falls below this are clamped before dividing, so a
/// near-zero transfer function amplifies the numerator by a large but finite
/// factor instead of producing infinities.
pub(crate) const DIVISION_FLOOR: f64 = 1.4901161193847656e-8; // sqrt(f64::EPSILON)

/// One Fourier-transform pair of a single channel: two same-dimensioned real
/// planes holding the real and imaginary parts.
#[derive(Debug, Clone)]
pub struct ComplexSpectrum {
    pub re: Array2<f64>,
    pub im: Array2<f64>,
}

impl ComplexSpectrum {
    /// Zero-valued spectrum of the given shape.
    pub fn zeros(height: usize, width: usize) -> Self {
        ComplexSpectrum {
            re: Array2::zeros((height, width)),
            im: Array2::zeros((height, width)),
        }
    }

    /// Spectrum of a purely real plane (imaginary part all zero).
    pub fn from_plane(plane: ArrayView2<f64>) -> Self {
        let (height, width) = plane.dim();
        ComplexSpectrum {
            re: plane.to_owned(),
            im: Array2::zeros((height, width)),
        }
    }

    /// Build a spectrum from an existing real/imaginary plane pair.
    ///
    /// Fails with `DimensionMismatch` if the planes disagree in shape or are
    /// empty.
    pub fn from_planes(re: Array2<f64>, im: Array2<f64>) -> Result<Self> {
        if re.dim() != im.dim() {
            return Err(FilterError::DimensionMismatch {
                expected: re.dim(),
                actual: im.dim(),
            });
        }
        expect_nonempty(re.dim().0, re.dim().1)?;
        Ok(ComplexSpectrum { re, im })
    }

    /// `(height, width)` of both planes.
    pub fn dim(&self) -> (usize, usize) {
        self.re.dim()
    }

    #[inline]
    pub fn at(&self, y: usize, x: usize) -> Complex64 {
        Complex64::new(self.re[[y, x]], self.im[[y, x]])
    }

    #[inline]
    pub fn set(&mut self, y: usize, x: usize, value: Complex64) {
        self.re[[y, x]] = value.re;
        self.im[[y, x]] = value.im;
    }

    /// Cell-wise complex product.
    pub fn mul(&self, other: &ComplexSpectrum) -> Result<ComplexSpectrum> {
        self.expect_same_dim(other)?;
        let mut result = ComplexSpectrum::zeros(self.dim().0, self.dim().1);
        Zip::from(&mut result.re)
            .and(&mut result.im)
            .and(&self.re)
            .and(&self.im)
            .and(&other.re)
            .and(&other.im)
            .for_each(|re, im, &ar, &ai, &br, &bi| {
                *re = ar * br - ai * bi;
                *im = ai * br + ar * bi;
            });
        Ok(result)
    }

    /// Cell-wise complex quotient with the denominator clamped to the
    /// internal epsilon floor, so degenerate cells never surface as errors.
    pub fn div(&self, other: &ComplexSpectrum) -> Result<ComplexSpectrum> {
        self.expect_same_dim(other)?;
        let (height, width) = self.dim();
        let mut result = ComplexSpectrum::zeros(height, width);
        for y in 0..height {
            for x in 0..width {
                let den = guard_denominator(other.at(y, x));
                result.set(y, x, self.at(y, x) / den);
            }
        }
        Ok(result)
    }

    /// Cell-wise complex conjugate.
    pub fn conj(&self) -> ComplexSpectrum {
        ComplexSpectrum {
            re: self.re.clone(),
            im: self.im.mapv(|v| -v),
        }
    }

    /// Add a real constant to every cell.
    pub fn add_real(&self, value: f64) -> ComplexSpectrum {
        ComplexSpectrum {
            re: self.re.mapv(|v| v + value),
            im: self.im.clone(),
        }
    }

    /// Cell-wise product with a real-valued transfer function.
    pub fn mul_plane(&self, transfer: ArrayView2<f64>) -> Result<ComplexSpectrum> {
        if self.dim() != transfer.dim() {
            return Err(FilterError::DimensionMismatch {
                expected: self.dim(),
                actual: transfer.dim(),
            });
        }
        let mut result = self.clone();
        Zip::from(&mut result.re).and(&transfer).for_each(|v, &h| *v *= h);
        Zip::from(&mut result.im).and(&transfer).for_each(|v, &h| *v *= h);
        Ok(result)
    }

    /// `|z|` per cell.
    pub fn magnitude(&self) -> Array2<f64> {
        let mut out = Array2::zeros(self.dim());
        Zip::from(&mut out)
            .and(&self.re)
            .and(&self.im)
            .for_each(|m, &re, &im| *m = re.hypot(im));
        out
    }

    /// `|z|^2` per cell.
    pub fn norm_sqr(&self) -> Array2<f64> {
        let mut out = Array2::zeros(self.dim());
        Zip::from(&mut out)
            .and(&self.re)
            .and(&self.im)
            .for_each(|m, &re, &im| *m = re * re + im * im);
        out
    }

    /// Keep each cell's magnitude, resetting the phase to zero.
    pub fn keep_magnitude(&self) -> ComplexSpectrum {
        ComplexSpectrum {
            re: self.magnitude(),
            im: Array2::zeros(self.dim()),
        }
    }

    /// Keep each cell's phase, resetting the magnitude to one.
    pub fn keep_phase(&self) -> ComplexSpectrum {
        let (height, width) = self.dim();
        let mut result = ComplexSpectrum::zeros(height, width);
        for y in 0..height {
            for x in 0..width {
                result.set(y, x, Complex64::from_polar(1.0, self.at(y, x).arg()));
            }
        }
        result
    }

    fn expect_same_dim(&self, other: &ComplexSpectrum) -> Result<()> {
        if self.dim() != other.dim() {
            return Err(FilterError::DimensionMismatch {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        Ok(())
    }
}

/// Clamp a near-zero denominator to the epsilon floor, as a positive real.
#[inline]
pub(crate) fn guard_denominator(value: Complex64) -> Complex64 {
    if value.norm() < DIVISION_FLOOR {
        Complex64::new(DIVISION_FLOOR, 0.0)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn spectrum(re: Array2<f64>, im: Array2<f64>) -> ComplexSpectrum {
        ComplexSpectrum::from_planes(re, im).unwrap()
    }

    #[test]
    fn test_mul_matches_complex_product() {
        let a = spectrum(array![[1.0, 2.0]], array![[3.0, -1.0]]);
        let b = spectrum(array![[2.0, 0.5]], array![[-1.0, 4.0]]);

        let c = a.mul(&b).unwrap();

        // (1+3i)(2-1i) = 5+5i
        assert_relative_eq!(c.re[[0, 0]], 5.0);
        assert_relative_eq!(c.im[[0, 0]], 5.0);
        // (2-1i)(0.5+4i) = 5+7.5i
        assert_relative_eq!(c.re[[0, 1]], 5.0);
        assert_relative_eq!(c.im[[0, 1]], 7.5);
    }

    #[test]
    fn test_div_then_mul_round_trips() {
        let a = spectrum(array![[4.0, -2.0]], array![[1.0, 3.0]]);
        let b = spectrum(array![[2.0, 1.0]], array![[-1.0, 1.0]]);

        let q = a.div(&b).unwrap();
        let back = q.mul(&b).unwrap();

        for (x, y) in a.re.iter().zip(back.re.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
        for (x, y) in a.im.iter().zip(back.im.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_div_clamps_zero_denominator() {
        let a = spectrum(array![[1.0]], array![[0.0]]);
        let b = ComplexSpectrum::zeros(1, 1);

        let q = a.div(&b).unwrap();

        assert!(q.re[[0, 0]].is_finite());
        assert_relative_eq!(q.re[[0, 0]], 1.0 / DIVISION_FLOOR);
    }

    #[test]
    fn test_conj_negates_imaginary_plane() {
        let a = spectrum(array![[1.0, 2.0]], array![[3.0, -4.0]]);
        let c = a.conj();

        assert_eq!(c.re, a.re);
        assert_eq!(c.im, array![[-3.0, 4.0]]);
    }

    #[test]
    fn test_keep_magnitude_and_phase_factorize() {
        let a = spectrum(array![[3.0]], array![[4.0]]);

        let mag = a.keep_magnitude();
        let phase = a.keep_phase();
        let back = mag.mul(&phase).unwrap();

        assert_relative_eq!(back.re[[0, 0]], 3.0, epsilon = 1e-12);
        assert_relative_eq!(back.im[[0, 0]], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mismatched_planes_rejected() {
        let re = Array2::<f64>::zeros((2, 2));
        let im = Array2::<f64>::zeros((2, 3));
        assert!(ComplexSpectrum::from_planes(re, im).is_err());
    }
}
