//! Pixel-wise arithmetic and logic between two images.
//!
//! Arithmetic operations require matching dimensions and channel counts and
//! reject mismatches instead of resizing. Logic operations additionally
//! require binary images (every sample 0 or 255).

use ndarray::{Array3, ArrayView3, Zip};

use crate::error::{FilterError, Result};
use crate::image::{expect_same_dims, is_binary};
use crate::normalize::{normalize_image, DISPLAY_RANGE};

use crate::frequency::spectrum::DIVISION_FLOOR;

fn expect_same_shape(a: ArrayView3<f64>, b: ArrayView3<f64>) -> Result<()> {
    expect_same_dims(a, b)?;
    let (ac, bc) = (a.dim().2, b.dim().2);
    if ac != bc {
        return Err(FilterError::InvalidChannelCount {
            expected: ac,
            actual: bc,
        });
    }
    Ok(())
}

fn expect_binary_pair(a: ArrayView3<f64>, b: ArrayView3<f64>) -> Result<()> {
    expect_same_shape(a, b)?;
    if !is_binary(a) || !is_binary(b) {
        return Err(FilterError::invalid_parameter(
            "input",
            "logic operators require binary images (samples 0 or 255)",
        ));
    }
    Ok(())
}

fn combine(
    a: ArrayView3<f64>,
    b: ArrayView3<f64>,
    op: impl Fn(f64, f64) -> f64,
) -> Array3<f64> {
    let mut output = Array3::zeros(a.dim());
    Zip::from(&mut output)
        .and(&a)
        .and(&b)
        .for_each(|out, &x, &y| *out = op(x, y));
    output
}

// ============================================================================
// Arithmetic
// ============================================================================

/// Blend two images by averaging them.
pub fn add(a: ArrayView3<f64>, b: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_same_shape(a, b)?;
    Ok(combine(a, b, |x, y| (x + y) / 2.0))
}

/// Subtract the second image from the first.
pub fn subtract(a: ArrayView3<f64>, b: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_same_shape(a, b)?;
    Ok(combine(a, b, |x, y| x - y))
}

/// Multiply two images sample by sample.
pub fn multiply(a: ArrayView3<f64>, b: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_same_shape(a, b)?;
    Ok(combine(a, b, |x, y| x * y))
}

/// Divide the first image by the second, sample by sample, and normalize
/// the quotient into 0-255.
///
/// Near-zero divisors are clamped to an epsilon floor, so flat dark regions
/// in the divisor produce large but finite quotients.
pub fn divide(a: ArrayView3<f64>, b: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_same_shape(a, b)?;
    let quotient = combine(a, b, |x, y| {
        let y = if y.abs() < DIVISION_FLOOR {
            DIVISION_FLOOR.copysign(y)
        } else {
            y
        };
        x / y
    });
    let (lo, hi) = DISPLAY_RANGE;
    Ok(normalize_image(quotient.view(), lo, hi))
}

/// Invert intensities: `255 - v`.
pub fn negative(input: ArrayView3<f64>) -> Array3<f64> {
    input.mapv(|v| 255.0 - v)
}

// ============================================================================
// Logic (binary images)
// ============================================================================

/// Pixel-wise AND of two binary images.
pub fn and(a: ArrayView3<f64>, b: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_binary_pair(a, b)?;
    Ok(combine(a, b, |x, y| {
        if x == 255.0 && y == 255.0 {
            255.0
        } else {
            0.0
        }
    }))
}

/// Pixel-wise OR of two binary images.
pub fn or(a: ArrayView3<f64>, b: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_binary_pair(a, b)?;
    Ok(combine(a, b, |x, y| {
        if x == 0.0 && y == 0.0 {
            0.0
        } else {
            255.0
        }
    }))
}

/// Pixel-wise XOR of two binary images.
pub fn xor(a: ArrayView3<f64>, b: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_binary_pair(a, b)?;
    Ok(combine(a, b, |x, y| if x == y { 0.0 } else { 255.0 }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn checker(on: f64, off: f64) -> Array3<f64> {
        Array3::from_shape_fn(
            (2, 2, 1),
            |(y, x, _)| if (x + y) % 2 == 0 { on } else { off },
        )
    }

    #[test]
    fn test_add_averages() {
        let a = Array3::from_elem((2, 2, 1), 100.0);
        let b = Array3::from_elem((2, 2, 1), 200.0);

        let result = add(a.view(), b.view()).unwrap();
        assert!(result.iter().all(|&v| v == 150.0));
    }

    #[test]
    fn test_subtract_self_is_zero() {
        let a = checker(30.0, 90.0);
        let result = subtract(a.view(), a.view()).unwrap();
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_divide_by_self_is_flat() {
        let a = checker(30.0, 90.0);
        let result = divide(a.view(), a.view()).unwrap();

        // Quotient is 1 everywhere; a flat plane normalizes to the midpoint.
        assert!(result.iter().all(|&v| v == 127.5));
    }

    #[test]
    fn test_divide_handles_zero_divisor() {
        let a = Array3::from_elem((1, 2, 1), 10.0);
        let mut b = Array3::from_elem((1, 2, 1), 1.0);
        b[[0, 1, 0]] = 0.0;

        let result = divide(a.view(), b.view()).unwrap();
        assert!(result.iter().all(|&v| v.is_finite()));
    }

    #[test]
    fn test_mismatched_dimensions_rejected() {
        let a = Array3::<f64>::zeros((2, 2, 1));
        let b = Array3::<f64>::zeros((2, 3, 1));
        assert!(add(a.view(), b.view()).is_err());
    }

    #[test]
    fn test_mismatched_channels_rejected() {
        let a = Array3::<f64>::zeros((2, 2, 1));
        let b = Array3::<f64>::zeros((2, 2, 3));
        assert_eq!(
            subtract(a.view(), b.view()),
            Err(FilterError::InvalidChannelCount {
                expected: 1,
                actual: 3
            })
        );
    }

    #[test]
    fn test_logic_tables() {
        let a = checker(255.0, 0.0);
        let b = Array3::from_elem((2, 2, 1), 255.0);

        let anded = and(a.view(), b.view()).unwrap();
        assert_eq!(anded, a);

        let ored = or(a.view(), b.view()).unwrap();
        assert!(ored.iter().all(|&v| v == 255.0));

        let xored = xor(a.view(), b.view()).unwrap();
        assert_eq!(xored, negative(a.view()));
    }

    #[test]
    fn test_logic_rejects_non_binary() {
        let a = checker(255.0, 0.0);
        let b = Array3::from_elem((2, 2, 1), 128.0);
        assert!(and(a.view(), b.view()).is_err());
    }

    #[test]
    fn test_negative_involution() {
        let a = checker(200.0, 55.0);
        assert_eq!(negative(negative(a.view()).view()), a);
    }
}
