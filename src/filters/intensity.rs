//! Gray-level intensity transforms.

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};
use crate::image::expect_grayscale;

/// Linear transform `v -> k * v + b`.
///
/// # Arguments
/// * `input` - Grayscale image
/// * `k` - Gain
/// * `b` - Offset
///
/// # Returns
/// Transformed image; values are not clamped
pub fn linear(input: ArrayView3<f64>, k: f64, b: f64) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    if !k.is_finite() || !b.is_finite() {
        return Err(FilterError::invalid_parameter(
            "k",
            format!("gain and offset must be finite, got k = {k}, b = {b}"),
        ));
    }
    Ok(input.mapv(|v| k * v + b))
}

/// Three-segment piecewise-linear transform over the 0-255 range.
///
/// Control points `(r1, s1)` and `(r2, s2)` split the range into three
/// segments: `[0, r1)` maps onto `[0, s1)`, `[r1, r2)` onto `[s1, s2)`, and
/// `[r2, 255]` onto `[s2, 255]`.
///
/// # Arguments
/// * `input` - Grayscale image
/// * `r1`, `s1` - First control point, `0 < r1 < r2`
/// * `r2`, `s2` - Second control point, `r2 < 255`
///
/// # Returns
/// Transformed image
pub fn piecewise_linear(
    input: ArrayView3<f64>,
    r1: f64,
    s1: f64,
    r2: f64,
    s2: f64,
) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    if !(r1 > 0.0 && r1 < r2 && r2 < 255.0) {
        return Err(FilterError::invalid_parameter(
            "r1",
            format!("control points must satisfy 0 < r1 < r2 < 255, got r1 = {r1}, r2 = {r2}"),
        ));
    }
    if !(0.0..=255.0).contains(&s1) || !(0.0..=255.0).contains(&s2) {
        return Err(FilterError::invalid_parameter(
            "s1",
            format!("target levels must lie in 0-255, got s1 = {s1}, s2 = {s2}"),
        ));
    }

    Ok(input.mapv(|v| {
        if v < r1 {
            s1 / r1 * v
        } else if v < r2 {
            (s2 - s1) / (r2 - r1) * (v - r1) + s1
        } else {
            (255.0 - s2) / (255.0 - r2) * (v - r2) + s2
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array3;

    #[test]
    fn test_linear_identity() {
        let img = Array3::from_shape_fn((2, 2, 1), |(y, x, _)| (y * 2 + x) as f64 * 10.0);
        let result = linear(img.view(), 1.0, 0.0).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_linear_gain_and_offset() {
        let img = Array3::from_elem((1, 1, 1), 50.0);
        let result = linear(img.view(), 2.0, 5.0).unwrap();
        assert_relative_eq!(result[[0, 0, 0]], 105.0);
    }

    #[test]
    fn test_piecewise_fixes_endpoints_and_knees() {
        let levels = [0.0, 64.0, 192.0, 255.0];
        let img = Array3::from_shape_fn((1, 4, 1), |(_, x, _)| levels[x]);

        let result = piecewise_linear(img.view(), 64.0, 32.0, 192.0, 224.0).unwrap();

        assert_relative_eq!(result[[0, 0, 0]], 0.0);
        assert_relative_eq!(result[[0, 1, 0]], 32.0);
        assert_relative_eq!(result[[0, 2, 0]], 224.0);
        assert_relative_eq!(result[[0, 3, 0]], 255.0);
    }

    #[test]
    fn test_piecewise_stretches_midtones() {
        // Contrast stretch: midtone segment steeper than 1.
        let img = Array3::from_elem((1, 1, 1), 128.0);
        let result = piecewise_linear(img.view(), 64.0, 32.0, 192.0, 224.0).unwrap();

        // (224-32)/(192-64) = 1.5 slope around the center
        assert_relative_eq!(result[[0, 0, 0]], 32.0 + 1.5 * 64.0);
    }

    #[test]
    fn test_piecewise_rejects_unordered_control_points() {
        let img = Array3::<f64>::zeros((1, 1, 1));
        assert!(piecewise_linear(img.view(), 192.0, 32.0, 64.0, 224.0).is_err());
        assert!(piecewise_linear(img.view(), 0.0, 32.0, 64.0, 224.0).is_err());
    }

    #[test]
    fn test_rgb_rejected() {
        let img = Array3::<f64>::zeros((2, 2, 3));
        assert!(linear(img.view(), 1.0, 0.0).is_err());
    }
}
