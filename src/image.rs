//! Shared image-buffer helpers.
//!
//! Images are `ndarray` arrays shaped `(height, width, channels)` with `f64`
//! samples; channels is 1 (grayscale) or 3 (RGB). These helpers centralize
//! the channel and dimension checks every filter performs before touching
//! pixel data.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

use crate::error::{FilterError, Result};

/// Returns true for a single-channel image.
pub fn is_grayscale(input: ArrayView3<f64>) -> bool {
    input.dim().2 == 1
}

/// Returns true for a three-channel image.
pub fn is_rgb(input: ArrayView3<f64>) -> bool {
    input.dim().2 == 3
}

/// Returns true if every sample is exactly 0 or 255.
///
/// Logic operators (AND/OR/XOR) only accept such images.
pub fn is_binary(input: ArrayView3<f64>) -> bool {
    is_grayscale(input) && input.iter().all(|&v| v == 0.0 || v == 255.0)
}

/// Reject images that are not single-channel.
pub(crate) fn expect_grayscale(input: ArrayView3<f64>) -> Result<()> {
    let channels = input.dim().2;
    if channels != 1 {
        return Err(FilterError::InvalidChannelCount {
            expected: 1,
            actual: channels,
        });
    }
    Ok(())
}

/// Reject images that are not three-channel.
pub(crate) fn expect_rgb(input: ArrayView3<f64>) -> Result<()> {
    let channels = input.dim().2;
    if channels != 3 {
        return Err(FilterError::InvalidChannelCount {
            expected: 3,
            actual: channels,
        });
    }
    Ok(())
}

/// Reject empty planes.
pub(crate) fn expect_nonempty(height: usize, width: usize) -> Result<()> {
    if height == 0 || width == 0 {
        return Err(FilterError::DimensionMismatch {
            expected: (1, 1),
            actual: (height, width),
        });
    }
    Ok(())
}

/// Reject pairs of images that do not share height/width.
pub(crate) fn expect_same_dims(a: ArrayView3<f64>, b: ArrayView3<f64>) -> Result<()> {
    let (ah, aw, _) = a.dim();
    let (bh, bw, _) = b.dim();
    if (ah, aw) != (bh, bw) {
        return Err(FilterError::DimensionMismatch {
            expected: (ah, aw),
            actual: (bh, bw),
        });
    }
    Ok(())
}

/// Extract one channel as an owned 2D plane.
pub fn channel_plane(input: ArrayView3<f64>, channel: usize) -> Array2<f64> {
    input.index_axis(Axis(2), channel).to_owned()
}

/// Wrap a 2D plane back into a single-channel image.
pub fn plane_to_image(plane: Array2<f64>) -> Array3<f64> {
    plane.insert_axis(Axis(2))
}

/// Mean sample value of one plane.
pub fn plane_mean(plane: ArrayView2<f64>) -> f64 {
    let n = plane.len();
    if n == 0 {
        return 0.0;
    }
    plane.sum() / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_channel_predicates() {
        let gray = Array3::<f64>::zeros((2, 2, 1));
        let rgb = Array3::<f64>::zeros((2, 2, 3));

        assert!(is_grayscale(gray.view()));
        assert!(!is_grayscale(rgb.view()));
        assert!(is_rgb(rgb.view()));
        assert!(!is_rgb(gray.view()));
    }

    #[test]
    fn test_expect_grayscale_rejects_rgb() {
        let rgb = Array3::<f64>::zeros((2, 2, 3));
        assert_eq!(
            expect_grayscale(rgb.view()),
            Err(FilterError::InvalidChannelCount {
                expected: 1,
                actual: 3
            })
        );
    }

    #[test]
    fn test_is_binary() {
        let mut img = Array3::<f64>::zeros((2, 2, 1));
        img[[0, 0, 0]] = 255.0;
        assert!(is_binary(img.view()));

        img[[1, 1, 0]] = 128.0;
        assert!(!is_binary(img.view()));
    }

    #[test]
    fn test_plane_round_trip() {
        let mut img = Array3::<f64>::zeros((2, 3, 1));
        img[[1, 2, 0]] = 7.0;

        let plane = channel_plane(img.view(), 0);
        assert_eq!(plane[[1, 2]], 7.0);

        let back = plane_to_image(plane);
        assert_eq!(back.dim(), (2, 3, 1));
        assert_eq!(back[[1, 2, 0]], 7.0);
    }
}
