//! Grayscale conversion and pseudocolor mapping.

use ndarray::{Array3, ArrayView3};

use crate::error::Result;
use crate::image::{expect_grayscale, expect_rgb};

/// RGB weights used for luma conversion.
///
/// The workbench default is the integer approximation `(11 R + 16 G + 5 B) / 32`.
#[derive(Debug, Clone, Copy)]
pub struct GrayscaleWeights {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl GrayscaleWeights {
    /// Custom weights, normalized so they sum to 1.
    pub fn custom(r: f64, g: f64, b: f64) -> Self {
        let sum = r + g + b;
        GrayscaleWeights {
            r: r / sum,
            g: g / sum,
            b: b / sum,
        }
    }
}

impl Default for GrayscaleWeights {
    fn default() -> Self {
        GrayscaleWeights {
            r: 11.0 / 32.0,
            g: 16.0 / 32.0,
            b: 5.0 / 32.0,
        }
    }
}

/// Convert an RGB image to single-channel grayscale.
///
/// # Arguments
/// * `input` - RGB image (height, width, 3)
/// * `weights` - Channel weights; `GrayscaleWeights::default()` for the
///   workbench's integer luma
///
/// # Returns
/// Grayscale image (height, width, 1)
pub fn rgb_to_gray(input: ArrayView3<f64>, weights: GrayscaleWeights) -> Result<Array3<f64>> {
    expect_rgb(input)?;
    let (height, width, _) = input.dim();

    Ok(Array3::from_shape_fn((height, width, 1), |(y, x, _)| {
        weights.r * input[[y, x, 0]] + weights.g * input[[y, x, 1]] + weights.b * input[[y, x, 2]]
    }))
}

/// Map a grayscale image to RGB pseudocolor.
///
/// Each channel applies its own piecewise-linear ramp over the 0-255 input
/// range: blue covers the dark band, green the midtones, red the highlights.
///
/// # Arguments
/// * `input` - Grayscale image
///
/// # Returns
/// RGB image (height, width, 3)
pub fn pseudocolor(input: ArrayView3<f64>) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    let (height, width, _) = input.dim();

    Ok(Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        let v = input[[y, x, 0]];
        match c {
            0 => {
                // Red: off in shadows, ramps up across the midtones.
                if v < 128.0 {
                    0.0
                } else if v < 200.0 {
                    255.0 / 72.0 * (v - 128.0)
                } else {
                    255.0
                }
            }
            1 => {
                // Green: peaks in the midtones.
                if v < 64.0 {
                    255.0 / 64.0 * v
                } else if v < 200.0 {
                    255.0
                } else {
                    -255.0 / 55.0 * (v - 200.0) + 255.0
                }
            }
            _ => {
                // Blue: strongest in the shadows.
                if v < 64.0 {
                    255.0
                } else if v < 128.0 {
                    -255.0 / 64.0 * (v - 64.0) + 255.0
                } else {
                    0.0
                }
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array3;

    #[test]
    fn test_default_weights_match_integer_luma() {
        let mut img = Array3::<f64>::zeros((1, 1, 3));
        img[[0, 0, 0]] = 96.0;
        img[[0, 0, 1]] = 64.0;
        img[[0, 0, 2]] = 32.0;

        let gray = rgb_to_gray(img.view(), GrayscaleWeights::default()).unwrap();

        // (96*11 + 64*16 + 32*5) / 32 = 70
        assert_relative_eq!(gray[[0, 0, 0]], 70.0);
    }

    #[test]
    fn test_custom_weights_are_normalized() {
        let weights = GrayscaleWeights::custom(2.0, 2.0, 4.0);
        assert_relative_eq!(weights.r + weights.g + weights.b, 1.0);

        let img = Array3::from_elem((1, 1, 3), 80.0);
        let gray = rgb_to_gray(img.view(), weights).unwrap();
        assert_relative_eq!(gray[[0, 0, 0]], 80.0);
    }

    #[test]
    fn test_gray_input_rejected() {
        let img = Array3::<f64>::zeros((2, 2, 1));
        assert!(rgb_to_gray(img.view(), GrayscaleWeights::default()).is_err());
    }

    #[test]
    fn test_pseudocolor_shadow_is_blue() {
        let img = Array3::from_elem((1, 1, 1), 10.0);
        let color = pseudocolor(img.view()).unwrap();

        assert_eq!(color[[0, 0, 0]], 0.0);
        assert_eq!(color[[0, 0, 2]], 255.0);
    }

    #[test]
    fn test_pseudocolor_highlight_is_red() {
        let img = Array3::from_elem((1, 1, 1), 250.0);
        let color = pseudocolor(img.view()).unwrap();

        assert_eq!(color[[0, 0, 0]], 255.0);
        assert_eq!(color[[0, 0, 2]], 0.0);
    }

    #[test]
    fn test_pseudocolor_channels_are_continuous_at_breaks() {
        for v in [63.9, 64.1, 127.9, 128.1, 199.9, 200.1] {
            let img = Array3::from_elem((1, 1, 1), v);
            let color = pseudocolor(img.view()).unwrap();
            for c in 0..3 {
                assert!(color[[0, 0, c]] >= 0.0 && color[[0, 0, c]] <= 255.0);
            }
        }
    }
}
