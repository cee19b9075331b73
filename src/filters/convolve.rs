//! Spatial convolution filters: box average, custom kernel, Laplacian
//! sharpening.
//!
//! Kernels are odd-sized so the anchor cell is well-defined. Samples outside
//! the image are clamped to the nearest edge pixel.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

use crate::error::{FilterError, Result};

/// Convolve every channel of an image with a 2D kernel.
///
/// # Arguments
/// * `input` - Image with any channel count (height, width, channels)
/// * `kernel` - Odd-sized kernel
///
/// # Returns
/// Convolved image with the same dimensions
pub fn convolve(input: ArrayView3<f64>, kernel: ArrayView2<f64>) -> Result<Array3<f64>> {
    let (kh, kw) = kernel.dim();
    if kh == 0 || kw == 0 || kh % 2 == 0 || kw % 2 == 0 {
        return Err(FilterError::invalid_parameter(
            "kernel",
            format!("dimensions must be odd and non-zero, got {kh}x{kw}"),
        ));
    }

    let (height, width, channels) = input.dim();
    let mut output = Array3::<f64>::zeros((height, width, channels));
    let (ry, rx) = (kh as isize / 2, kw as isize / 2);

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0;
                for ky in 0..kh {
                    let sy = (y as isize + ky as isize - ry).clamp(0, height as isize - 1) as usize;
                    for kx in 0..kw {
                        let sx =
                            (x as isize + kx as isize - rx).clamp(0, width as isize - 1) as usize;
                        sum += input[[sy, sx, c]] * kernel[[ky, kx]];
                    }
                }
                output[[y, x, c]] = sum;
            }
        }
    }

    Ok(output)
}

/// Apply an average (box) filter.
///
/// # Arguments
/// * `input` - Image with any channel count
/// * `size` - Odd window size; every weight is `1 / size^2`
///
/// # Returns
/// Smoothed image with the same dimensions
pub fn average_filter(input: ArrayView3<f64>, size: usize) -> Result<Array3<f64>> {
    let kernel = Array2::from_elem((size, size), 1.0 / (size * size) as f64);
    convolve(input, kernel.view())
}

/// Apply a user-supplied 3x3 kernel.
///
/// If the weights do not sum to zero the kernel is divided by its sum, so
/// smoothing kernels preserve overall brightness; derivative-style kernels
/// (sum zero) are applied as given.
///
/// # Arguments
/// * `input` - Image with any channel count
/// * `weights` - 3x3 kernel weights, row-major
///
/// # Returns
/// Filtered image with the same dimensions
pub fn custom_filter(input: ArrayView3<f64>, weights: [[f64; 3]; 3]) -> Result<Array3<f64>> {
    let mut kernel = Array2::from_shape_fn((3, 3), |(y, x)| weights[y][x]);
    let sum = kernel.sum();
    if sum.abs() > f64::EPSILON {
        kernel.mapv_inplace(|v| v / sum);
    }
    convolve(input, kernel.view())
}

/// Sharpen by adding a scaled Laplacian response to the image.
///
/// # Arguments
/// * `input` - Image with any channel count
/// * `amount` - Weight of the Laplacian term (0.5 is the workbench default)
///
/// # Returns
/// Sharpened image with the same dimensions
pub fn laplacian_sharpen(input: ArrayView3<f64>, amount: f64) -> Result<Array3<f64>> {
    if !amount.is_finite() {
        return Err(FilterError::invalid_parameter(
            "amount",
            format!("must be finite, got {amount}"),
        ));
    }

    let laplacian = ndarray::array![[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];
    let edges = convolve(input, laplacian.view())?;

    let mut output = input.to_owned();
    output.zip_mut_with(&edges, |v, &e| *v += amount * e);
    Ok(output)
}
