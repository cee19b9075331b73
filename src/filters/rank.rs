//! Rank-order filters: median, maximum, minimum.
//!
//! All three slide a square window over the image and replace the center
//! pixel with an order statistic of the window. Out-of-bounds samples are
//! clamped to the nearest edge pixel.

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};

fn rank_filter(
    input: ArrayView3<f64>,
    size: usize,
    pick: impl Fn(&mut Vec<f64>) -> f64,
) -> Result<Array3<f64>> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::invalid_parameter(
            "size",
            format!("window size must be odd and non-zero, got {size}"),
        ));
    }

    let (height, width, channels) = input.dim();
    let mut output = Array3::<f64>::zeros((height, width, channels));
    let radius = (size / 2) as isize;

    let mut window = Vec::with_capacity(size * size);
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                window.clear();
                for dy in -radius..=radius {
                    let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                    for dx in -radius..=radius {
                        let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                        window.push(input[[sy, sx, c]]);
                    }
                }
                output[[y, x, c]] = pick(&mut window);
            }
        }
    }

    Ok(output)
}

/// Apply a median filter.
///
/// Removes salt-and-pepper noise while preserving edges.
///
/// # Arguments
/// * `input` - Image with any channel count
/// * `size` - Odd window size
///
/// # Returns
/// Median-filtered image with the same dimensions
pub fn median_filter(input: ArrayView3<f64>, size: usize) -> Result<Array3<f64>> {
    rank_filter(input, size, |window| {
        window.sort_by(|a, b| a.partial_cmp(b).unwrap());
        window[window.len() / 2]
    })
}

/// Apply a maximum filter: each pixel becomes the brightest value in its
/// window, growing bright regions.
pub fn maximum_filter(input: ArrayView3<f64>, size: usize) -> Result<Array3<f64>> {
    rank_filter(input, size, |window| {
        window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Apply a minimum filter: each pixel becomes the darkest value in its
/// window, growing dark regions.
pub fn minimum_filter(input: ArrayView3<f64>, size: usize) -> Result<Array3<f64>> {
    rank_filter(input, size, |window| {
        window.iter().copied().fold(f64::INFINITY, f64::min)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn flat_with_spike() -> Array3<f64> {
        let mut img = Array3::from_elem((5, 5, 1), 100.0);
        img[[2, 2, 0]] = 255.0;
        img
    }

    #[test]
    fn test_median_removes_salt() {
        let img = flat_with_spike();
        let result = median_filter(img.view(), 3).unwrap();

        assert_eq!(result[[2, 2, 0]], 100.0);
    }

    #[test]
    fn test_median_preserves_edge() {
        let img = Array3::from_shape_fn(
            (5, 5, 1),
            |(_, x, _)| if x < 2 { 0.0 } else { 255.0 },
        );
        let result = median_filter(img.view(), 3).unwrap();

        assert_eq!(result[[2, 0, 0]], 0.0);
        assert_eq!(result[[2, 4, 0]], 255.0);
    }

    #[test]
    fn test_maximum_propagates_spike() {
        let img = flat_with_spike();
        let result = maximum_filter(img.view(), 3).unwrap();

        assert_eq!(result[[1, 1, 0]], 255.0);
        assert_eq!(result[[3, 3, 0]], 255.0);
        assert_eq!(result[[0, 0, 0]], 100.0);
    }

    #[test]
    fn test_minimum_erases_spike() {
        let img = flat_with_spike();
        let result = minimum_filter(img.view(), 3).unwrap();

        assert!(result.iter().all(|&v| v == 100.0));
    }

    #[test]
    fn test_even_window_rejected() {
        let img = Array3::<f64>::zeros((3, 3, 1));
        assert!(median_filter(img.view(), 4).is_err());
        assert!(maximum_filter(img.view(), 0).is_err());
    }
}
