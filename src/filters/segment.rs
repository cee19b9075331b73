//! Region-growing segmentation.

use ndarray::{Array3, ArrayView3};
use std::collections::VecDeque;

use crate::error::{FilterError, Result};
use crate::image::expect_grayscale;

/// Grow a region from a seed pixel over 8-connected neighbors whose
/// intensity differs from the pixel that reached them by less than
/// `tolerance`.
///
/// The result is a mask image in the workbench's convention: grown region
/// at 0, everything else at 255.
///
/// # Arguments
/// * `input` - Grayscale image
/// * `seed` - Seed coordinate as `(x, y)`
/// * `tolerance` - Maximum intensity step between neighboring region pixels
///
/// # Returns
/// Mask image with the region at 0 on a 255 background
pub fn region_growth(
    input: ArrayView3<f64>,
    seed: (usize, usize),
    tolerance: f64,
) -> Result<Array3<f64>> {
    expect_grayscale(input)?;
    if !(tolerance > 0.0) || !tolerance.is_finite() {
        return Err(FilterError::invalid_parameter(
            "tolerance",
            format!("must be positive, got {tolerance}"),
        ));
    }

    let (height, width, _) = input.dim();
    let (sx, sy) = seed;
    if sx >= width || sy >= height {
        return Err(FilterError::invalid_parameter(
            "seed",
            format!("({sx}, {sy}) lies outside a {width}x{height} image"),
        ));
    }

    let mut mask = Array3::from_elem((height, width, 1), 255.0);
    let mut frontier = VecDeque::new();

    mask[[sy, sx, 0]] = 0.0;
    frontier.push_back((sx, sy));

    while let Some((x, y)) = frontier.pop_front() {
        let here = input[[y, x, 0]];
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if mask[[ny, nx, 0]] == 0.0 {
                    continue;
                }
                if (input[[ny, nx, 0]] - here).abs() < tolerance {
                    mask[[ny, nx, 0]] = 0.0;
                    frontier.push_back((nx, ny));
                }
            }
        }
    }

    Ok(mask)
}
