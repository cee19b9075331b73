//! Morphological operators with a 3x3 structuring element.
//!
//! Erode takes the minimum over the cells the structuring element selects,
//! dilate the maximum; opening and closing are the two compositions.
//! Out-of-bounds neighbors are clamped to the nearest edge pixel.

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};

/// 3x3 structuring element; `true` cells participate in the operation.
pub type StructuringElement = [[bool; 3]; 3];

/// The full 3x3 box, the workbench default.
pub const FULL_SE: StructuringElement = [[true; 3]; 3];

/// 4-connected cross.
pub const CROSS_SE: StructuringElement = [
    [false, true, false],
    [true, true, true],
    [false, true, false],
];

fn expect_nonempty_se(se: &StructuringElement) -> Result<()> {
    if !se.iter().flatten().any(|&v| v) {
        return Err(FilterError::invalid_parameter(
            "structuring_element",
            "must select at least one cell",
        ));
    }
    Ok(())
}

fn morph(
    input: ArrayView3<f64>,
    se: &StructuringElement,
    fold: impl Fn(f64, f64) -> f64,
    init: f64,
) -> Array3<f64> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<f64>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut value = init;
                for (dy, row) in se.iter().enumerate() {
                    let sy = (y as isize + dy as isize - 1).clamp(0, height as isize - 1) as usize;
                    for (dx, &selected) in row.iter().enumerate() {
                        if !selected {
                            continue;
                        }
                        let sx =
                            (x as isize + dx as isize - 1).clamp(0, width as isize - 1) as usize;
                        value = fold(value, input[[sy, sx, c]]);
                    }
                }
                output[[y, x, c]] = value;
            }
        }
    }

    output
}

/// Erode: minimum over the structuring element.
///
/// # Arguments
/// * `input` - Image with any channel count
/// * `se` - 3x3 structuring element
///
/// # Returns
/// Eroded image with the same dimensions
pub fn erode(input: ArrayView3<f64>, se: &StructuringElement) -> Result<Array3<f64>> {
    expect_nonempty_se(se)?;
    Ok(morph(input, se, f64::min, f64::INFINITY))
}

/// Dilate: maximum over the structuring element.
pub fn dilate(input: ArrayView3<f64>, se: &StructuringElement) -> Result<Array3<f64>> {
    expect_nonempty_se(se)?;
    Ok(morph(input, se, f64::max, f64::NEG_INFINITY))
}

/// Opening: erosion followed by dilation. Removes bright specks smaller than
/// the structuring element.
pub fn opening(input: ArrayView3<f64>, se: &StructuringElement) -> Result<Array3<f64>> {
    let eroded = erode(input, se)?;
    dilate(eroded.view(), se)
}

/// Closing: dilation followed by erosion. Fills dark pits smaller than the
/// structuring element.
pub fn closing(input: ArrayView3<f64>, se: &StructuringElement) -> Result<Array3<f64>> {
    let dilated = dilate(input, se)?;
    erode(dilated.view(), se)
}
