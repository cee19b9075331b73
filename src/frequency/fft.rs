//! Two-dimensional discrete Fourier transform and quadrant shifting.
//!
//! The 2D transform is built from row FFTs, a transpose, column FFTs and a
//! transpose back, so the spectrum keeps the image's `(height, width)` layout.
//! Rows are independent and processed in parallel; each worker carries its own
//! scratch buffer.
//!
//! The inverse transform is scaled by `1 / (width * height)` so that
//! forward followed by inverse reproduces the input within floating tolerance.

use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use rayon::prelude::*;
use rustfft::{Fft, FftDirection, FftPlanner};
use std::sync::Arc;

use crate::error::Result;
use crate::image::expect_nonempty;

use super::spectrum::ComplexSpectrum;

/// Forward 2D transform of a real plane into a complex spectrum of identical
/// dimensions.
///
/// # Arguments
/// * `plane` - Real-valued plane, `(height, width)`
///
/// # Returns
/// Unnormalized spectrum with the DC term at the top-left corner
pub fn forward(plane: ArrayView2<f64>) -> Result<ComplexSpectrum> {
    let (height, width) = plane.dim();
    expect_nonempty(height, width)?;

    let mut buffer: Vec<Complex64> = plane.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    fft_2d(width, height, &mut buffer, FftDirection::Forward);
    Ok(buffer_to_spectrum(height, width, &buffer))
}

/// Inverse 2D transform of a complex spectrum back to a real plane.
///
/// Residual imaginary content left by floating error is discarded. The result
/// is scaled by `1 / (width * height)` so `inverse(forward(p)) == p` up to
/// floating tolerance.
///
/// # Arguments
/// * `spectrum` - Complex spectrum, DC term at the top-left corner
///
/// # Returns
/// Real-valued plane with the spectrum's dimensions
pub fn inverse(spectrum: &ComplexSpectrum) -> Result<Array2<f64>> {
    let (height, width) = spectrum.dim();
    expect_nonempty(height, width)?;

    let mut buffer: Vec<Complex64> = Vec::with_capacity(height * width);
    for y in 0..height {
        for x in 0..width {
            buffer.push(spectrum.at(y, x));
        }
    }
    fft_2d(width, height, &mut buffer, FftDirection::Inverse);

    let scale = 1.0 / (width * height) as f64;
    Ok(Array2::from_shape_fn((height, width), |(y, x)| {
        buffer[y * width + x].re * scale
    }))
}

/// Swap quadrants so the DC term moves from the corner to the grid center.
///
/// Implemented as a cyclic shift by `(height / 2, width / 2)` (floor
/// division). On even dimensions the operation is self-inverse; on odd
/// dimensions it is off by one cell from its own inverse, so use [`unshift`]
/// to undo it instead of applying it twice.
pub fn shift(spectrum: &ComplexSpectrum) -> ComplexSpectrum {
    let (height, width) = spectrum.dim();
    ComplexSpectrum {
        re: cyclic_shift(spectrum.re.view(), height / 2, width / 2),
        im: cyclic_shift(spectrum.im.view(), height / 2, width / 2),
    }
}

/// Inverse of [`shift`]: moves the DC term from the center back to the
/// corner. Uses the complementary (ceil) offsets so `unshift(shift(s))` is
/// the identity for every dimension parity.
pub fn unshift(spectrum: &ComplexSpectrum) -> ComplexSpectrum {
    let (height, width) = spectrum.dim();
    ComplexSpectrum {
        re: cyclic_shift(spectrum.re.view(), height - height / 2, width - width / 2),
        im: cyclic_shift(spectrum.im.view(), height - height / 2, width - width / 2),
    }
}

/// Center a single real plane, e.g. a magnitude view.
pub fn shift_plane(plane: ArrayView2<f64>) -> Array2<f64> {
    let (height, width) = plane.dim();
    cyclic_shift(plane, height / 2, width / 2)
}

/// Cyclic shift of a plane by `(down, right)` cells with wrap-around.
fn cyclic_shift(plane: ArrayView2<f64>, down: usize, right: usize) -> Array2<f64> {
    let (height, width) = plane.dim();
    Array2::from_shape_fn((height, width), |(y, x)| {
        let sy = (y + height - down % height) % height;
        let sx = (x + width - right % width) % width;
        plane[[sy, sx]]
    })
}

// ============================================================================
// Transform internals
// ============================================================================

/// In-place 2D FFT over a row-major buffer: row pass, transpose, row pass on
/// the transposed data (the original columns), transpose back.
fn fft_2d(width: usize, height: usize, buffer: &mut [Complex64], direction: FftDirection) {
    let mut planner = FftPlanner::new();

    let row_fft = planner.plan_fft(width, direction);
    process_rows(buffer, width, &row_fft);

    let mut transposed = transpose(width, height, buffer);
    let column_fft = planner.plan_fft(height, direction);
    process_rows(&mut transposed, height, &column_fft);

    buffer.copy_from_slice(&transpose(height, width, &transposed));
}

/// Run one FFT per row, rows in parallel, one scratch buffer per worker.
fn process_rows(buffer: &mut [Complex64], row_len: usize, fft: &Arc<dyn Fft<f64>>) {
    buffer
        .par_chunks_exact_mut(row_len)
        .for_each_init(
            || vec![Complex64::default(); fft.get_inplace_scratch_len()],
            |scratch, row| fft.process_with_scratch(row, scratch),
        );
}

fn transpose(width: usize, height: usize, matrix: &[Complex64]) -> Vec<Complex64> {
    let mut transposed = vec![Complex64::default(); matrix.len()];
    for y in 0..height {
        for x in 0..width {
            transposed[x * height + y] = matrix[y * width + x];
        }
    }
    transposed
}

fn buffer_to_spectrum(height: usize, width: usize, buffer: &[Complex64]) -> ComplexSpectrum {
    ComplexSpectrum {
        re: Array2::from_shape_fn((height, width), |(y, x)| buffer[y * width + x].re),
        im: Array2::from_shape_fn((height, width), |(y, x)| buffer[y * width + x].im),
    }
}
