//! Intensity normalization.
//!
//! Every workbench operation ends by affine-mapping its result into a bounded
//! intensity range (0-255 by default) for storage or display. The map sends
//! the global minimum to the low bound and the global maximum to the high
//! bound, preserving the relative order of all samples.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

/// Default output range for workbench results.
pub const DISPLAY_RANGE: (f64, f64) = (0.0, 255.0);

/// Affine-map a single plane into `[lo, hi]`.
///
/// The global minimum maps to `lo` and the global maximum to `hi` exactly.
/// A flat plane (min == max) maps to the range midpoint instead of dividing
/// by zero.
///
/// # Arguments
/// * `plane` - Real-valued 2D plane
/// * `lo` - Low bound of the output range
/// * `hi` - High bound of the output range
///
/// # Returns
/// Normalized plane with the same dimensions
pub fn normalize_plane(plane: ArrayView2<f64>, lo: f64, hi: f64) -> Array2<f64> {
    let (min, max) = min_max(plane.iter().copied());
    affine(plane.to_owned(), min, max, lo, hi)
}

/// Affine-map an image into `[lo, hi]` using a single min/max over all
/// channels, so channel ratios survive normalization.
///
/// # Arguments
/// * `input` - Image with any channel count
/// * `lo` - Low bound of the output range
/// * `hi` - High bound of the output range
///
/// # Returns
/// Normalized image with the same dimensions
pub fn normalize_image(input: ArrayView3<f64>, lo: f64, hi: f64) -> Array3<f64> {
    let (min, max) = min_max(input.iter().copied());
    affine(input.to_owned(), min, max, lo, hi)
}

fn min_max(samples: impl Iterator<Item = f64>) -> (f64, f64) {
    samples.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}

fn affine<D: ndarray::Dimension>(
    mut data: ndarray::Array<f64, D>,
    min: f64,
    max: f64,
    lo: f64,
    hi: f64,
) -> ndarray::Array<f64, D> {
    if max > min {
        let range = max - min;
        // Dividing by the range first keeps min -> lo and max -> hi exact.
        data.mapv_inplace(|v| (v - min) / range * (hi - lo) + lo);
    } else {
        // Flat input: midpoint of the target range.
        data.fill((lo + hi) / 2.0);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    #[test]
    fn test_maps_extremes_exactly() {
        let plane = array![[10.0, 20.0], [30.0, 50.0]];
        let result = normalize_plane(plane.view(), 0.0, 255.0);

        assert_eq!(result[[0, 0]], 0.0);
        assert_eq!(result[[1, 1]], 255.0);
    }

    #[test]
    fn test_preserves_order() {
        let plane = array![[3.0, -1.0, 7.0], [2.5, 9.0, 0.0]];
        let result = normalize_plane(plane.view(), 0.0, 255.0);

        let mut pairs: Vec<(f64, f64)> = plane.iter().zip(result.iter()).map(|(&a, &b)| (a, b)).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        for window in pairs.windows(2) {
            assert!(window[0].1 <= window[1].1);
        }
    }

    #[test]
    fn test_flat_plane_maps_to_midpoint() {
        let plane = Array2::from_elem((3, 3), 100.0);
        let result = normalize_plane(plane.view(), 0.0, 255.0);

        assert!(result.iter().all(|&v| v == 127.5));
    }

    #[test]
    fn test_image_uses_global_extremes() {
        let mut img = Array3::<f64>::zeros((1, 2, 3));
        img[[0, 0, 0]] = 0.0;
        img[[0, 1, 2]] = 100.0;
        img[[0, 0, 1]] = 50.0;

        let result = normalize_image(img.view(), 0.0, 255.0);

        assert_eq!(result[[0, 1, 2]], 255.0);
        assert_eq!(result[[0, 0, 1]], 127.5);
    }

    #[test]
    fn test_already_spanning_range_is_identity() {
        let plane = array![[0.0, 128.0], [64.0, 255.0]];
        let result = normalize_plane(plane.view(), 0.0, 255.0);

        for (a, b) in plane.iter().zip(result.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
