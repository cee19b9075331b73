//! improc - image-processing workbench core
//!
//! The computational core behind an interactive image-processing workbench:
//! a frequency-domain filtering and restoration pipeline plus the spatial
//! filters, histogram tools and pixel utilities that sit alongside it.
//! Window management, dialogs and file I/O live in the surrounding
//! application; the boundary artifact exchanged with it is a plain
//! in-memory sample buffer.
//!
//! ## Image Format
//!
//! Images are `ndarray` arrays shaped `(height, width, channels)` with one
//! canonical sample type through the whole pipeline:
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale | (H, W, 1) | f64 | Single luminance channel |
//! | RGB | (H, W, 3) | f64 | Red, green, blue |
//!
//! Channel count is inferred from the array dimensions. Frequency-domain
//! operations are grayscale-only and reject other layouts with
//! [`FilterError::InvalidChannelCount`]; integer quantization happens only at
//! the storage boundary, outside this crate.
//!
//! ## Architecture
//!
//! - [`frequency`] - FFT, spectrum shifting, transfer-function design,
//!   PSF/OTF generation, degradation modeling, inverse and Wiener
//!   restoration
//! - [`filters`] - spatial convolution, rank filters, morphology,
//!   histogram operations, thresholding, segmentation, image arithmetic
//! - [`normalize`] - affine mapping of results into the display range
//! - [`image`] - buffer layout helpers shared by every module
//!
//! Every operation is synchronous and deterministic: it receives its own
//! input buffer and parameter bundle, builds any spectra or transfer
//! functions from scratch for the current dimensions, and produces a new
//! output buffer normalized into 0-255.

pub mod error;
pub mod filters;
pub mod frequency;
pub mod image;
pub mod normalize;

pub use error::{FilterError, Result};
