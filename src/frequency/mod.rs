//! Frequency-domain filtering and restoration.
//!
//! The pipeline shared by every operation in this module:
//!
//! ```text
//! image plane -> FFT -> quadrant shift -> transfer function / OTF
//!             -> inverse FFT -> normalize -> image plane
//! ```
//!
//! - [`fft`] - 2D transform and quadrant shifting
//! - [`spectrum`] - complex plane-pair representation and arithmetic
//! - [`transfer`] - filter families (ideal, Butterworth, homomorphic,
//!   atmospheric turbulence) and their transfer-function grids
//! - [`psf`] - motion-blur point-spread functions and their OTFs
//! - [`degrade`] - synthetic blur and noise
//! - [`restore`] - inverse and Wiener deconvolution
//! - [`enhance`] - the workbench's frequency-domain operations
//!
//! All operations are grayscale-only, synchronous and deterministic; each
//! call builds its spectra and transfer functions from scratch for the
//! current image dimensions.

pub mod degrade;
pub mod enhance;
pub mod fft;
pub mod psf;
pub mod restore;
pub mod spectrum;
pub mod transfer;

pub use degrade::{degrade, gaussian_noise, motion_blur, turbulence_blur, GaussianNoise};
pub use enhance::{
    apply_centered_transfer, butterworth_high_pass, butterworth_low_pass, homomorphic,
    ideal_high_pass, ideal_low_pass, reconstruct_from_magnitude, reconstruct_from_phase,
    spectrum_magnitude,
};
pub use fft::{forward, inverse, shift, shift_plane, unshift};
pub use psf::{psf_to_otf, MotionBlurPsf};
pub use restore::{inverse_filter, wiener_filter, InverseFilter, WienerFilter};
pub use spectrum::ComplexSpectrum;
pub use transfer::{ButterworthFilter, HomomorphicFilter, IdealFilter, TurbulenceBlur};
