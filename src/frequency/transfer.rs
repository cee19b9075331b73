//! Transfer-function design.
//!
//! Each filter family is a small validated parameter struct that can evaluate
//! its radial frequency response and rasterize it into a spectrum-sized grid.
//! Grids are always built over the *centered* spectrum: `D(u, v)` is the
//! Euclidean distance from the grid center `(width / 2, height / 2)`, so
//! callers must shift the spectrum before multiplying (and unshift after).
//!
//! Radius tie-break convention, applied uniformly: `D <= D0` admits the
//! passband of a low-pass filter, `D > D0` the passband of a high-pass
//! filter.

use ndarray::Array2;

use crate::error::{FilterError, Result};

use super::spectrum::DIVISION_FLOOR;

/// Rasterize a radial response over a `(height, width)` grid centered at
/// `(height / 2, width / 2)`.
fn radial_grid(height: usize, width: usize, response: impl Fn(f64) -> f64) -> Array2<f64> {
    let cy = (height / 2) as f64;
    let cx = (width / 2) as f64;
    Array2::from_shape_fn((height, width), |(y, x)| {
        let d = (y as f64 - cy).hypot(x as f64 - cx);
        response(d)
    })
}

fn expect_positive(name: &'static str, value: f64) -> Result<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(FilterError::invalid_parameter(
            name,
            format!("must be positive, got {value}"),
        ));
    }
    Ok(())
}

// ============================================================================
// Ideal filter
// ============================================================================

/// Ideal (sharp-cutoff) filter with cutoff radius `D0` in pixels.
///
/// A cutoff of zero is allowed: the low-pass response then admits only the DC
/// term.
#[derive(Debug, Clone, Copy)]
pub struct IdealFilter {
    cutoff: f64,
}

impl IdealFilter {
    pub fn new(cutoff: f64) -> Result<Self> {
        if !(cutoff >= 0.0) || !cutoff.is_finite() {
            return Err(FilterError::invalid_parameter(
                "cutoff",
                format!("must be finite and non-negative, got {cutoff}"),
            ));
        }
        Ok(IdealFilter { cutoff })
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Low-pass response: 1 inside the cutoff radius (inclusive), 0 outside.
    pub fn low_pass_response(&self, d: f64) -> f64 {
        if d <= self.cutoff {
            1.0
        } else {
            0.0
        }
    }

    /// High-pass response: complement of the low-pass response.
    pub fn high_pass_response(&self, d: f64) -> f64 {
        1.0 - self.low_pass_response(d)
    }

    pub fn low_pass(&self, height: usize, width: usize) -> Array2<f64> {
        radial_grid(height, width, |d| self.low_pass_response(d))
    }

    pub fn high_pass(&self, height: usize, width: usize) -> Array2<f64> {
        radial_grid(height, width, |d| self.high_pass_response(d))
    }
}

// ============================================================================
// Butterworth filter
// ============================================================================

/// Butterworth filter of a given order with cutoff radius `D0`.
///
/// The transition sharpens toward the ideal response as the order grows.
#[derive(Debug, Clone, Copy)]
pub struct ButterworthFilter {
    cutoff: f64,
    order: u32,
}

impl ButterworthFilter {
    pub fn new(cutoff: f64, order: u32) -> Result<Self> {
        expect_positive("cutoff", cutoff)?;
        if order == 0 {
            return Err(FilterError::invalid_parameter("order", "must be at least 1"));
        }
        Ok(ButterworthFilter { cutoff, order })
    }

    /// `H = 1 / (1 + (D / D0)^(2n))`
    pub fn low_pass_response(&self, d: f64) -> f64 {
        1.0 / (1.0 + (d / self.cutoff).powi(2 * self.order as i32))
    }

    /// `H = 1 / (1 + (D0 / D)^(2n))`, with the distance clamped away from
    /// zero so the DC cell stays finite (and fully attenuated).
    pub fn high_pass_response(&self, d: f64) -> f64 {
        let d = d.max(DIVISION_FLOOR);
        1.0 / (1.0 + (self.cutoff / d).powi(2 * self.order as i32))
    }

    pub fn low_pass(&self, height: usize, width: usize) -> Array2<f64> {
        radial_grid(height, width, |d| self.low_pass_response(d))
    }

    pub fn high_pass(&self, height: usize, width: usize) -> Array2<f64> {
        radial_grid(height, width, |d| self.high_pass_response(d))
    }
}

// ============================================================================
// Homomorphic filter
// ============================================================================

/// Homomorphic filter: attenuates illumination (low frequency) by `gamma_low`
/// and boosts reflectance (high frequency) toward `gamma_high`, applied in
/// the log domain.
#[derive(Debug, Clone, Copy)]
pub struct HomomorphicFilter {
    gamma_low: f64,
    gamma_high: f64,
    c: f64,
    cutoff: f64,
}

impl HomomorphicFilter {
    pub fn new(gamma_low: f64, gamma_high: f64, c: f64, cutoff: f64) -> Result<Self> {
        if !gamma_low.is_finite() || !gamma_high.is_finite() || gamma_low > gamma_high {
            return Err(FilterError::invalid_parameter(
                "gamma_low",
                format!("gamma_low must not exceed gamma_high, got {gamma_low} > {gamma_high}"),
            ));
        }
        expect_positive("c", c)?;
        expect_positive("cutoff", cutoff)?;
        Ok(HomomorphicFilter {
            gamma_low,
            gamma_high,
            c,
            cutoff,
        })
    }

    /// `H = (gH - gL) * (1 - exp(-c * (D/D0)^2)) + gL`
    pub fn response(&self, d: f64) -> f64 {
        let ratio = d / self.cutoff;
        (self.gamma_high - self.gamma_low) * (1.0 - (-self.c * ratio * ratio).exp())
            + self.gamma_low
    }

    pub fn transfer(&self, height: usize, width: usize) -> Array2<f64> {
        radial_grid(height, width, |d| self.response(d))
    }
}

// ============================================================================
// Atmospheric turbulence
// ============================================================================

/// Atmospheric turbulence degradation, `H = exp(-k * D^(5/6))`.
///
/// Used to synthesize blur, not to restore it.
#[derive(Debug, Clone, Copy)]
pub struct TurbulenceBlur {
    k: f64,
}

impl TurbulenceBlur {
    pub fn new(k: f64) -> Result<Self> {
        expect_positive("k", k)?;
        Ok(TurbulenceBlur { k })
    }

    pub fn response(&self, d: f64) -> f64 {
        (-self.k * d.powf(5.0 / 6.0)).exp()
    }

    pub fn transfer(&self, height: usize, width: usize) -> Array2<f64> {
        radial_grid(height, width, |d| self.response(d))
    }
}
