//! Exponential distribution by inversion.

use randomstate_core::BitGenerator;

use crate::distribution::{open_unit, Distribution};
use crate::error::{check, DistributionError};

/// Standard exponential sample, `-ln(U)`.
///
/// A draw of exactly 0.0 is discarded and redrawn, so the result is always
/// finite and positive.
#[inline]
pub fn standard_exponential<G: BitGenerator + ?Sized>(rng: &mut G) -> f64 {
    -open_unit(rng).ln()
}

/// Exponential with rate 1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StandardExponential;

impl Distribution<f64> for StandardExponential {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        standard_exponential(rng)
    }
}

/// Exponential with mean `scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exponential {
    scale: f64,
}

impl Exponential {
    /// # Errors
    ///
    /// `scale` must be finite and non-negative.
    pub fn new(scale: f64) -> Result<Self, DistributionError> {
        check(
            scale.is_finite() && scale >= 0.0,
            "scale",
            scale,
            "must be finite and non-negative",
        )?;
        Ok(Self { scale })
    }
}

impl Distribution<f64> for Exponential {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        self.scale * standard_exponential(rng)
    }
}
