//! Closed-form inversions and location-scale families.
//!
//! Cauchy, Laplace, Logistic, Gumbel, Weibull, Pareto, Rayleigh and
//! Triangular. Each is a single transform of one or two uniform,
//! exponential or Gaussian draws; draws that would feed a logarithm a zero
//! are redrawn.

use randomstate_core::BitGenerator;

use super::exponential::standard_exponential;
use super::normal::standard_normal;
use crate::distribution::{open_unit, Distribution};
use crate::error::{check, DistributionError};

/// Standard Cauchy sample, the ratio of two Gaussians.
pub fn standard_cauchy<G: BitGenerator + ?Sized>(rng: &mut G) -> f64 {
    let num = standard_normal(rng);
    loop {
        let den = standard_normal(rng);
        if den != 0.0 {
            return num / den;
        }
    }
}

fn check_location(loc: f64) -> Result<(), DistributionError> {
    check(loc.is_finite(), "loc", loc, "must be finite")
}

fn check_scale(scale: f64) -> Result<(), DistributionError> {
    check(
        scale.is_finite() && scale > 0.0,
        "scale",
        scale,
        "must be finite and positive",
    )
}

macro_rules! location_scale {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub struct $name {
            loc: f64,
            scale: f64,
        }

        impl $name {
            /// # Errors
            ///
            /// `loc` must be finite and `scale` finite and positive.
            pub fn new(loc: f64, scale: f64) -> Result<Self, DistributionError> {
                check_location(loc)?;
                check_scale(scale)?;
                Ok(Self { loc, scale })
            }
        }
    };
}

/// Standard Cauchy (location 0, scale 1).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cauchy;

impl Distribution<f64> for Cauchy {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        standard_cauchy(rng)
    }
}

location_scale!(
    /// Laplace (double exponential) with location `loc` and scale `scale`.
    Laplace
);

impl Distribution<f64> for Laplace {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        loop {
            let u = rng.next_double();
            if u >= 0.5 {
                return self.loc - self.scale * (2.0 - 2.0 * u).ln();
            }
            if u > 0.0 {
                return self.loc + self.scale * (2.0 * u).ln();
            }
        }
    }
}

location_scale!(
    /// Logistic with location `loc` and scale `scale`.
    Logistic
);

impl Distribution<f64> for Logistic {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        let u = open_unit(rng);
        self.loc + self.scale * (u / (1.0 - u)).ln()
    }
}

location_scale!(
    /// Gumbel (type I extreme value) with location `loc` and scale `scale`.
    Gumbel
);

impl Distribution<f64> for Gumbel {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        let u = open_unit(rng);
        self.loc - self.scale * (-u.ln()).ln()
    }
}

/// Weibull with shape `a` and unit scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weibull {
    a: f64,
}

impl Weibull {
    /// # Errors
    ///
    /// `a` must be finite and non-negative; `a == 0` always yields 0.
    pub fn new(a: f64) -> Result<Self, DistributionError> {
        check(
            a.is_finite() && a >= 0.0,
            "a",
            a,
            "must be finite and non-negative",
        )?;
        Ok(Self { a })
    }
}

impl Distribution<f64> for Weibull {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        if self.a == 0.0 {
            return 0.0;
        }
        standard_exponential(rng).powf(1.0 / self.a)
    }
}

/// Pareto II (Lomax) with shape `a`: `exp(E / a) - 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pareto {
    a: f64,
}

impl Pareto {
    /// # Errors
    ///
    /// `a` must be finite and positive.
    pub fn new(a: f64) -> Result<Self, DistributionError> {
        check(a.is_finite() && a > 0.0, "a", a, "must be finite and positive")?;
        Ok(Self { a })
    }
}

impl Distribution<f64> for Pareto {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        (standard_exponential(rng) / self.a).exp_m1()
    }
}

/// Rayleigh with mode `scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rayleigh {
    scale: f64,
}

impl Rayleigh {
    /// # Errors
    ///
    /// `scale` must be finite and positive.
    pub fn new(scale: f64) -> Result<Self, DistributionError> {
        check_scale(scale)?;
        Ok(Self { scale })
    }
}

impl Distribution<f64> for Rayleigh {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        self.scale * (2.0 * standard_exponential(rng)).sqrt()
    }
}

/// Triangular on `[left, right]` with peak at `mode`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangular {
    left: f64,
    mode: f64,
    right: f64,
}

impl Triangular {
    /// # Errors
    ///
    /// Requires finite `left <= mode <= right` with `left < right`.
    pub fn new(left: f64, mode: f64, right: f64) -> Result<Self, DistributionError> {
        check(left.is_finite(), "left", left, "must be finite")?;
        check(right.is_finite(), "right", right, "must be finite")?;
        check(left < right, "right", right, "must exceed left")?;
        check(
            (left..=right).contains(&mode),
            "mode",
            mode,
            "must lie within [left, right]",
        )?;
        Ok(Self { left, mode, right })
    }
}

impl Distribution<f64> for Triangular {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        let base = self.right - self.left;
        let left_base = self.mode - self.left;
        let ratio = left_base / base;
        let u = rng.next_double();
        if u <= ratio {
            self.left + (u * left_base * base).sqrt()
        } else {
            self.right - ((1.0 - u) * (self.right - self.mode) * base).sqrt()
        }
    }
}
