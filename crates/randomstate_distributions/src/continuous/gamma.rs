//! Gamma family: `Gamma`, `ChiSquared`, `Beta`, `FisherF`, `StudentT`.
//!
//! Standard gamma sampling:
//! - shape == 1: standard exponential
//! - shape > 1: Marsaglia & Tsang (2000) squeeze-rejection on a Gaussian
//! - shape < 1: boosted, `gamma(shape + 1) * U^(1 / shape)`
//!
//! Both rejection loops accept with probability above 0.95 for every
//! shape, so the expected number of attempts is bounded by a small
//! constant.

use randomstate_core::BitGenerator;

use super::exponential::standard_exponential;
use super::normal::standard_normal;
use crate::distribution::{open_unit, Distribution};
use crate::error::{check, DistributionError};

/// Standard gamma sample with unit scale. `shape` must be non-negative.
pub fn standard_gamma<G: BitGenerator + ?Sized>(rng: &mut G, shape: f64) -> f64 {
    if shape == 1.0 {
        standard_exponential(rng)
    } else if shape == 0.0 {
        0.0
    } else if shape < 1.0 {
        let boosted = marsaglia_tsang(rng, shape + 1.0);
        boosted * open_unit(rng).powf(1.0 / shape)
    } else {
        marsaglia_tsang(rng, shape)
    }
}

fn marsaglia_tsang<G: BitGenerator + ?Sized>(rng: &mut G, shape: f64) -> f64 {
    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let (x, v) = loop {
            let x = standard_normal(rng);
            let v = 1.0 + c * x;
            if v > 0.0 {
                break (x, v * v * v);
            }
        };
        let u = rng.next_double();
        let x2 = x * x;
        if u < 1.0 - 0.0331 * x2 * x2 {
            return d * v;
        }
        if u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            return d * v;
        }
    }
}

fn check_shape(name: &'static str, value: f64) -> Result<(), DistributionError> {
    check(
        value.is_finite() && value >= 0.0,
        name,
        value,
        "must be finite and non-negative",
    )
}

fn check_positive(name: &'static str, value: f64) -> Result<(), DistributionError> {
    check(
        value.is_finite() && value > 0.0,
        name,
        value,
        "must be finite and positive",
    )
}

/// Gamma with shape `k` and scale `theta`.
///
/// # Examples
///
/// ```
/// use randomstate_core::Xorshift1024;
/// use randomstate_distributions::{continuous::Gamma, Distribution};
///
/// let gamma = Gamma::new(2.5, 2.0).unwrap();
/// let mut rng = Xorshift1024::from_seed(8);
/// assert!(gamma.sample(&mut rng) > 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gamma {
    shape: f64,
    scale: f64,
}

impl Gamma {
    /// # Errors
    ///
    /// `shape` and `scale` must be finite and non-negative.
    pub fn new(shape: f64, scale: f64) -> Result<Self, DistributionError> {
        check_shape("shape", shape)?;
        check_shape("scale", scale)?;
        Ok(Self { shape, scale })
    }
}

impl Distribution<f64> for Gamma {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        self.scale * standard_gamma(rng, self.shape)
    }
}

/// Chi-squared with `df` degrees of freedom, `2 * gamma(df / 2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChiSquared {
    df: f64,
}

impl ChiSquared {
    /// # Errors
    ///
    /// `df` must be finite and positive.
    pub fn new(df: f64) -> Result<Self, DistributionError> {
        check_positive("df", df)?;
        Ok(Self { df })
    }
}

impl Distribution<f64> for ChiSquared {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        2.0 * standard_gamma(rng, self.df / 2.0)
    }
}

/// Beta with shapes `a` and `b`.
///
/// Uses Jöhnk's algorithm when both shapes are at most one, otherwise the
/// ratio of two gamma variates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beta {
    a: f64,
    b: f64,
}

impl Beta {
    /// # Errors
    ///
    /// Both shapes must be finite and positive.
    pub fn new(a: f64, b: f64) -> Result<Self, DistributionError> {
        check_positive("a", a)?;
        check_positive("b", b)?;
        Ok(Self { a, b })
    }

    fn johnk<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        loop {
            let u = rng.next_double();
            let v = rng.next_double();
            let x = u.powf(1.0 / self.a);
            let y = v.powf(1.0 / self.b);
            let xpy = x + y;
            if xpy > 1.0 || u == 0.0 || v == 0.0 {
                continue;
            }
            if xpy > 0.0 {
                return x / xpy;
            }
            // Both powers underflowed; work in log space.
            let mut log_x = u.ln() / self.a;
            let mut log_y = v.ln() / self.b;
            let log_m = log_x.max(log_y);
            log_x -= log_m;
            log_y -= log_m;
            return (log_x - (log_x.exp() + log_y.exp()).ln()).exp();
        }
    }
}

impl Distribution<f64> for Beta {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        if self.a <= 1.0 && self.b <= 1.0 {
            self.johnk(rng)
        } else {
            let ga = standard_gamma(rng, self.a);
            let gb = standard_gamma(rng, self.b);
            ga / (ga + gb)
        }
    }
}

/// Fisher-Snedecor F with `dfnum` and `dfden` degrees of freedom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FisherF {
    dfnum: f64,
    dfden: f64,
}

impl FisherF {
    /// # Errors
    ///
    /// Both degrees of freedom must be finite and positive.
    pub fn new(dfnum: f64, dfden: f64) -> Result<Self, DistributionError> {
        check_positive("dfnum", dfnum)?;
        check_positive("dfden", dfden)?;
        Ok(Self { dfnum, dfden })
    }
}

impl Distribution<f64> for FisherF {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        let num = 2.0 * standard_gamma(rng, self.dfnum / 2.0) * self.dfden;
        let den = 2.0 * standard_gamma(rng, self.dfden / 2.0) * self.dfnum;
        num / den
    }
}

/// Student's t with `df` degrees of freedom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StudentT {
    df: f64,
}

impl StudentT {
    /// # Errors
    ///
    /// `df` must be finite and positive.
    pub fn new(df: f64) -> Result<Self, DistributionError> {
        check_positive("df", df)?;
        Ok(Self { df })
    }
}

impl Distribution<f64> for StudentT {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        let num = standard_normal(rng);
        let denom = standard_gamma(rng, self.df / 2.0);
        (self.df / 2.0).sqrt() * num / denom.sqrt()
    }
}
