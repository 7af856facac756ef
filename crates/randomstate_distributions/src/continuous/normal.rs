//! Gaussian family: ziggurat standard normal, `Normal`, `LogNormal`.
//!
//! The ziggurat uses 128 layers (Marsaglia & Tsang, 2000) with
//! r = 3.442619855899 and v = 9.91256303526217e-3. Each attempt costs one
//! `next_uint64`: the low 7 bits select the layer and the top 52 bits
//! give a uniform in [-1, 1). About 98% of attempts are accepted straight
//! from the rectangle; wedge tests cost one extra `next_double` and the
//! tail uses Marsaglia's exponential method. Expected raw draws per
//! sample are about 1.04.

use std::sync::OnceLock;

use randomstate_core::BitGenerator;

use crate::distribution::{open_unit, Distribution};
use crate::error::{check, DistributionError};

const LAYERS: usize = 128;
const R: f64 = 3.442_619_855_899;
const V: f64 = 9.912_563_035_262_17e-3;

struct Tables {
    x: [f64; LAYERS + 1],
    f: [f64; LAYERS + 1],
}

#[inline]
fn pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp()
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut x = [0.0; LAYERS + 1];
        x[0] = V / pdf(R);
        x[1] = R;
        for i in 1..LAYERS - 1 {
            x[i + 1] = (-2.0 * (V / x[i] + pdf(x[i])).ln()).sqrt();
        }
        x[LAYERS] = 0.0;
        let mut f = [0.0; LAYERS + 1];
        for (fi, &xi) in f.iter_mut().zip(x.iter()) {
            *fi = pdf(xi);
        }
        Tables { x, f }
    })
}

/// Draws from the tail |x| > r.
#[cold]
fn tail<G: BitGenerator + ?Sized>(rng: &mut G, negative: bool) -> f64 {
    loop {
        let x = -open_unit(rng).ln() / R;
        let y = -open_unit(rng).ln();
        if 2.0 * y >= x * x {
            return if negative { -(R + x) } else { R + x };
        }
    }
}

/// Standard Gaussian sample.
pub fn standard_normal<G: BitGenerator + ?Sized>(rng: &mut G) -> f64 {
    let t = tables();
    loop {
        let bits = rng.next_uint64();
        let i = (bits & 0x7f) as usize;
        // [2, 4) from the top 52 bits, shifted to [-1, 1)
        let u = f64::from_bits((bits >> 12) | (1024u64 << 52)) - 3.0;
        let x = u * t.x[i];
        if x.abs() < t.x[i + 1] {
            return x;
        }
        if i == 0 {
            return tail(rng, u < 0.0);
        }
        if t.f[i + 1] + (t.f[i] - t.f[i + 1]) * rng.next_double() < pdf(x) {
            return x;
        }
    }
}

/// Standard Gaussian.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StandardNormal;

impl Distribution<f64> for StandardNormal {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        standard_normal(rng)
    }
}

/// Gaussian with location `loc` and standard deviation `scale`.
///
/// # Examples
///
/// ```
/// use randomstate_core::Pcg64;
/// use randomstate_distributions::{continuous::Normal, Distribution};
///
/// let normal = Normal::new(10.0, 2.0).unwrap();
/// let mut rng = Pcg64::from_seed(1, 0);
/// let xs = normal.sample_n(&mut rng, 1000);
/// let mean = xs.iter().sum::<f64>() / 1000.0;
/// assert!((mean - 10.0).abs() < 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normal {
    loc: f64,
    scale: f64,
}

impl Normal {
    /// # Errors
    ///
    /// `loc` must be finite and `scale` finite and non-negative.
    pub fn new(loc: f64, scale: f64) -> Result<Self, DistributionError> {
        check(loc.is_finite(), "loc", loc, "must be finite")?;
        check(
            scale.is_finite() && scale >= 0.0,
            "scale",
            scale,
            "must be finite and non-negative",
        )?;
        Ok(Self { loc, scale })
    }

    /// Location.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Standard deviation.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Distribution<f64> for Normal {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        self.loc + self.scale * standard_normal(rng)
    }
}

/// Log-normal: `exp(N(mean, sigma))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogNormal {
    normal: Normal,
}

impl LogNormal {
    /// `mean` and `sigma` are the parameters of the underlying Gaussian.
    pub fn new(mean: f64, sigma: f64) -> Result<Self, DistributionError> {
        let normal = Normal::new(mean, sigma).map_err(|e| match e {
            DistributionError::InvalidParameter { name: "scale", value, reason } => {
                DistributionError::InvalidParameter {
                    name: "sigma",
                    value,
                    reason,
                }
            }
            DistributionError::InvalidParameter { name: "loc", value, reason } => {
                DistributionError::InvalidParameter {
                    name: "mean",
                    value,
                    reason,
                }
            }
            other => other,
        })?;
        Ok(Self { normal })
    }
}

impl Distribution<f64> for LogNormal {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        self.normal.sample(rng).exp()
    }
}
