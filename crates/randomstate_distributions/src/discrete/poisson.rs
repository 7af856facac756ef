//! Poisson distribution.
//!
//! - `lam == 0`: always 0
//! - `lam < 10`: Knuth's multiplication method, about `lam + 1` uniforms
//! - `lam >= 10`: PTRS transformed rejection with squeeze (Hörmann, 1993),
//!   about 1.15 attempts of two uniforms each

use randomstate_core::BitGenerator;

use crate::distribution::Distribution;
use crate::error::{check, DistributionError};
use crate::special::loggam;

/// Mean at and above which PTRS replaces the multiplication method.
pub const POISSON_PTRS_THRESHOLD: f64 = 10.0;

/// Largest accepted mean; larger values overflow the 64-bit result.
pub const POISSON_LAM_MAX: f64 = 9.223_372_006_484_771e18;

/// Poisson sample for a validated mean.
pub(crate) fn poisson<G: BitGenerator + ?Sized>(rng: &mut G, lam: f64) -> u64 {
    if lam >= POISSON_PTRS_THRESHOLD {
        ptrs(rng, lam)
    } else if lam == 0.0 {
        0
    } else {
        multiplication(rng, lam)
    }
}

fn multiplication<G: BitGenerator + ?Sized>(rng: &mut G, lam: f64) -> u64 {
    let enlam = (-lam).exp();
    let mut x = 0u64;
    let mut prod = 1.0;
    loop {
        prod *= rng.next_double();
        if prod > enlam {
            x += 1;
        } else {
            return x;
        }
    }
}

fn ptrs<G: BitGenerator + ?Sized>(rng: &mut G, lam: f64) -> u64 {
    let slam = lam.sqrt();
    let loglam = lam.ln();
    let b = 0.931 + 2.53 * slam;
    let a = -0.059 + 0.02483 * b;
    let invalpha = 1.1239 + 1.1328 / (b - 3.4);
    let vr = 0.9277 - 3.6224 / (b - 2.0);

    loop {
        let u = rng.next_double() - 0.5;
        let v = rng.next_double();
        let us = 0.5 - u.abs();
        // `as` saturates, so an infinite candidate lands on i64::MIN/MAX.
        let k = ((2.0 * a / us + b) * u + lam + 0.43).floor() as i64;
        if us >= 0.07 && v <= vr {
            return k as u64;
        }
        if k < 0 || (us < 0.013 && v > us) {
            continue;
        }
        // ln(0) = -inf is accepted here
        let lhs = v.ln() + invalpha.ln() - (a / (us * us) + b).ln();
        let rhs = -lam + k as f64 * loglam - loggam(k as f64 + 1.0);
        if lhs <= rhs {
            return k as u64;
        }
    }
}

/// Poisson with mean `lam`.
///
/// # Examples
///
/// ```
/// use randomstate_core::Pcg64;
/// use randomstate_distributions::{discrete::Poisson, Distribution};
///
/// let poisson = Poisson::new(3.5).unwrap();
/// let mut rng = Pcg64::from_seed(3, 0);
/// let counts = poisson.sample_n(&mut rng, 10);
/// assert_eq!(counts.len(), 10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Poisson {
    lam: f64,
}

impl Poisson {
    /// # Errors
    ///
    /// `lam` must be non-negative and at most [`POISSON_LAM_MAX`].
    pub fn new(lam: f64) -> Result<Self, DistributionError> {
        check(lam >= 0.0, "lam", lam, "must be non-negative")?;
        check(lam <= POISSON_LAM_MAX, "lam", lam, "too large")?;
        Ok(Self { lam })
    }

    /// Mean.
    pub fn lam(&self) -> f64 {
        self.lam
    }
}

impl Distribution<u64> for Poisson {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> u64 {
        poisson(rng, self.lam)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use randomstate_core::Xoroshiro128Plus;

    fn moments(lam: f64, n: usize) -> (f64, f64) {
        let dist = Poisson::new(lam).unwrap();
        let mut rng = Xoroshiro128Plus::from_seed(17);
        let xs: Vec<f64> = dist.sample_n(&mut rng, n).into_iter().map(|k| k as f64).collect();
        let mean = xs.iter().sum::<f64>() / n as f64;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        (mean, var)
    }

    #[test]
    fn test_zero_mean() {
        let mut rng = Xoroshiro128Plus::from_seed(1);
        let before = rng.clone();
        assert_eq!(Poisson::new(0.0).unwrap().sample(&mut rng), 0);
        assert_eq!(rng, before);
    }

    #[test]
    fn test_moments_either_side_of_threshold() {
        let below = POISSON_PTRS_THRESHOLD - 1e-9;
        for lam in [0.5, 3.0, below, POISSON_PTRS_THRESHOLD, 250.0] {
            let (mean, var) = moments(lam, 200_000);
            let tol = 6.0 * (lam / 200_000.0).sqrt();
            assert!((mean - lam).abs() < tol, "lam {} mean {}", lam, mean);
            assert!((var - lam).abs() < 0.05 * lam, "lam {} var {}", lam, var);
        }
    }

    #[test]
    fn test_threshold_switches_method() {
        // The multiplication method consumes one double per unit of the
        // result plus one; PTRS consumes two per attempt.
        let mut rng = Xoroshiro128Plus::from_seed(5);
        let mut expected = rng.clone();
        let k = poisson(&mut rng, 9.5);
        for _ in 0..=k {
            expected.next_double();
        }
        assert_eq!(rng, expected);
    }

    #[test]
    fn test_parameters() {
        assert!(Poisson::new(-0.1).is_err());
        assert!(Poisson::new(f64::NAN).is_err());
        assert!(Poisson::new(1e19).is_err());
        assert!(Poisson::new(POISSON_LAM_MAX).is_ok());
    }
}
