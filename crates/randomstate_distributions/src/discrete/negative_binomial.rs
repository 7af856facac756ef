//! Negative binomial as a gamma-Poisson mixture.

use randomstate_core::BitGenerator;

use super::poisson::{poisson, POISSON_LAM_MAX};
use crate::continuous::gamma::standard_gamma;
use crate::distribution::Distribution;
use crate::error::{check, DistributionError};

/// Failures before the `n`th success with success probability `p`.
///
/// Sampled as `Poisson(Gamma(n, (1 - p) / p))`, which also admits
/// non-integer `n`. The mixing mean is capped at [`POISSON_LAM_MAX`], so for
/// very small `p` (roughly `n / p > 9.2e18`) draws saturate near that cap
/// instead of following the exact tail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NegativeBinomial {
    n: f64,
    p: f64,
}

impl NegativeBinomial {
    /// # Errors
    ///
    /// `n` must be positive and finite, `p` must lie in `(0, 1]`.
    pub fn new(n: f64, p: f64) -> Result<Self, DistributionError> {
        check(n > 0.0 && n.is_finite(), "n", n, "must be positive and finite")?;
        check(p > 0.0 && p <= 1.0, "p", p, "must be in (0, 1]")?;
        Ok(Self { n, p })
    }

    /// Number of successes.
    pub fn n(&self) -> f64 {
        self.n
    }

    /// Success probability.
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution<u64> for NegativeBinomial {
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> u64 {
        if self.p == 1.0 {
            return 0;
        }
        // An infinite gamma draw also lands on the cap.
        let lam = (standard_gamma(rng, self.n) * (1.0 - self.p) / self.p).min(POISSON_LAM_MAX);
        poisson(rng, lam)
    }
}
