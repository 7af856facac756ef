//! Geometric distribution: number of trials up to and including the first
//! success, so support starts at 1.

use randomstate_core::BitGenerator;

use crate::distribution::Distribution;
use crate::error::{check, DistributionError};

/// Smallest success probability sampled by sequential search.
pub const GEOMETRIC_SEARCH_THRESHOLD: f64 = 1.0 / 3.0;

pub(crate) fn geometric<G: BitGenerator + ?Sized>(rng: &mut G, p: f64) -> u64 {
    if p >= GEOMETRIC_SEARCH_THRESHOLD {
        search(rng, p)
    } else {
        inversion(rng, p)
    }
}

fn search<G: BitGenerator + ?Sized>(rng: &mut G, p: f64) -> u64 {
    let q = 1.0 - p;
    let u = rng.next_double();
    let mut x = 1;
    let mut prod = p;
    let mut sum = p;
    while u > sum {
        prod *= q;
        sum += prod;
        x += 1;
    }
    x
}

fn inversion<G: BitGenerator + ?Sized>(rng: &mut G, p: f64) -> u64 {
    let mut u = rng.next_double();
    while u == 0.0 {
        u = rng.next_double();
    }
    let x = ((-u).ln_1p() / (-p).ln_1p()).ceil();
    // Saturating cast for p so small the quotient leaves the u64 range.
    (x as u64).max(1)
}

/// Geometric distribution with success probability `p`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometric {
    p: f64,
}

impl Geometric {
    /// # Errors
    ///
    /// `p` must lie in `(0, 1]`.
    pub fn new(p: f64) -> Result<Self, DistributionError> {
        check(p > 0.0 && p <= 1.0, "p", p, "must be in (0, 1]")?;
        Ok(Self { p })
    }

    /// Success probability.
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution<u64> for Geometric {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> u64 {
        geometric(rng, self.p)
    }
}
