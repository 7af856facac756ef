//! The sampling traits.
//!
//! [`Distribution`] is implemented by every validated distribution type.
//! [`Sampler`] adds the parameter-free samplers as methods on any
//! [`BitGenerator`], so `rng.standard_normal()` works for every core.

use randomstate_core::BitGenerator;

use crate::bounded;
use crate::continuous::{exponential, normal};
use crate::error::DistributionError;

/// A probability distribution that can be sampled from any bit generator.
///
/// Implementations are pure functions of the generator's output sequence:
/// re-seeding the generator and sampling again reproduces the same values.
pub trait Distribution<T> {
    /// Draws one sample.
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> T;

    /// Fills `out` with consecutive samples.
    fn fill<G: BitGenerator + ?Sized>(&self, rng: &mut G, out: &mut [T]) {
        for slot in out.iter_mut() {
            *slot = self.sample(rng);
        }
    }

    /// Returns `n` consecutive samples.
    fn sample_n<G: BitGenerator + ?Sized>(&self, rng: &mut G, n: usize) -> Vec<T> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

/// Parameter-free samplers available on every bit generator.
///
/// # Examples
///
/// ```
/// use randomstate_core::{Algorithm, Generator};
/// use randomstate_distributions::Sampler;
///
/// let mut rng = Generator::new(Algorithm::Mt19937, 1).unwrap();
/// let z = rng.standard_normal();
/// let e = rng.standard_exponential();
/// let k = rng.bounded_u64(9);
/// assert!(z.is_finite() && e > 0.0 && k <= 9);
/// ```
pub trait Sampler: BitGenerator {
    /// Uniform double in [0, 1).
    fn standard_uniform(&mut self) -> f64 {
        self.next_double()
    }

    /// Standard Gaussian via the ziggurat method.
    fn standard_normal(&mut self) -> f64 {
        normal::standard_normal(self)
    }

    /// Standard exponential via inversion; zero draws are redrawn.
    fn standard_exponential(&mut self) -> f64 {
        exponential::standard_exponential(self)
    }

    /// Standard Cauchy as a ratio of Gaussians.
    fn standard_cauchy(&mut self) -> f64 {
        crate::continuous::shapes::standard_cauchy(self)
    }

    /// Uniform integer in `[0, max]` by masked rejection.
    fn bounded_u64(&mut self, max: u64) -> u64 {
        bounded::bounded_u64(self, max)
    }

    /// Uniform integer in `[0, max]` by masked rejection on 32-bit draws.
    fn bounded_u32(&mut self, max: u32) -> u32 {
        bounded::bounded_u32(self, max)
    }

    /// Uniform integer in `[low, high)`.
    ///
    /// # Errors
    ///
    /// [`DistributionError::InvalidParameter`] if `low >= high`.
    fn random_range(&mut self, low: i64, high: i64) -> Result<i64, DistributionError> {
        Ok(bounded::UniformInt::new(low, high)?.sample(self))
    }

    /// Draws one sample from `dist`.
    fn sample<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        dist.sample(self)
    }
}

impl<G: BitGenerator + ?Sized> Sampler for G {}

/// Uniform double in the open interval (0, 1); exact zeros are redrawn.
#[inline]
pub(crate) fn open_unit<G: BitGenerator + ?Sized>(rng: &mut G) -> f64 {
    loop {
        let u = rng.next_double();
        if u > 0.0 {
            return u;
        }
    }
}
