//! Continuous uniform distribution.

use randomstate_core::BitGenerator;

use crate::distribution::Distribution;
use crate::error::{check, DistributionError};

/// Uniform on [0, 1), the generator's own `next_double`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StandardUniform;

impl Distribution<f64> for StandardUniform {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        rng.next_double()
    }

    fn fill<G: BitGenerator + ?Sized>(&self, rng: &mut G, out: &mut [f64]) {
        rng.fill_double(out);
    }
}

/// Largest double strictly below a finite `x`.
fn next_below(x: f64) -> f64 {
    if x == 0.0 {
        -f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

/// Uniform on `[low, high)` by direct scaling of `next_double`.
///
/// Scaling can round a draw just below 1 up to `high`; such results are
/// clamped to the largest double below `high`.
///
/// # Examples
///
/// ```
/// use randomstate_core::Mt19937;
/// use randomstate_distributions::{continuous::Uniform, Distribution};
///
/// let dist = Uniform::new(-2.0, 3.0).unwrap();
/// let mut rng = Mt19937::from_seed(5489);
/// let x = dist.sample(&mut rng);
/// assert!((-2.0..3.0).contains(&x));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniform {
    low: f64,
    range: f64,
    max: f64,
}

impl Uniform {
    /// # Errors
    ///
    /// Both bounds must be finite with `low < high`, and `high - low` must
    /// not overflow.
    pub fn new(low: f64, high: f64) -> Result<Self, DistributionError> {
        check(low.is_finite(), "low", low, "must be finite")?;
        check(high.is_finite(), "high", high, "must be finite")?;
        check(low < high, "high", high, "must exceed low")?;
        let range = high - low;
        check(range.is_finite(), "high", high, "range overflows")?;
        Ok(Self {
            low,
            range,
            max: next_below(high),
        })
    }

    /// Inclusive lower bound.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Largest value a sample can take.
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Distribution<f64> for Uniform {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> f64 {
        (self.low + self.range * rng.next_double()).min(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use randomstate_core::{Algorithm, Pcg32, RngError, Snapshot};

    /// Always returns the largest double below one.
    struct TopOfUnit(Pcg32);

    impl BitGenerator for TopOfUnit {
        fn algorithm(&self) -> Algorithm {
            self.0.algorithm()
        }

        fn next_uint32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_uint64(&mut self) -> u64 {
            u64::MAX
        }

        fn next_double(&mut self) -> f64 {
            1.0 - f64::EPSILON / 2.0
        }

        fn snapshot(&self) -> Snapshot {
            self.0.snapshot()
        }

        fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
            self.0.restore(snapshot)
        }
    }

    #[test]
    fn test_largest_draw_stays_below_high() {
        let mut rng = TopOfUnit(Pcg32::from_seed(1, 1));
        let ranges = [
            (1.0, 2.0),
            (-2.0, -1.0),
            (-1.0, 0.0),
            (0.0, 1e-300),
            (1e6, 1e6 + 1e-3),
            (-1e300, 1e300),
        ];
        for (low, high) in ranges {
            let dist = Uniform::new(low, high).unwrap();
            let x = dist.sample(&mut rng);
            assert!(x >= low && x < high, "[{}, {}) gave {}", low, high, x);
        }
        // 1 + (1 - 2^-53) rounds to 2.0 before clamping
        let dist = Uniform::new(1.0, 2.0).unwrap();
        assert_eq!(dist.sample(&mut rng), 2.0 - f64::EPSILON);
    }

    #[test]
    fn test_next_below() {
        assert_eq!(next_below(2.0), 2.0 - f64::EPSILON);
        assert_eq!(next_below(-1.0), -1.0 - f64::EPSILON);
        assert!(next_below(0.0) < 0.0);
        assert_eq!(next_below(f64::MIN_POSITIVE * 0.5).to_bits() + 1, (f64::MIN_POSITIVE * 0.5).to_bits());
    }

    #[test]
    fn test_low_end_reachable() {
        let mut rng = Pcg32::from_seed(0, 0);
        let dist = Uniform::new(-3.0, 5.0).unwrap();
        assert_eq!(dist.low(), -3.0);
        for _ in 0..10_000 {
            let x = dist.sample(&mut rng);
            assert!((-3.0..5.0).contains(&x));
        }
    }

    #[test]
    fn test_bounds_checked() {
        assert!(Uniform::new(1.0, 1.0).is_err());
        assert!(Uniform::new(2.0, 1.0).is_err());
        assert!(Uniform::new(f64::NEG_INFINITY, 1.0).is_err());
        assert!(Uniform::new(-f64::MAX, f64::MAX).is_err());
    }

    #[test]
    fn test_standard_uniform_fill_matches_next_double() {
        let mut a = Pcg32::from_seed(42, 54);
        let mut b = a.clone();
        let mut buf = [0.0; 16];
        StandardUniform.fill(&mut a, &mut buf);
        for &x in &buf {
            assert_eq!(x, b.next_double());
        }
    }
}
