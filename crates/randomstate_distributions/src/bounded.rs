//! Bounded integers by masked rejection.
//!
//! A draw is masked down to the smallest all-ones value covering `max`
//! and rejected while it exceeds `max`; fewer than two draws are needed on
//! average. Ranges that fit in 32 bits consume `next_uint32`, wider ones
//! `next_uint64`.

use randomstate_core::BitGenerator;

use crate::distribution::Distribution;
use crate::error::{check, DistributionError};

#[inline]
fn mask_u64(max: u64) -> u64 {
    u64::MAX >> max.leading_zeros()
}

/// Uniform integer in `[0, max]`.
pub fn bounded_u64<G: BitGenerator + ?Sized>(rng: &mut G, max: u64) -> u64 {
    if max == 0 {
        return 0;
    }
    if max <= u32::MAX as u64 {
        return bounded_u32(rng, max as u32) as u64;
    }
    let mask = mask_u64(max);
    loop {
        let value = rng.next_uint64() & mask;
        if value <= max {
            return value;
        }
    }
}

/// Uniform integer in `[0, max]` from 32-bit draws.
pub fn bounded_u32<G: BitGenerator + ?Sized>(rng: &mut G, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    let mask = u32::MAX >> max.leading_zeros();
    loop {
        let value = rng.next_uint32() & mask;
        if value <= max {
            return value;
        }
    }
}

/// Uniform integer on `[low, high)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformInt {
    low: i64,
    span: u64,
}

impl UniformInt {
    /// # Errors
    ///
    /// [`DistributionError::InvalidParameter`] unless `low < high`.
    pub fn new(low: i64, high: i64) -> Result<Self, DistributionError> {
        check(low < high, "high", high as f64, "must exceed low")?;
        // high - low - 1 always fits in u64
        let span = high.wrapping_sub(low).wrapping_sub(1) as u64;
        Ok(Self { low, span })
    }
}

impl Distribution<i64> for UniformInt {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> i64 {
        self.low.wrapping_add(bounded_u64(rng, self.span) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use randomstate_core::{Pcg32, Xorshift128};

    #[test]
    fn test_mask() {
        assert_eq!(mask_u64(1), 1);
        assert_eq!(mask_u64(5), 7);
        assert_eq!(mask_u64(8), 15);
        assert_eq!(mask_u64(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_zero_max_consumes_nothing() {
        let mut rng = Pcg32::from_seed(42, 54);
        let before = rng.clone();
        assert_eq!(bounded_u64(&mut rng, 0), 0);
        assert_eq!(rng, before);
    }

    #[test]
    fn test_small_range_uses_32_bit_draws() {
        let mut a = Pcg32::from_seed(42, 54);
        let mut b = a.clone();
        let x = bounded_u64(&mut a, 0xffff_ffff);
        assert_eq!(x, b.next_uint32() as u64);
    }

    #[test]
    fn test_full_i64_range() {
        let dist = UniformInt::new(i64::MIN, i64::MAX).unwrap();
        let mut rng = Xorshift128::from_seed(1);
        for _ in 0..1000 {
            let x = dist.sample(&mut rng);
            assert!(x < i64::MAX);
        }
    }

    #[test]
    fn test_die_frequencies() {
        let die = UniformInt::new(1, 7).unwrap();
        let mut rng = Xorshift128::from_seed(6);
        let mut counts = [0usize; 6];
        for _ in 0..60_000 {
            counts[(die.sample(&mut rng) - 1) as usize] += 1;
        }
        for &c in &counts {
            assert!((9_400..10_600).contains(&c), "counts = {:?}", counts);
        }
    }

    #[test]
    fn test_empty_range_rejected() {
        assert!(UniformInt::new(3, 3).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Bounded draws never exceed the bound.
        #[test]
        fn prop_bounded_within_max(seed in any::<u64>(), max in any::<u64>()) {
            let mut rng = Xorshift128::from_seed(seed);
            for _ in 0..16 {
                prop_assert!(bounded_u64(&mut rng, max) <= max);
            }
        }

        /// Ranges are half-open.
        #[test]
        fn prop_range_half_open(seed in any::<u64>(), low in -1000i64..1000, width in 1i64..500) {
            let dist = UniformInt::new(low, low + width).unwrap();
            let mut rng = Xorshift128::from_seed(seed);
            for _ in 0..16 {
                let x = dist.sample(&mut rng);
                prop_assert!(x >= low && x < low + width);
            }
        }
    }
}
