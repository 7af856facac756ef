//! PCG32: permuted congruential generator, XSH-RR output, 64-bit state.
//!
//! Reference: O'Neill (2014), `pcg32_random_r` / `pcg32_srandom_r`.
//! Period 2^64 per stream; 2^63 selectable streams. `jump` advances by
//! 2^32 steps, and [`Pcg32::advance`] moves by any distance in
//! O(log delta) time.

use crate::algorithm::Algorithm;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::snapshot::{Snapshot, StateReader, StateWriter};
use crate::traits::{impl_rng_core, BitGenerator, SeedableGenerator};
use crate::word::{compose_u64, u32_pair_to_double};

const MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// Steps taken by a single [`BitGenerator::jump`].
pub const PCG32_JUMP_STEPS: u64 = 1 << 32;

/// LCG jump-ahead by `delta` steps (Brown, "Random number generation with
/// arbitrary strides", 1994).
pub(crate) fn advance_lcg_64(state: u64, mut delta: u64, mult: u64, plus: u64) -> u64 {
    let mut acc_mult = 1u64;
    let mut acc_plus = 0u64;
    let mut cur_mult = mult;
    let mut cur_plus = plus;
    while delta > 0 {
        if delta & 1 == 1 {
            acc_mult = acc_mult.wrapping_mul(cur_mult);
            acc_plus = acc_plus.wrapping_mul(cur_mult).wrapping_add(cur_plus);
        }
        cur_plus = cur_mult.wrapping_add(1).wrapping_mul(cur_plus);
        cur_mult = cur_mult.wrapping_mul(cur_mult);
        delta >>= 1;
    }
    acc_mult.wrapping_mul(state).wrapping_add(acc_plus)
}

/// PCG32 generator state.
///
/// # Examples
///
/// ```
/// use randomstate_core::{BitGenerator, Pcg32};
///
/// let mut rng = Pcg32::from_seed(42, 54);
/// assert_eq!(rng.next_uint32(), 0xa15c_02b7);
///
/// let mut ahead = rng.clone();
/// ahead.advance(10);
/// for _ in 0..10 {
///     rng.next_uint32();
/// }
/// assert_eq!(rng, ahead);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Seeds with an initial state and a stream selector.
    pub fn from_seed(initstate: u64, initseq: u64) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (initseq << 1) | 1,
        };
        rng.step();
        rng.state = rng.state.wrapping_add(initstate);
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(self.inc);
    }

    /// Advances the state as if `delta` outputs had been drawn.
    pub fn advance(&mut self, delta: u64) {
        self.state = advance_lcg_64(self.state, delta, MULTIPLIER, self.inc);
    }

    /// Raw `(state, increment)` pair.
    pub fn state(&self) -> (u64, u64) {
        (self.state, self.inc)
    }
}

impl BitGenerator for Pcg32 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Pcg32
    }

    #[inline]
    fn next_uint32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    #[inline]
    fn next_uint64(&mut self) -> u64 {
        let hi = self.next_uint32();
        let lo = self.next_uint32();
        compose_u64(hi, lo)
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        let a = self.next_uint32();
        let b = self.next_uint32();
        u32_pair_to_double(a, b)
    }

    fn jump(&mut self) -> Result<(), RngError> {
        self.advance(PCG32_JUMP_STEPS);
        tracing::debug!(algorithm = %Algorithm::Pcg32, "jumped 2^32 steps");
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        StateWriter::with_capacity(16)
            .u64(self.state)
            .u64(self.inc)
            .finish(Algorithm::Pcg32)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        let mut reader = StateReader::open(snapshot, Algorithm::Pcg32)?;
        let state = reader.u64()?;
        let inc = reader.u64()?;
        reader.finish()?;
        if inc & 1 == 0 {
            return Err(RngError::CorruptSnapshot(
                "pcg32 increment must be odd".to_string(),
            ));
        }
        self.state = state;
        self.inc = inc;
        Ok(())
    }
}

impl SeedableGenerator for Pcg32 {
    const ALGORITHM: Algorithm = Algorithm::Pcg32;
    type KeyWord = u64;

    fn seed_from_u64(seed: u64) -> Result<Self, RngError> {
        Ok(Self::from_seed(seed, 0))
    }

    /// Key layout: `[initstate, initseq]`.
    fn from_key(key: &[u64]) -> Result<Self, RngError> {
        match key {
            [state, seq] => Ok(Self::from_seed(*state, *seq)),
            _ => Err(RngError::invalid_key(
                Algorithm::Pcg32,
                format!("expected 2 words, got {}", key.len()),
            )),
        }
    }

    fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError> {
        let key = source.random_u64s(2)?;
        tracing::debug!(algorithm = %Algorithm::Pcg32, "seeding from entropy");
        Self::from_key(&key)
    }
}

impl_rng_core!(Pcg32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sequence() {
        let mut rng = Pcg32::from_seed(42, 54);
        let expected = [
            0xa15c_02b7u32,
            0x7b47_f409,
            0xba1d_3330,
            0x83d2_f293,
            0xbfa4_784b,
            0xcbed_606e,
        ];
        for &e in &expected {
            assert_eq!(rng.next_uint32(), e);
        }
    }

    #[test]
    fn test_advance_matches_stepping() {
        for delta in [0u64, 1, 2, 3, 17, 1000, 4097] {
            let mut stepped = Pcg32::from_seed(7, 11);
            let mut advanced = stepped.clone();
            for _ in 0..delta {
                stepped.next_uint32();
            }
            advanced.advance(delta);
            assert_eq!(stepped, advanced, "delta = {}", delta);
        }
    }

    #[test]
    fn test_advance_full_period_is_identity() {
        let rng = Pcg32::from_seed(1, 2);
        let mut wrapped = rng.clone();
        // 2^64 steps = two advances of 2^63
        wrapped.advance(1 << 63);
        wrapped.advance(1 << 63);
        assert_eq!(rng, wrapped);
    }

    #[test]
    fn test_jump_is_two_pow_32_steps() {
        let mut jumped = Pcg32::from_seed(3, 4);
        let mut advanced = jumped.clone();
        jumped.jump().unwrap();
        advanced.advance(1 << 16);
        advanced.advance((1 << 32) - (1 << 16));
        assert_eq!(jumped, advanced);
    }

    #[test]
    fn test_key_length_checked() {
        assert!(Pcg32::from_key(&[1, 2]).is_ok());
        for bad in [&[][..], &[1][..], &[1, 2, 3][..]] {
            assert!(matches!(
                Pcg32::from_key(bad),
                Err(RngError::InvalidKey { .. })
            ));
        }
    }

    #[test]
    fn test_even_increment_snapshot_rejected() {
        let mut rng = Pcg32::from_seed(1, 1);
        let bad = StateWriter::with_capacity(16)
            .u64(5)
            .u64(4)
            .finish(Algorithm::Pcg32);
        assert!(matches!(rng.restore(&bad), Err(RngError::CorruptSnapshot(_))));
    }
}
