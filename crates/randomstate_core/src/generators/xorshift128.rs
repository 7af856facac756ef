//! xorshift128+ (Vigna, 2014).
//!
//! Two 64-bit words of state (never both zero), period 2^128 - 1.
//! `jump` advances by 2^64 steps using the published jump polynomial.

use crate::algorithm::Algorithm;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::snapshot::{Snapshot, StateReader, StateWriter};
use crate::traits::{impl_rng_core, BitGenerator, SeedableGenerator};
use crate::word::{u64_to_double, HalfWordBuffer, SplitMix64};

use super::{jump_two_words, validate_nonzero};

const JUMP: [u64; 2] = [0x8a5c_d789_635d_2dff, 0x121f_d215_5c47_2f96];

#[inline]
fn next_word(s: &mut [u64; 2]) -> u64 {
    let mut s1 = s[0];
    let s0 = s[1];
    s[0] = s0;
    s1 ^= s1 << 23;
    s[1] = s1 ^ s0 ^ (s1 >> 18) ^ (s0 >> 5);
    s[1].wrapping_add(s0)
}

/// xorshift128+ generator state.
///
/// # Examples
///
/// ```
/// use randomstate_core::{BitGenerator, Xorshift128};
///
/// let mut a = Xorshift128::from_seed(1);
/// let mut b = a.clone();
/// b.jump().unwrap();
/// assert_ne!(a.next_uint64(), b.next_uint64());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xorshift128 {
    s: [u64; 2],
    half: HalfWordBuffer,
}

impl Xorshift128 {
    /// Expands a 64-bit seed with SplitMix64.
    pub fn from_seed(seed: u64) -> Self {
        let mut sm = SplitMix64::new(seed);
        Self {
            s: [sm.next_u64(), sm.next_u64()],
            half: HalfWordBuffer::new(),
        }
    }

    /// Uses `state` directly.
    ///
    /// # Errors
    ///
    /// [`RngError::InvalidKey`] if both words are zero.
    pub fn from_state(state: [u64; 2]) -> Result<Self, RngError> {
        validate_nonzero(Algorithm::Xorshift128, &state)?;
        Ok(Self {
            s: state,
            half: HalfWordBuffer::new(),
        })
    }

    /// Raw state words.
    pub fn state(&self) -> [u64; 2] {
        self.s
    }
}

impl BitGenerator for Xorshift128 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Xorshift128
    }

    #[inline]
    fn next_uint32(&mut self) -> u32 {
        self.half.next_u32(|| next_word(&mut self.s))
    }

    #[inline]
    fn next_uint64(&mut self) -> u64 {
        next_word(&mut self.s)
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        u64_to_double(next_word(&mut self.s))
    }

    fn jump(&mut self) -> Result<(), RngError> {
        jump_two_words(&mut self.s, &JUMP, next_word);
        self.half.clear();
        tracing::debug!(algorithm = %Algorithm::Xorshift128, "jumped 2^64 steps");
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        let (has, value) = self.half.to_parts();
        StateWriter::with_capacity(21)
            .u64s(&self.s)
            .bool(has)
            .u32(value)
            .finish(Algorithm::Xorshift128)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        let mut reader = StateReader::open(snapshot, Algorithm::Xorshift128)?;
        let mut s = [0u64; 2];
        reader.u64s(&mut s)?;
        let has = reader.bool()?;
        let value = reader.u32()?;
        reader.finish()?;
        if s == [0, 0] {
            return Err(RngError::CorruptSnapshot(
                "xorshift128 state must not be all zero".to_string(),
            ));
        }
        self.s = s;
        self.half = HalfWordBuffer::from_parts(has, value);
        Ok(())
    }
}

impl SeedableGenerator for Xorshift128 {
    const ALGORITHM: Algorithm = Algorithm::Xorshift128;
    type KeyWord = u64;

    fn seed_from_u64(seed: u64) -> Result<Self, RngError> {
        Ok(Self::from_seed(seed))
    }

    fn from_key(key: &[u64]) -> Result<Self, RngError> {
        let state: [u64; 2] = key.try_into().map_err(|_| {
            RngError::invalid_key(
                Algorithm::Xorshift128,
                format!("expected 2 words, got {}", key.len()),
            )
        })?;
        Self::from_state(state)
    }

    fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError> {
        let key = source.random_u64s(2)?;
        tracing::debug!(algorithm = %Algorithm::Xorshift128, "seeding from entropy");
        Self::from_key(&key)
    }
}

impl_rng_core!(Xorshift128);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::gf2::{characteristic_polynomial, x_pow_two_pow};

    #[test]
    fn test_known_state_step() {
        let mut rng = Xorshift128::from_state([1, 2]).unwrap();
        // s1 = 1 ^ (1 << 23); s[1] = s1 ^ 2 ^ (s1 >> 18) ^ (2 >> 5)
        let s1 = 1u64 ^ (1 << 23);
        let new1 = s1 ^ 2 ^ (s1 >> 18);
        assert_eq!(rng.next_uint64(), new1.wrapping_add(2));
        assert_eq!(rng.state(), [2, new1]);
    }

    #[test]
    fn test_zero_state_rejected() {
        assert!(matches!(
            Xorshift128::from_key(&[0, 0]),
            Err(RngError::InvalidKey { .. })
        ));
        assert!(matches!(
            Xorshift128::from_key(&[1]),
            Err(RngError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_jump_commutes_with_stepping() {
        // J(T)·T = T·J(T): stepping then jumping equals jumping then stepping.
        let mut a = Xorshift128::from_seed(77);
        let mut b = a.clone();
        a.next_uint64();
        a.jump().unwrap();
        b.jump().unwrap();
        b.next_uint64();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_jump_polynomial_is_two_pow_64_steps() {
        let mut rng = Xorshift128::from_state([0x0123_4567, 0x89ab_cdef]).unwrap();
        let bits: Vec<bool> = (0..300)
            .map(|_| {
                rng.next_uint64();
                rng.state()[1] & 1 == 1
            })
            .collect();
        let p = characteristic_polynomial(&bits);
        assert_eq!(p.degree(), Some(128));
        assert_eq!(x_pow_two_pow(64, &p).to_words(2), JUMP.to_vec());
    }

    #[test]
    fn test_jumped_state_reference() {
        let mut rng = Xorshift128::from_seed(77);
        rng.jump().unwrap();
        assert_eq!(rng.state(), [0xd33e_e1db_8acd_4d79, 0xb15b_7d4f_8c20_f684]);
    }
}
