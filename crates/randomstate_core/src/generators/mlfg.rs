//! Multiplicative lagged Fibonacci generator MLFG(1279, 861).
//!
//! `x[n] = x[n - 1279] * x[n - 861] mod 2^64` over odd 64-bit words,
//! kept in a 1279-word ring. Only the high 32 bits of each product are
//! returned; the low bits of a multiplicative lagged generator are weak.

use crate::algorithm::Algorithm;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::snapshot::{Snapshot, StateReader, StateWriter};
use crate::traits::{impl_rng_core, BitGenerator, SeedableGenerator};
use crate::word::{compose_u64, u32_pair_to_double, SplitMix64};

/// Long lag.
pub const MLFG_LONG_LAG: usize = 1279;
/// Short lag.
pub const MLFG_SHORT_LAG: usize = 861;

const OFFSET: usize = MLFG_LONG_LAG - MLFG_SHORT_LAG;

/// MLFG(1279, 861) generator state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mlfg1279861 {
    lags: Box<[u64]>,
    pos: usize,
}

impl Mlfg1279861 {
    /// Fills the ring from a SplitMix64 stream, forcing every word odd.
    pub fn from_seed(seed: u64) -> Self {
        let mut sm = SplitMix64::new(seed);
        let lags = (0..MLFG_LONG_LAG).map(|_| sm.next_u64() | 1).collect();
        Self { lags, pos: 0 }
    }

    #[inline]
    fn step(&mut self) -> u64 {
        let mut other = self.pos + OFFSET;
        if other >= MLFG_LONG_LAG {
            other -= MLFG_LONG_LAG;
        }
        let value = self.lags[self.pos].wrapping_mul(self.lags[other]);
        self.lags[self.pos] = value;
        self.pos += 1;
        if self.pos == MLFG_LONG_LAG {
            self.pos = 0;
        }
        value
    }
}

impl BitGenerator for Mlfg1279861 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Mlfg1279861
    }

    #[inline]
    fn next_uint32(&mut self) -> u32 {
        (self.step() >> 32) as u32
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

    fn snapshot(&self) -> Snapshot {
        StateWriter::with_capacity(MLFG_LONG_LAG * 8 + 4)
            .u64s(&self.lags)
            .index(self.pos)
            .finish(Algorithm::Mlfg1279861)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        let mut reader = StateReader::open(snapshot, Algorithm::Mlfg1279861)?;
        let mut lags = vec![0u64; MLFG_LONG_LAG];
        reader.u64s(&mut lags)?;
        let pos = reader.index(MLFG_LONG_LAG - 1)?;
        reader.finish()?;
        if lags.iter().any(|&w| w & 1 == 0) {
            return Err(RngError::CorruptSnapshot(
                "mlfg lag table must hold only odd words".to_string(),
            ));
        }
        self.lags = lags.into_boxed_slice();
        self.pos = pos;
        Ok(())
    }
}

impl SeedableGenerator for Mlfg1279861 {
    const ALGORITHM: Algorithm = Algorithm::Mlfg1279861;
    type KeyWord = u64;

    fn seed_from_u64(seed: u64) -> Result<Self, RngError> {
        Ok(Self::from_seed(seed))
    }

    /// The key must hold exactly 1279 words; each is forced odd.
    fn from_key(key: &[u64]) -> Result<Self, RngError> {
        if key.len() != MLFG_LONG_LAG {
            return Err(RngError::invalid_key(
                Algorithm::Mlfg1279861,
                format!("expected {} words, got {}", MLFG_LONG_LAG, key.len()),
            ));
        }
        Ok(Self {
            lags: key.iter().map(|&w| w | 1).collect(),
            pos: 0,
        })
    }

    fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError> {
        let key = source.random_u64s(MLFG_LONG_LAG)?;
        tracing::debug!(algorithm = %Algorithm::Mlfg1279861, words = key.len(), "seeding from entropy");
        Self::from_key(&key)
    }
}

impl_rng_core!(Mlfg1279861);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_matches_lags() {
        let rng = Mlfg1279861::from_seed(17);
        let initial = rng.lags.clone();
        let mut rng = rng;
        let first = rng.step();
        assert_eq!(first, initial[0].wrapping_mul(initial[OFFSET]));
        // Word 861 of the original ring pairs with word 0 once overwritten.
        for _ in 1..MLFG_SHORT_LAG {
            rng.step();
        }
        let expected = initial[MLFG_SHORT_LAG].wrapping_mul(first);
        assert_eq!(rng.step(), expected);
    }

    #[test]
    fn test_words_stay_odd() {
        let mut rng = Mlfg1279861::from_seed(3);
        for _ in 0..5000 {
            assert_eq!(rng.step() & 1, 1);
        }
    }

    #[test]
    fn test_key_length_enforced() {
        assert!(matches!(
            Mlfg1279861::from_key(&[1, 3, 5]),
            Err(RngError::InvalidKey { .. })
        ));
        let key = vec![2u64; MLFG_LONG_LAG];
        let rng = Mlfg1279861::from_key(&key).unwrap();
        assert!(rng.lags.iter().all(|&w| w == 3));
    }

    #[test]
    fn test_even_word_snapshot_rejected() {
        let mut rng = Mlfg1279861::from_seed(1);
        let bad = StateWriter::with_capacity(0)
            .u64s(&vec![2u64; MLFG_LONG_LAG])
            .index(0)
            .finish(Algorithm::Mlfg1279861);
        assert!(matches!(
            rng.restore(&bad),
            Err(RngError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_jump_unsupported() {
        let mut rng = Mlfg1279861::from_seed(1);
        assert!(rng.jump().is_err());
        assert!(!rng.is_jumpable());
    }
}
