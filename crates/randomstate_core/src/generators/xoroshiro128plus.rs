//! xoroshiro128+ (Blackman & Vigna, 2016; rotation constants 55/14/36).
//!
//! Two 64-bit words of state (never both zero), period 2^128 - 1.
//! `jump` advances by 2^64 steps.

use crate::algorithm::Algorithm;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::snapshot::{Snapshot, StateReader, StateWriter};
use crate::traits::{impl_rng_core, BitGenerator, SeedableGenerator};
use crate::word::{u64_to_double, HalfWordBuffer, SplitMix64};

use super::{jump_two_words, validate_nonzero};

const JUMP: [u64; 2] = [0xbeac_0467_eba5_facb, 0xd86b_048b_86aa_9922];

#[inline]
fn next_word(s: &mut [u64; 2]) -> u64 {
    let s0 = s[0];
    let mut s1 = s[1];
    let result = s0.wrapping_add(s1);
    s1 ^= s0;
    s[0] = s0.rotate_left(55) ^ s1 ^ (s1 << 14);
    s[1] = s1.rotate_left(36);
    result
}

/// xoroshiro128+ generator state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xoroshiro128Plus {
    s: [u64; 2],
    half: HalfWordBuffer,
}

impl Xoroshiro128Plus {
    /// Expands a 64-bit seed with SplitMix64.
    pub fn from_seed(seed: u64) -> Self {
        let mut sm = SplitMix64::new(seed);
        Self {
            s: [sm.next_u64(), sm.next_u64()],
            half: HalfWordBuffer::new(),
        }
    }

    /// Uses `state` directly; both words zero is rejected.
    pub fn from_state(state: [u64; 2]) -> Result<Self, RngError> {
        validate_nonzero(Algorithm::Xoroshiro128Plus, &state)?;
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

impl BitGenerator for Xoroshiro128Plus {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Xoroshiro128Plus
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
        tracing::debug!(algorithm = %Algorithm::Xoroshiro128Plus, "jumped 2^64 steps");
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        let (has, value) = self.half.to_parts();
        StateWriter::with_capacity(21)
            .u64s(&self.s)
            .bool(has)
            .u32(value)
            .finish(Algorithm::Xoroshiro128Plus)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        let mut reader = StateReader::open(snapshot, Algorithm::Xoroshiro128Plus)?;
        let mut s = [0u64; 2];
        reader.u64s(&mut s)?;
        let has = reader.bool()?;
        let value = reader.u32()?;
        reader.finish()?;
        if s == [0, 0] {
            return Err(RngError::CorruptSnapshot(
                "xoroshiro128plus state must not be all zero".to_string(),
            ));
        }
        self.s = s;
        self.half = HalfWordBuffer::from_parts(has, value);
        Ok(())
    }
}

impl SeedableGenerator for Xoroshiro128Plus {
    const ALGORITHM: Algorithm = Algorithm::Xoroshiro128Plus;
    type KeyWord = u64;

    fn seed_from_u64(seed: u64) -> Result<Self, RngError> {
        Ok(Self::from_seed(seed))
    }

    fn from_key(key: &[u64]) -> Result<Self, RngError> {
        let state: [u64; 2] = key.try_into().map_err(|_| {
            RngError::invalid_key(
                Algorithm::Xoroshiro128Plus,
                format!("expected 2 words, got {}", key.len()),
            )
        })?;
        Self::from_state(state)
    }

    fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError> {
        let key = source.random_u64s(2)?;
        tracing::debug!(algorithm = %Algorithm::Xoroshiro128Plus, "seeding from entropy");
        Self::from_key(&key)
    }
}

impl_rng_core!(Xoroshiro128Plus);
