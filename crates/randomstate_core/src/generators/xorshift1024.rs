//! xorshift1024* (Vigna, 2014).
//!
//! Sixteen 64-bit words plus a rotating position, period 2^1024 - 1.
//! `jump` advances by 2^512 steps.

use crate::algorithm::Algorithm;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::snapshot::{Snapshot, StateReader, StateWriter};
use crate::traits::{impl_rng_core, BitGenerator, SeedableGenerator};
use crate::word::{u64_to_double, HalfWordBuffer, SplitMix64};

use super::validate_nonzero;

const WORDS: usize = 16;

const JUMP: [u64; WORDS] = [
    0x8424_2f96_eca9_c41d,
    0xa3c6_5b87_76f9_6855,
    0x5b34_a39f_070b_5837,
    0x4489_affc_e4f3_1a1e,
    0x2ffe_eb0a_4831_6f40,
    0xdc2d_9891_fe68_c022,
    0x3659_132b_b12f_ea70,
    0xaac1_7d8e_fa43_cab8,
    0xc4cb_8155_9098_9b13,
    0x5ee9_7528_3d71_c93b,
    0x6915_48c8_6c1b_d540,
    0x7910_c41d_10a1_e6a5,
    0x0b5f_c645_63b3_e2a8,
    0x047f_7684_e9fc_949d,
    0xb991_81f2_d8f6_85ca,
    0x2846_00e3_f30e_38c3,
];

#[inline]
fn next_word(s: &mut [u64; WORDS], p: &mut usize) -> u64 {
    let s0 = s[*p];
    *p = (*p + 1) & (WORDS - 1);
    let mut s1 = s[*p];
    s1 ^= s1 << 31;
    s[*p] = s1 ^ s0 ^ (s1 >> 11) ^ (s0 >> 30);
    s[*p].wrapping_mul(1_181_783_497_276_652_981)
}

/// xorshift1024* generator state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xorshift1024 {
    s: [u64; WORDS],
    p: usize,
    half: HalfWordBuffer,
}

impl Xorshift1024 {
    /// Expands a 64-bit seed with SplitMix64.
    pub fn from_seed(seed: u64) -> Self {
        let mut sm = SplitMix64::new(seed);
        let mut s = [0u64; WORDS];
        for word in s.iter_mut() {
            *word = sm.next_u64();
        }
        Self {
            s,
            p: 0,
            half: HalfWordBuffer::new(),
        }
    }

    /// Uses `state` directly with position 0; an all-zero state is rejected.
    pub fn from_state(state: [u64; WORDS]) -> Result<Self, RngError> {
        validate_nonzero(Algorithm::Xorshift1024, &state)?;
        Ok(Self {
            s: state,
            p: 0,
            half: HalfWordBuffer::new(),
        })
    }

    /// Raw state words and position.
    pub fn state(&self) -> ([u64; WORDS], usize) {
        (self.s, self.p)
    }
}

impl BitGenerator for Xorshift1024 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Xorshift1024
    }

    #[inline]
    fn next_uint32(&mut self) -> u32 {
        self.half.next_u32(|| next_word(&mut self.s, &mut self.p))
    }

    #[inline]
    fn next_uint64(&mut self) -> u64 {
        next_word(&mut self.s, &mut self.p)
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        u64_to_double(next_word(&mut self.s, &mut self.p))
    }

    fn jump(&mut self) -> Result<(), RngError> {
        let mut t = [0u64; WORDS];
        for &jump in JUMP.iter() {
            for b in 0..64 {
                if jump & (1u64 << b) != 0 {
                    for (j, acc) in t.iter_mut().enumerate() {
                        *acc ^= self.s[(j + self.p) & (WORDS - 1)];
                    }
                }
                next_word(&mut self.s, &mut self.p);
            }
        }
        for (j, &word) in t.iter().enumerate() {
            self.s[(j + self.p) & (WORDS - 1)] = word;
        }
        self.half.clear();
        tracing::debug!(algorithm = %Algorithm::Xorshift1024, "jumped 2^512 steps");
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        let (has, value) = self.half.to_parts();
        StateWriter::with_capacity(WORDS * 8 + 9)
            .u64s(&self.s)
            .index(self.p)
            .bool(has)
            .u32(value)
            .finish(Algorithm::Xorshift1024)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        let mut reader = StateReader::open(snapshot, Algorithm::Xorshift1024)?;
        let mut s = [0u64; WORDS];
        reader.u64s(&mut s)?;
        let p = reader.index(WORDS - 1)?;
        let has = reader.bool()?;
        let value = reader.u32()?;
        reader.finish()?;
        if s.iter().all(|&w| w == 0) {
            return Err(RngError::CorruptSnapshot(
                "xorshift1024 state must not be all zero".to_string(),
            ));
        }
        self.s = s;
        self.p = p;
        self.half = HalfWordBuffer::from_parts(has, value);
        Ok(())
    }
}

impl SeedableGenerator for Xorshift1024 {
    const ALGORITHM: Algorithm = Algorithm::Xorshift1024;
    type KeyWord = u64;

    fn seed_from_u64(seed: u64) -> Result<Self, RngError> {
        Ok(Self::from_seed(seed))
    }

    fn from_key(key: &[u64]) -> Result<Self, RngError> {
        let state: [u64; WORDS] = key.try_into().map_err(|_| {
            RngError::invalid_key(
                Algorithm::Xorshift1024,
                format!("expected {} words, got {}", WORDS, key.len()),
            )
        })?;
        Self::from_state(state)
    }

    fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError> {
        let key = source.random_u64s(WORDS)?;
        tracing::debug!(algorithm = %Algorithm::Xorshift1024, "seeding from entropy");
        Self::from_key(&key)
    }
}

impl_rng_core!(Xorshift1024);
