//! PCG64: permuted congruential generator, XSL-RR output, 128-bit state.
//!
//! Reference: O'Neill (2014), `pcg64_random_r` / `pcg64_srandom_r`
//! (`pcg_setseq_128_xsl_rr_64`). Period 2^128 per stream. `jump` advances
//! by 2^64 steps; [`Pcg64::advance`] accepts any 128-bit distance.
//!
//! 64-bit native: `next_uint32` splits a draw through a
//! [`HalfWordBuffer`] and `next_double` keeps the top 53 bits.

use crate::algorithm::Algorithm;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::snapshot::{Snapshot, StateReader, StateWriter};
use crate::traits::{impl_rng_core, BitGenerator, SeedableGenerator};
use crate::word::{u64_to_double, HalfWordBuffer};

const MULTIPLIER: u128 = (2_549_297_995_355_413_924u128 << 64) + 4_865_540_595_714_422_341;

/// Steps taken by a single [`BitGenerator::jump`].
pub const PCG64_JUMP_STEPS: u128 = 1 << 64;

fn advance_lcg_128(state: u128, mut delta: u128, mult: u128, plus: u128) -> u128 {
    let mut acc_mult = 1u128;
    let mut acc_plus = 0u128;
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

/// Steps the LCG and applies the XSL-RR output permutation to the new state.
#[inline]
fn next_xsl_rr(state: &mut u128, inc: u128) -> u64 {
    *state = state.wrapping_mul(MULTIPLIER).wrapping_add(inc);
    let value = ((*state >> 64) as u64) ^ (*state as u64);
    let rot = (*state >> 122) as u32;
    value.rotate_right(rot)
}

/// PCG64 generator state.
///
/// # Examples
///
/// ```
/// use randomstate_core::{BitGenerator, Pcg64};
///
/// let mut rng = Pcg64::from_seed(42, 54);
/// assert_eq!(rng.next_uint64(), 0x86b1_da1d_7206_2b68);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pcg64 {
    state: u128,
    inc: u128,
    half: HalfWordBuffer,
}

impl Pcg64 {
    /// Seeds with an initial state and a stream selector.
    pub fn from_seed(initstate: u128, initseq: u128) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (initseq << 1) | 1,
            half: HalfWordBuffer::new(),
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

    #[inline]
    fn next_raw(&mut self) -> u64 {
        next_xsl_rr(&mut self.state, self.inc)
    }

    /// Advances the state as if `delta` 64-bit outputs had been drawn.
    ///
    /// Any buffered half word is discarded.
    pub fn advance(&mut self, delta: u128) {
        self.state = advance_lcg_128(self.state, delta, MULTIPLIER, self.inc);
        self.half.clear();
    }

    /// Raw `(state, increment)` pair.
    pub fn state(&self) -> (u128, u128) {
        (self.state, self.inc)
    }
}

impl BitGenerator for Pcg64 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Pcg64
    }

    #[inline]
    fn next_uint32(&mut self) -> u32 {
        let inc = self.inc;
        self.half.next_u32(|| next_xsl_rr(&mut self.state, inc))
    }

    #[inline]
    fn next_uint64(&mut self) -> u64 {
        self.next_raw()
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        u64_to_double(self.next_raw())
    }

    fn jump(&mut self) -> Result<(), RngError> {
        self.advance(PCG64_JUMP_STEPS);
        tracing::debug!(algorithm = %Algorithm::Pcg64, "jumped 2^64 steps");
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        let (has, value) = self.half.to_parts();
        StateWriter::with_capacity(37)
            .u128(self.state)
            .u128(self.inc)
            .bool(has)
            .u32(value)
            .finish(Algorithm::Pcg64)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        let mut reader = StateReader::open(snapshot, Algorithm::Pcg64)?;
        let state = reader.u128()?;
        let inc = reader.u128()?;
        let has = reader.bool()?;
        let value = reader.u32()?;
        reader.finish()?;
        if inc & 1 == 0 {
            return Err(RngError::CorruptSnapshot(
                "pcg64 increment must be odd".to_string(),
            ));
        }
        self.state = state;
        self.inc = inc;
        self.half = HalfWordBuffer::from_parts(has, value);
        Ok(())
    }
}

impl SeedableGenerator for Pcg64 {
    const ALGORITHM: Algorithm = Algorithm::Pcg64;
    type KeyWord = u64;

    fn seed_from_u64(seed: u64) -> Result<Self, RngError> {
        Ok(Self::from_seed(seed as u128, 0))
    }

    /// Key layout: `[state_hi, state_lo, seq_hi, seq_lo]`.
    fn from_key(key: &[u64]) -> Result<Self, RngError> {
        match key {
            [s_hi, s_lo, q_hi, q_lo] => {
                let state = ((*s_hi as u128) << 64) | *s_lo as u128;
                let seq = ((*q_hi as u128) << 64) | *q_lo as u128;
                Ok(Self::from_seed(state, seq))
            }
            _ => Err(RngError::invalid_key(
                Algorithm::Pcg64,
                format!("expected 4 words, got {}", key.len()),
            )),
        }
    }

    fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError> {
        let key = source.random_u64s(4)?;
        tracing::debug!(algorithm = %Algorithm::Pcg64, "seeding from entropy");
        Self::from_key(&key)
    }
}

impl_rng_core!(Pcg64);
