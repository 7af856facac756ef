//! Word-size conversion contracts shared by every generator.
//!
//! These functions fix how native outputs are widened, split and turned
//! into doubles. They are part of each generator's reproducibility
//! contract, so they live in one place and are tested on their own.
//!
//! - 32-bit-native generators build a `u64` as `compose_u64(hi, lo)` from
//!   two consecutive draws, high word first.
//! - 64-bit-native generators serve `u32` requests through a
//!   [`HalfWordBuffer`]: low half first, then the buffered high half.

use serde::{Deserialize, Serialize};

/// 2^-53
const TWO_POW_M53: f64 = 1.0 / 9_007_199_254_740_992.0;

/// Joins two 32-bit draws into one 64-bit word, `hi` in the upper half.
#[inline]
pub fn compose_u64(hi: u32, lo: u32) -> u64 {
    ((hi as u64) << 32) | lo as u64
}

/// 53-bit double in [0, 1) from two 32-bit draws (`a` drawn first).
///
/// Takes the top 27 bits of `a` and the top 26 bits of `b`.
#[inline]
pub fn u32_pair_to_double(a: u32, b: u32) -> f64 {
    let a = (a >> 5) as f64;
    let b = (b >> 6) as f64;
    (a * 67_108_864.0 + b) * TWO_POW_M53
}

/// 53-bit double in [0, 1) from the top 53 bits of a 64-bit word.
#[inline]
pub fn u64_to_double(word: u64) -> f64 {
    (word >> 11) as f64 * TWO_POW_M53
}

/// Holds the unused upper half of a 64-bit draw.
///
/// `next_uint32` on a 64-bit generator draws one word, returns its low
/// half and keeps the high half for the following `next_uint32` call.
/// `next_uint64` bypasses the buffer entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfWordBuffer {
    pending: Option<u32>,
}

impl HalfWordBuffer {
    /// Empty buffer.
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Returns the buffered half if present, otherwise calls `draw`.
    #[inline]
    pub fn next_u32(&mut self, draw: impl FnOnce() -> u64) -> u32 {
        match self.pending.take() {
            Some(high) => high,
            None => {
                let word = draw();
                self.pending = Some((word >> 32) as u32);
                word as u32
            }
        }
    }

    /// The buffered half, if any.
    #[inline]
    pub fn pending(&self) -> Option<u32> {
        self.pending
    }

    /// Drops any buffered half (used after reseeding or jumping).
    #[inline]
    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub(crate) fn from_parts(has: bool, value: u32) -> Self {
        Self {
            pending: has.then_some(value),
        }
    }

    pub(crate) fn to_parts(self) -> (bool, u32) {
        match self.pending {
            Some(value) => (true, value),
            None => (false, 0),
        }
    }
}

/// SplitMix64 sequence, used to expand a single 64-bit seed into the
/// multi-word states of the xorshift family, MRG32k3a and MLFG.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Starts the sequence at `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next 64-bit output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}
