//! # Bit Generator Cores
//!
//! One module per algorithm. Each core owns its state outright and
//! implements [`BitGenerator`](crate::BitGenerator) and
//! [`SeedableGenerator`](crate::SeedableGenerator) independently.
//!
//! | Core | Native width | Jump distance | Double precision |
//! |------|--------------|---------------|------------------|
//! | [`Dsfmt`] | 52 (double) | none | 52 bits |
//! | [`Pcg32`] | 32 | 2^32 | 53 bits |
//! | [`Pcg64`] | 64 | 2^64 | 53 bits |
//! | [`Mt19937`] | 32 | none | 53 bits |
//! | [`Xorshift128`] | 64 | 2^64 | 53 bits |
//! | [`Xorshift1024`] | 64 | 2^512 | 53 bits |
//! | [`Xoroshiro128Plus`] | 64 | 2^64 | 53 bits |
//! | [`Mrg32k3a`] | 32 | 2^127 | 32 bits |
//! | [`Mlfg1279861`] | 32 | none | 53 bits |

mod dsfmt;
#[cfg(test)]
pub(crate) mod gf2;
mod mlfg;
mod mrg32k3a;
mod mt19937;
mod pcg32;
mod pcg64;
mod xoroshiro128plus;
mod xorshift1024;
mod xorshift128;

pub use dsfmt::{Dsfmt, DSFMT_ENTROPY_WORDS};
pub use mlfg::{Mlfg1279861, MLFG_LONG_LAG, MLFG_SHORT_LAG};
pub use mrg32k3a::Mrg32k3a;
pub use mt19937::{Mt19937, MT19937_ENTROPY_WORDS};
pub use pcg32::{Pcg32, PCG32_JUMP_STEPS};
pub use pcg64::{Pcg64, PCG64_JUMP_STEPS};
pub use xoroshiro128plus::Xoroshiro128Plus;
pub use xorshift1024::Xorshift1024;
pub use xorshift128::Xorshift128;

use crate::algorithm::Algorithm;
use crate::error::RngError;

/// Applies a jump polynomial to a two-word xor-family state.
///
/// For every set bit of `jump` (low word first, low bit first) the
/// current state is folded into an accumulator before stepping; the
/// accumulator becomes the new state.
pub(crate) fn jump_two_words(s: &mut [u64; 2], jump: &[u64; 2], step: fn(&mut [u64; 2]) -> u64) {
    let mut acc = [0u64; 2];
    for &word in jump.iter() {
        for b in 0..64 {
            if word & (1u64 << b) != 0 {
                acc[0] ^= s[0];
                acc[1] ^= s[1];
            }
            step(s);
        }
    }
    *s = acc;
}

/// Rejects an all-zero xor-family state.
pub(crate) fn validate_nonzero(algorithm: Algorithm, state: &[u64]) -> Result<(), RngError> {
    if state.iter().all(|&w| w == 0) {
        return Err(RngError::invalid_key(algorithm, "state must not be all zero"));
    }
    Ok(())
}
