//! Mersenne Twister MT19937 (Matsumoto & Nishimura, 1998).
//!
//! 32-bit native output with period 2^19937 - 1. No efficient jump is
//! provided, so [`BitGenerator::jump`] reports `UnsupportedOperation`.
//!
//! Output recipes: `next_uint64` composes two draws high word first and
//! `next_double` uses the 53-bit two-draw recipe from [`crate::word`].

use crate::algorithm::Algorithm;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::snapshot::{Snapshot, StateReader, StateWriter};
use crate::traits::{impl_rng_core, BitGenerator, SeedableGenerator};
use crate::word::{compose_u64, u32_pair_to_double};

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Number of 32-bit entropy words used when seeding from entropy.
pub const MT19937_ENTROPY_WORDS: usize = N;

/// MT19937 generator state.
///
/// # Examples
///
/// ```
/// use randomstate_core::{BitGenerator, Mt19937};
///
/// let mut rng = Mt19937::from_seed(5489);
/// assert_eq!(rng.next_uint32(), 3_499_211_612);
/// assert!(rng.jump().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mt19937 {
    state: Box<[u32; N]>,
    pos: usize,
}

impl Mt19937 {
    /// Seeds with the reference `init_genrand` routine.
    pub fn from_seed(seed: u32) -> Self {
        let mut rng = Self {
            state: Box::new([0u32; N]),
            pos: N,
        };
        rng.init_genrand(seed);
        rng
    }

    fn init_genrand(&mut self, seed: u32) {
        let mt = &mut self.state;
        mt[0] = seed;
        for i in 1..N {
            mt[i] = 1_812_433_253u32
                .wrapping_mul(mt[i - 1] ^ (mt[i - 1] >> 30))
                .wrapping_add(i as u32);
        }
        self.pos = N;
    }

    fn init_by_array(&mut self, key: &[u32]) {
        self.init_genrand(19_650_218);
        let mt = &mut self.state;
        let mut i = 1usize;
        let mut j = 0usize;

        for _ in 0..N.max(key.len()) {
            let prev = mt[i - 1] ^ (mt[i - 1] >> 30);
            mt[i] = (mt[i] ^ prev.wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 0..N - 1 {
            let prev = mt[i - 1] ^ (mt[i - 1] >> 30);
            mt[i] = (mt[i] ^ prev.wrapping_mul(1_566_083_941)).wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
        }
        mt[0] = 0x8000_0000;
        self.pos = N;
    }

    #[inline]
    fn twist(y: u32) -> u32 {
        (y >> 1) ^ if y & 1 == 1 { MATRIX_A } else { 0 }
    }

    fn generate(&mut self) {
        let mt = &mut self.state;
        for kk in 0..N - M {
            let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
            mt[kk] = mt[kk + M] ^ Self::twist(y);
        }
        for kk in N - M..N - 1 {
            let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
            mt[kk] = mt[kk + M - N] ^ Self::twist(y);
        }
        let y = (mt[N - 1] & UPPER_MASK) | (mt[0] & LOWER_MASK);
        mt[N - 1] = mt[M - 1] ^ Self::twist(y);
        self.pos = 0;
    }

    /// Whether the 19937 significant state bits are all zero.
    fn is_degenerate(state: &[u32; N]) -> bool {
        state[0] & UPPER_MASK == 0 && state[1..].iter().all(|&w| w == 0)
    }
}

impl BitGenerator for Mt19937 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Mt19937
    }

    #[inline]
    fn next_uint32(&mut self) -> u32 {
        if self.pos >= N {
            self.generate();
        }
        let mut y = self.state[self.pos];
        self.pos += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
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
        StateWriter::with_capacity(N * 4 + 4)
            .u32s(&self.state[..])
            .index(self.pos)
            .finish(Algorithm::Mt19937)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        let mut reader = StateReader::open(snapshot, Algorithm::Mt19937)?;
        let mut state = Box::new([0u32; N]);
        reader.u32s(&mut state[..])?;
        let pos = reader.index(N)?;
        reader.finish()?;
        if Self::is_degenerate(&state) {
            return Err(RngError::CorruptSnapshot(
                "mt19937 state has no significant bits set".to_string(),
            ));
        }
        self.state = state;
        self.pos = pos;
        tracing::debug!(algorithm = %Algorithm::Mt19937, "state restored");
        Ok(())
    }
}

impl SeedableGenerator for Mt19937 {
    const ALGORITHM: Algorithm = Algorithm::Mt19937;
    type KeyWord = u32;

    fn seed_from_u64(seed: u64) -> Result<Self, RngError> {
        Ok(Self::from_seed((seed ^ (seed >> 32)) as u32))
    }

    /// Seeds with the reference `init_by_array` routine; any non-empty key is accepted.
    fn from_key(key: &[u32]) -> Result<Self, RngError> {
        if key.is_empty() {
            return Err(RngError::invalid_key(
                Algorithm::Mt19937,
                "key array must not be empty",
            ));
        }
        let mut rng = Self::from_seed(0);
        rng.init_by_array(key);
        Ok(rng)
    }

    fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError> {
        let key = source.random_u32s(MT19937_ENTROPY_WORDS)?;
        tracing::debug!(algorithm = %Algorithm::Mt19937, words = key.len(), "seeding from entropy");
        Self::from_key(&key)
    }
}

impl_rng_core!(Mt19937);
