//! Double precision SIMD-oriented Fast Mersenne Twister, dSFMT-19937
//! (Saito & Matsumoto, 2008).
//!
//! The state is 191 128-bit words plus a "lung" word, held in a 16-byte
//! aligned buffer as little-endian pairs of `u64`. Every state word is an
//! IEEE double in [1, 2); outputs are consumed one 64-bit lane at a time.
//!
//! - `next_double` subtracts 1.0 from the raw lane, so only 52 bits of
//!   precision are available
//! - `next_uint32` is the low 32 bits of the raw lane
//! - `next_uint64` composes two `next_uint32` calls high word first
//!
//! No jump is provided.

use crate::aligned::AlignedBuffer;
use crate::algorithm::Algorithm;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::snapshot::{Snapshot, StateReader, StateWriter};
use crate::traits::{impl_rng_core, BitGenerator, SeedableGenerator};
use crate::word::compose_u64;

const N: usize = 191;
const N64: usize = N * 2;
const POS1: usize = 117;
const SL1: u32 = 19;
const SR: u32 = 12;
const MSK1: u64 = 0x000f_faff_ffff_fb3f;
const MSK2: u64 = 0x000f_fdff_fc90_fffd;
const FIX1: u64 = 0x9001_4964_b32f_4329;
const FIX2: u64 = 0x3b8d_12ac_548a_7c7a;
const PCV1: u64 = 0x3d84_e1ac_0dc8_2880;
const PCV2: u64 = 0x0000_0000_0000_0001;
const LOW_MASK: u64 = 0x000f_ffff_ffff_ffff;
const HIGH_CONST: u64 = 0x3ff0_0000_0000_0000;

/// Total 64-bit lanes, lung included.
const LANES: usize = (N + 1) * 2;
/// Total 32-bit words seen by the initialisation routines.
const WORDS32: usize = LANES * 2;
const ALIGNMENT: usize = 16;

/// Number of 32-bit entropy words used when seeding from entropy.
pub const DSFMT_ENTROPY_WORDS: usize = WORDS32;

/// dSFMT-19937 generator state.
///
/// # Examples
///
/// ```
/// use randomstate_core::{BitGenerator, Dsfmt};
///
/// let mut rng = Dsfmt::from_seed(0).unwrap();
/// assert_eq!(rng.next_double(), 1.030_581_026_769_374_5 - 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dsfmt {
    status: AlignedBuffer<u64>,
    idx: usize,
}

impl Dsfmt {
    /// Seeds with the reference `init_gen_rand` routine.
    ///
    /// # Errors
    ///
    /// [`RngError::OutOfMemory`] if the state buffer cannot be allocated.
    pub fn from_seed(seed: u32) -> Result<Self, RngError> {
        let mut words = [0u32; WORDS32];
        words[0] = seed;
        for i in 1..WORDS32 {
            words[i] = 1_812_433_253u32
                .wrapping_mul(words[i - 1] ^ (words[i - 1] >> 30))
                .wrapping_add(i as u32);
        }
        Self::from_words(&words)
    }

    /// Seeds with the reference `init_by_array` routine.
    ///
    /// # Errors
    ///
    /// [`RngError::OutOfMemory`] if the state buffer cannot be allocated.
    pub fn from_array(key: &[u32]) -> Result<Self, RngError> {
        let size = WORDS32;
        let lag = 11;
        let mid = (size - lag) / 2;
        let mut p = [0x8b8b_8b8bu32; WORDS32];
        let count = (key.len() + 1).max(size);

        let mut r = ini_func1(p[0] ^ p[mid % size] ^ p[(size - 1) % size]);
        p[mid % size] = p[mid % size].wrapping_add(r);
        r = r.wrapping_add(key.len() as u32);
        p[(mid + lag) % size] = p[(mid + lag) % size].wrapping_add(r);
        p[0] = r;

        let mut i = 1usize;
        for j in 0..count - 1 {
            r = ini_func1(p[i] ^ p[(i + mid) % size] ^ p[(i + size - 1) % size]);
            p[(i + mid) % size] = p[(i + mid) % size].wrapping_add(r);
            let extra = key.get(j).copied().unwrap_or(0);
            r = r.wrapping_add(extra).wrapping_add(i as u32);
            p[(i + mid + lag) % size] = p[(i + mid + lag) % size].wrapping_add(r);
            p[i] = r;
            i = (i + 1) % size;
        }
        for _ in 0..size {
            r = ini_func2(
                p[i]
                    .wrapping_add(p[(i + mid) % size])
                    .wrapping_add(p[(i + size - 1) % size]),
            );
            p[(i + mid) % size] ^= r;
            r = r.wrapping_sub(i as u32);
            p[(i + mid + lag) % size] ^= r;
            p[i] = r;
            i = (i + 1) % size;
        }
        Self::from_words(&p)
    }

    /// Packs the 32-bit initialisation view into lanes, then masks and
    /// certifies the period.
    fn from_words(words: &[u32; WORDS32]) -> Result<Self, RngError> {
        let mut status = AlignedBuffer::<u64>::new(LANES, ALIGNMENT)?;
        for (lane, pair) in status.iter_mut().zip(words.chunks_exact(2)) {
            *lane = pair[0] as u64 | (pair[1] as u64) << 32;
        }
        for lane in status[..N64].iter_mut() {
            *lane = (*lane & LOW_MASK) | HIGH_CONST;
        }
        period_certification(&mut status);
        Ok(Self { status, idx: N64 })
    }

    fn gen_rand_all(&mut self) {
        let s = &mut self.status[..];
        let mut lung = [s[N64], s[N64 + 1]];
        for i in 0..N - POS1 {
            do_recursion(s, i, i + POS1, &mut lung);
        }
        for i in N - POS1..N {
            do_recursion(s, i, i + POS1 - N, &mut lung);
        }
        s[N64] = lung[0];
        s[N64 + 1] = lung[1];
        self.idx = 0;
    }

    #[inline]
    fn next_raw(&mut self) -> u64 {
        if self.idx >= N64 {
            self.gen_rand_all();
        }
        let raw = self.status[self.idx];
        self.idx += 1;
        raw
    }

    /// Next double in [1, 2), the generator's native output.
    #[inline]
    pub fn next_close1_open2(&mut self) -> f64 {
        f64::from_bits(self.next_raw())
    }
}

#[inline]
fn ini_func1(x: u32) -> u32 {
    (x ^ (x >> 27)).wrapping_mul(1_664_525)
}

#[inline]
fn ini_func2(x: u32) -> u32 {
    (x ^ (x >> 27)).wrapping_mul(1_566_083_941)
}

/// One step of the recursion on 128-bit word `r`, reading word `b`.
#[inline]
fn do_recursion(s: &mut [u64], r: usize, b: usize, lung: &mut [u64; 2]) {
    let t0 = s[2 * r];
    let t1 = s[2 * r + 1];
    let [l0, l1] = *lung;
    lung[0] = (t0 << SL1) ^ (l1 >> 32) ^ (l1 << 32) ^ s[2 * b];
    lung[1] = (t1 << SL1) ^ (l0 >> 32) ^ (l0 << 32) ^ s[2 * b + 1];
    s[2 * r] = (lung[0] >> SR) ^ (lung[0] & MSK1) ^ t0;
    s[2 * r + 1] = (lung[1] >> SR) ^ (lung[1] & MSK2) ^ t1;
}

fn period_certification(status: &mut [u64]) {
    let tmp0 = status[N64] ^ FIX1;
    let tmp1 = status[N64 + 1] ^ FIX2;
    let inner = (tmp0 & PCV1) ^ (tmp1 & PCV2);
    if inner.count_ones() % 2 == 0 {
        status[N64 + 1] ^= 1;
    }
}

impl BitGenerator for Dsfmt {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dsfmt
    }

    #[inline]
    fn next_uint32(&mut self) -> u32 {
        self.next_raw() as u32
    }

    #[inline]
    fn next_uint64(&mut self) -> u64 {
        let hi = self.next_uint32();
        let lo = self.next_uint32();
        compose_u64(hi, lo)
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        self.next_close1_open2() - 1.0
    }

    fn snapshot(&self) -> Snapshot {
        StateWriter::with_capacity(LANES * 8 + 4)
            .u64s(&self.status)
            .index(self.idx)
            .finish(Algorithm::Dsfmt)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        let mut reader = StateReader::open(snapshot, Algorithm::Dsfmt)?;
        let mut status = AlignedBuffer::<u64>::new(LANES, ALIGNMENT)?;
        reader.u64s(&mut status)?;
        let idx = reader.index(N64)?;
        reader.finish()?;
        if status[..N64].iter().any(|&w| w & !LOW_MASK != HIGH_CONST) {
            return Err(RngError::CorruptSnapshot(
                "dsfmt state words must encode doubles in [1, 2)".to_string(),
            ));
        }
        self.status = status;
        self.idx = idx;
        tracing::debug!(algorithm = %Algorithm::Dsfmt, "state restored");
        Ok(())
    }
}

impl SeedableGenerator for Dsfmt {
    const ALGORITHM: Algorithm = Algorithm::Dsfmt;
    type KeyWord = u32;

    fn seed_from_u64(seed: u64) -> Result<Self, RngError> {
        Self::from_seed((seed ^ (seed >> 32)) as u32)
    }

    fn from_key(key: &[u32]) -> Result<Self, RngError> {
        if key.is_empty() {
            return Err(RngError::invalid_key(
                Algorithm::Dsfmt,
                "key array must not be empty",
            ));
        }
        Self::from_array(key)
    }

    fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError> {
        let key = source.random_u32s(DSFMT_ENTROPY_WORDS)?;
        tracing::debug!(algorithm = %Algorithm::Dsfmt, words = key.len(), "seeding from entropy");
        Self::from_array(&key)
    }
}

impl_rng_core!(Dsfmt);
