//! MRG32k3a combined multiple recursive generator (L'Ecuyer, 1999).
//!
//! Two order-3 recurrences modulo m1 = 2^32 - 209 and m2 = 2^32 - 22853;
//! period about 2^191. Native outputs lie in [1, m1], so `next_uint32`
//! never covers the full 32-bit range and `next_double` scales a single
//! output by 1/(m1 + 1), giving values in (0, 1) with ~32 bits of
//! precision.
//!
//! `jump` advances by 2^127 steps (one RngStreams stream) using the
//! published transition-matrix powers; [`Mrg32k3a::advance`] handles any
//! 128-bit distance by matrix exponentiation.

use crate::algorithm::Algorithm;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::snapshot::{Snapshot, StateReader, StateWriter};
use crate::traits::{impl_rng_core, BitGenerator, SeedableGenerator};
use crate::word::{compose_u64, SplitMix64};

const M1: i64 = 4_294_967_087;
const M2: i64 = 4_294_944_443;
const A12: i64 = 1_403_580;
const A13N: i64 = 810_728;
const A21: i64 = 527_612;
const A23N: i64 = 1_370_589;

const NORM: f64 = 1.0 / (M1 as f64 + 1.0);

/// L'Ecuyer's default seed component.
const DEFAULT_SEED: u32 = 12_345;

type Matrix = [[u64; 3]; 3];

/// One-step transition matrix of the first component.
const A1: Matrix = [[0, 1, 0], [0, 0, 1], [(M1 - A13N) as u64, A12 as u64, 0]];

/// One-step transition matrix of the second component.
const A2: Matrix = [[0, 1, 0], [0, 0, 1], [(M2 - A23N) as u64, 0, A21 as u64]];

/// A1^(2^127) mod m1.
const A1_P127: Matrix = [
    [2_427_906_178, 3_580_155_704, 949_770_784],
    [226_153_695, 1_230_515_664, 3_580_155_704],
    [1_988_835_001, 986_791_581, 1_230_515_664],
];

/// A2^(2^127) mod m2.
const A2_P127: Matrix = [
    [1_464_411_153, 277_697_599, 1_610_723_613],
    [32_183_930, 1_464_411_153, 1_022_607_788],
    [2_824_425_944, 32_183_930, 2_093_834_863],
];

fn mat_mul(a: &Matrix, b: &Matrix, m: u64) -> Matrix {
    let mut out = [[0u64; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            let sum: u128 = (0..3).map(|k| a[i][k] as u128 * b[k][j] as u128).sum();
            out[i][j] = (sum % m as u128) as u64;
        }
    }
    out
}

fn mat_vec(a: &Matrix, v: &[u32; 3], m: u64) -> [u32; 3] {
    let mut out = [0u32; 3];
    for (i, row) in a.iter().enumerate() {
        let sum: u128 = row
            .iter()
            .zip(v.iter())
            .map(|(&x, &y)| x as u128 * y as u128)
            .sum();
        out[i] = (sum % m as u128) as u32;
    }
    out
}

fn mat_pow(base: &Matrix, mut exp: u128, m: u64) -> Matrix {
    let mut result: Matrix = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];
    let mut square = *base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mat_mul(&result, &square, m);
        }
        square = mat_mul(&square, &square, m);
        exp >>= 1;
    }
    result
}

/// MRG32k3a generator state.
///
/// # Examples
///
/// ```
/// use randomstate_core::{BitGenerator, Mrg32k3a};
///
/// let mut rng = Mrg32k3a::default_seed();
/// let x = rng.next_double();
/// assert!(x > 0.0 && x < 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mrg32k3a {
    s1: [u32; 3],
    s2: [u32; 3],
}

impl Mrg32k3a {
    /// All six components set to 12345, the reference default.
    pub fn default_seed() -> Self {
        Self {
            s1: [DEFAULT_SEED; 3],
            s2: [DEFAULT_SEED; 3],
        }
    }

    /// Uses explicit components.
    ///
    /// # Errors
    ///
    /// [`RngError::InvalidKey`] if a component is out of range or either
    /// triple is all zero.
    pub fn from_state(s1: [u32; 3], s2: [u32; 3]) -> Result<Self, RngError> {
        Self::validate(&s1, &s2).map_err(|reason| RngError::invalid_key(Algorithm::Mrg32k3a, reason))?;
        Ok(Self { s1, s2 })
    }

    fn validate(s1: &[u32; 3], s2: &[u32; 3]) -> Result<(), String> {
        if s1.iter().any(|&x| x as i64 >= M1) {
            return Err(format!("first-component seeds must be below {}", M1));
        }
        if s2.iter().any(|&x| x as i64 >= M2) {
            return Err(format!("second-component seeds must be below {}", M2));
        }
        if s1.iter().all(|&x| x == 0) || s2.iter().all(|&x| x == 0) {
            return Err("neither component may be all zero".to_string());
        }
        Ok(())
    }

    /// Expands a 64-bit seed with SplitMix64, reducing each word modulo
    /// its component's modulus. A triple that reduces to all zero falls
    /// back to the default seed.
    pub fn from_seed(seed: u64) -> Self {
        let mut sm = SplitMix64::new(seed);
        let mut s1 = [0u32; 3];
        let mut s2 = [0u32; 3];
        for x in s1.iter_mut() {
            *x = (sm.next_u64() % M1 as u64) as u32;
        }
        for x in s2.iter_mut() {
            *x = (sm.next_u64() % M2 as u64) as u32;
        }
        if s1.iter().all(|&x| x == 0) {
            s1 = [DEFAULT_SEED; 3];
        }
        if s2.iter().all(|&x| x == 0) {
            s2 = [DEFAULT_SEED; 3];
        }
        Self { s1, s2 }
    }

    /// Advances the state as if `delta` outputs had been drawn.
    pub fn advance(&mut self, delta: u128) {
        let a1 = mat_pow(&A1, delta, M1 as u64);
        let a2 = mat_pow(&A2, delta, M2 as u64);
        self.apply(&a1, &a2);
    }

    fn apply(&mut self, a1: &Matrix, a2: &Matrix) {
        self.s1 = mat_vec(a1, &self.s1, M1 as u64);
        self.s2 = mat_vec(a2, &self.s2, M2 as u64);
    }

    /// Raw `(s1, s2)` component triples, oldest value first.
    pub fn state(&self) -> ([u32; 3], [u32; 3]) {
        (self.s1, self.s2)
    }
}

impl BitGenerator for Mrg32k3a {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Mrg32k3a
    }

    #[inline]
    fn next_uint32(&mut self) -> u32 {
        let [s10, s11, s12] = self.s1.map(i64::from);
        let mut p1 = (A12 * s11 - A13N * s10) % M1;
        if p1 < 0 {
            p1 += M1;
        }
        self.s1 = [s11 as u32, s12 as u32, p1 as u32];

        let [s20, s21, s22] = self.s2.map(i64::from);
        let mut p2 = (A21 * s22 - A23N * s20) % M2;
        if p2 < 0 {
            p2 += M2;
        }
        self.s2 = [s21 as u32, s22 as u32, p2 as u32];

        if p1 > p2 {
            (p1 - p2) as u32
        } else {
            (p1 - p2 + M1) as u32
        }
    }

    #[inline]
    fn next_uint64(&mut self) -> u64 {
        let hi = self.next_uint32();
        let lo = self.next_uint32();
        compose_u64(hi, lo)
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        self.next_uint32() as f64 * NORM
    }

    fn jump(&mut self) -> Result<(), RngError> {
        self.apply(&A1_P127, &A2_P127);
        tracing::debug!(algorithm = %Algorithm::Mrg32k3a, "jumped 2^127 steps");
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        StateWriter::with_capacity(24)
            .u32s(&self.s1)
            .u32s(&self.s2)
            .finish(Algorithm::Mrg32k3a)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        let mut reader = StateReader::open(snapshot, Algorithm::Mrg32k3a)?;
        let mut s1 = [0u32; 3];
        let mut s2 = [0u32; 3];
        reader.u32s(&mut s1)?;
        reader.u32s(&mut s2)?;
        reader.finish()?;
        Self::validate(&s1, &s2).map_err(RngError::CorruptSnapshot)?;
        self.s1 = s1;
        self.s2 = s2;
        Ok(())
    }
}

impl SeedableGenerator for Mrg32k3a {
    const ALGORITHM: Algorithm = Algorithm::Mrg32k3a;
    type KeyWord = u32;

    fn seed_from_u64(seed: u64) -> Result<Self, RngError> {
        Ok(Self::from_seed(seed))
    }

    /// Key layout: `[s10, s11, s12, s20, s21, s22]`.
    fn from_key(key: &[u32]) -> Result<Self, RngError> {
        match key {
            [a, b, c, d, e, f] => Self::from_state([*a, *b, *c], [*d, *e, *f]),
            _ => Err(RngError::invalid_key(
                Algorithm::Mrg32k3a,
                format!("expected 6 words, got {}", key.len()),
            )),
        }
    }

    fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError> {
        let words = source.random_u32s(6)?;
        let mut key = [0u32; 6];
        for (i, (slot, &w)) in key.iter_mut().zip(words.iter()).enumerate() {
            let m = if i < 3 { M1 } else { M2 };
            *slot = (w as i64 % m) as u32;
        }
        tracing::debug!(algorithm = %Algorithm::Mrg32k3a, "seeding from entropy");
        Self::from_key(&key)
    }
}

impl_rng_core!(Mrg32k3a);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_first_output() {
        // RngStreams with the default seed: first U01 is 0.127011...
        let mut rng = Mrg32k3a::default_seed();
        let u = rng.next_double();
        assert!((u - 0.127_011_122_046_577_14).abs() < 1e-12, "u = {}", u);
    }

    #[test]
    fn test_jump_matrices_match_repeated_squaring() {
        let mut a1 = A1;
        let mut a2 = A2;
        for _ in 0..127 {
            a1 = mat_mul(&a1, &a1, M1 as u64);
            a2 = mat_mul(&a2, &a2, M2 as u64);
        }
        assert_eq!(a1, A1_P127);
        assert_eq!(a2, A2_P127);
    }

    #[test]
    fn test_advance_matches_stepping() {
        for delta in [0u128, 1, 2, 3, 4, 250, 1031] {
            let mut stepped = Mrg32k3a::from_seed(99);
            let mut advanced = stepped.clone();
            for _ in 0..delta {
                stepped.next_uint32();
            }
            advanced.advance(delta);
            assert_eq!(stepped, advanced, "delta = {}", delta);
        }
    }

    #[test]
    fn test_jump_equals_advance_two_pow_127() {
        let mut jumped = Mrg32k3a::from_seed(5);
        let mut advanced = jumped.clone();
        jumped.jump().unwrap();
        advanced.advance(1u128 << 127);
        assert_eq!(jumped, advanced);
    }

    #[test]
    fn test_output_range() {
        let mut rng = Mrg32k3a::from_seed(1);
        for _ in 0..10_000 {
            let x = rng.next_uint32();
            assert!(x >= 1 && x as i64 <= M1);
        }
    }

    #[test]
    fn test_key_validation() {
        assert!(Mrg32k3a::from_key(&[1, 2, 3, 4, 5, 6]).is_ok());
        assert!(matches!(
            Mrg32k3a::from_key(&[1, 2, 3, 4, 5]),
            Err(RngError::InvalidKey { .. })
        ));
        assert!(matches!(
            Mrg32k3a::from_key(&[0, 0, 0, 4, 5, 6]),
            Err(RngError::InvalidKey { .. })
        ));
        assert!(matches!(
            Mrg32k3a::from_key(&[u32::MAX, 2, 3, 4, 5, 6]),
            Err(RngError::InvalidKey { .. })
        ));
    }
}
