//! Static dispatch over every bit generator core.
//!
//! [`Generator`] lets callers choose an algorithm at run time (from a
//! name, a config file or a snapshot) without boxing. Every operation is
//! a `match` over the concrete cores.
//!
//! ## Example
//!
//! ```
//! use randomstate_core::{Algorithm, BitGenerator, Generator};
//!
//! let mut rng = Generator::new(Algorithm::Pcg64, 42).unwrap();
//! assert_eq!(rng.algorithm(), Algorithm::Pcg64);
//!
//! let snap = rng.snapshot();
//! let first = rng.next_uint64();
//! let mut restored = Generator::from_snapshot(&snap).unwrap();
//! assert_eq!(restored.next_uint64(), first);
//! ```

use crate::algorithm::Algorithm;
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::RngError;
use crate::generators::{
    Dsfmt, Mlfg1279861, Mrg32k3a, Mt19937, Pcg32, Pcg64, Xoroshiro128Plus, Xorshift1024,
    Xorshift128,
};
use crate::snapshot::Snapshot;
use crate::traits::{impl_rng_core, BitGenerator, SeedableGenerator};
use tracing::debug;

/// Any bit generator core, selected at run time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generator {
    /// dSFMT-19937
    Dsfmt(Dsfmt),
    /// PCG32 (XSH-RR)
    Pcg32(Pcg32),
    /// PCG64 (XSL-RR)
    Pcg64(Pcg64),
    /// Mersenne Twister
    Mt19937(Mt19937),
    /// xorshift128+
    Xorshift128(Xorshift128),
    /// xorshift1024*
    Xorshift1024(Xorshift1024),
    /// xoroshiro128+
    Xoroshiro128Plus(Xoroshiro128Plus),
    /// MRG32k3a
    Mrg32k3a(Mrg32k3a),
    /// MLFG(1279, 861)
    Mlfg1279861(Mlfg1279861),
}

macro_rules! dispatch {
    ($self:expr, $g:ident => $body:expr) => {
        match $self {
            Generator::Dsfmt($g) => $body,
            Generator::Pcg32($g) => $body,
            Generator::Pcg64($g) => $body,
            Generator::Mt19937($g) => $body,
            Generator::Xorshift128($g) => $body,
            Generator::Xorshift1024($g) => $body,
            Generator::Xoroshiro128Plus($g) => $body,
            Generator::Mrg32k3a($g) => $body,
            Generator::Mlfg1279861($g) => $body,
        }
    };
}

macro_rules! construct {
    ($algorithm:expr, $ctor:ident ( $($arg:expr),* )) => {
        match $algorithm {
            Algorithm::Dsfmt => Dsfmt::$ctor($($arg),*).map(Generator::Dsfmt),
            Algorithm::Pcg32 => Pcg32::$ctor($($arg),*).map(Generator::Pcg32),
            Algorithm::Pcg64 => Pcg64::$ctor($($arg),*).map(Generator::Pcg64),
            Algorithm::Mt19937 => Mt19937::$ctor($($arg),*).map(Generator::Mt19937),
            Algorithm::Xorshift128 => Xorshift128::$ctor($($arg),*).map(Generator::Xorshift128),
            Algorithm::Xorshift1024 => Xorshift1024::$ctor($($arg),*).map(Generator::Xorshift1024),
            Algorithm::Xoroshiro128Plus => {
                Xoroshiro128Plus::$ctor($($arg),*).map(Generator::Xoroshiro128Plus)
            }
            Algorithm::Mrg32k3a => Mrg32k3a::$ctor($($arg),*).map(Generator::Mrg32k3a),
            Algorithm::Mlfg1279861 => Mlfg1279861::$ctor($($arg),*).map(Generator::Mlfg1279861),
        }
    };
}

impl Generator {
    /// Deterministic construction from a 64-bit seed.
    ///
    /// # Errors
    ///
    /// Only [`RngError::OutOfMemory`] for cores with heap state.
    pub fn new(algorithm: Algorithm, seed: u64) -> Result<Self, RngError> {
        construct!(algorithm, seed_from_u64(seed))
    }

    /// Construction from operating system entropy.
    ///
    /// # Errors
    ///
    /// [`RngError::EntropyUnavailable`] if the OS source fails.
    pub fn from_entropy(algorithm: Algorithm) -> Result<Self, RngError> {
        Self::from_entropy_source(algorithm, &mut OsEntropy)
    }

    /// Construction from an arbitrary entropy source.
    pub fn from_entropy_source<E: EntropySource + ?Sized>(
        algorithm: Algorithm,
        source: &mut E,
    ) -> Result<Self, RngError> {
        construct!(algorithm, from_entropy_source(source))
    }

    /// Re-seeds in place, keeping the algorithm.
    pub fn reseed(&mut self, seed: u64) -> Result<(), RngError> {
        *self = Self::new(self.algorithm(), seed)?;
        debug!(algorithm = %self.algorithm(), "generator reseeded");
        Ok(())
    }

    /// Re-seeds in place from operating system entropy, keeping the
    /// algorithm. On failure the current state is left untouched.
    pub fn reseed_from_entropy(&mut self) -> Result<(), RngError> {
        *self = Self::from_entropy(self.algorithm())?;
        debug!(algorithm = %self.algorithm(), "generator reseeded from entropy");
        Ok(())
    }

    /// Rebuilds whichever core the snapshot was taken from.
    ///
    /// # Errors
    ///
    /// [`RngError::CorruptSnapshot`] if the payload is not a valid state.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, RngError> {
        construct!(snapshot.algorithm(), from_snapshot(snapshot))
    }
}

impl BitGenerator for Generator {
    fn algorithm(&self) -> Algorithm {
        dispatch!(self, g => g.algorithm())
    }

    #[inline]
    fn next_uint32(&mut self) -> u32 {
        dispatch!(self, g => g.next_uint32())
    }

    #[inline]
    fn next_uint64(&mut self) -> u64 {
        dispatch!(self, g => g.next_uint64())
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        dispatch!(self, g => g.next_double())
    }

    fn jump(&mut self) -> Result<(), RngError> {
        dispatch!(self, g => g.jump())
    }

    fn snapshot(&self) -> Snapshot {
        dispatch!(self, g => g.snapshot())
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        dispatch!(self, g => g.restore(snapshot))
    }

    fn fill_uint64(&mut self, out: &mut [u64]) {
        dispatch!(self, g => g.fill_uint64(out))
    }

    fn fill_double(&mut self, out: &mut [f64]) {
        dispatch!(self, g => g.fill_double(out))
    }
}

macro_rules! impl_from_core {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Generator {
                fn from(core: $variant) -> Self {
                    Generator::$variant(core)
                }
            }
        )*
    };
}

impl_from_core!(
    Dsfmt,
    Pcg32,
    Pcg64,
    Mt19937,
    Xorshift128,
    Xorshift1024,
    Xoroshiro128Plus,
    Mrg32k3a,
    Mlfg1279861
);

impl_rng_core!(Generator);
