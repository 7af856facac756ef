//! The shared bit generator contract.
//!
//! Every algorithm implements [`BitGenerator`] independently; there is no
//! shared base state, only this interface. The distribution layer is
//! written against the trait alone, so any generator can feed any sampler.

use crate::algorithm::Algorithm;
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::RngError;
use crate::snapshot::Snapshot;

/// Raw word source with optional jump-ahead and exact state capture.
///
/// All `next_*` methods are total and advance the state deterministically.
/// A handle is a single mutable resource: share it across threads only
/// behind external synchronisation, or give each thread its own stream
/// (see [`crate::streams::spawn_streams`]).
pub trait BitGenerator {
    /// Algorithm tag of this generator.
    fn algorithm(&self) -> Algorithm;

    /// Next 32-bit output.
    fn next_uint32(&mut self) -> u32;

    /// Next 64-bit output.
    fn next_uint64(&mut self) -> u64;

    /// Next double in [0, 1) following the algorithm's fixed recipe.
    fn next_double(&mut self) -> f64;

    /// Advances the state by the algorithm's fixed jump distance.
    ///
    /// # Errors
    ///
    /// [`RngError::UnsupportedOperation`] for algorithms without a jump.
    fn jump(&mut self) -> Result<(), RngError> {
        Err(RngError::no_jump(self.algorithm()))
    }

    /// Captures the full state, including buffered output.
    fn snapshot(&self) -> Snapshot;

    /// Replaces the state with a previously captured one.
    ///
    /// # Errors
    ///
    /// - [`RngError::TypeMismatch`] if the snapshot is from another algorithm
    /// - [`RngError::CorruptSnapshot`] if the payload does not decode to a valid state
    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError>;

    /// Whether [`BitGenerator::jump`] is supported.
    fn is_jumpable(&self) -> bool {
        self.algorithm().is_jumpable()
    }

    /// Whether [`BitGenerator::next_double`] carries 53 bits of precision.
    fn is_precise(&self) -> bool {
        self.algorithm().is_precise()
    }

    /// Fills `out` with consecutive 64-bit outputs.
    fn fill_uint64(&mut self, out: &mut [u64]) {
        for slot in out.iter_mut() {
            *slot = self.next_uint64();
        }
    }

    /// Fills `out` with consecutive doubles in [0, 1).
    fn fill_double(&mut self, out: &mut [f64]) {
        for slot in out.iter_mut() {
            *slot = self.next_double();
        }
    }
}

impl<G: BitGenerator + ?Sized> BitGenerator for &mut G {
    #[inline]
    fn algorithm(&self) -> Algorithm {
        (**self).algorithm()
    }

    #[inline]
    fn next_uint32(&mut self) -> u32 {
        (**self).next_uint32()
    }

    #[inline]
    fn next_uint64(&mut self) -> u64 {
        (**self).next_uint64()
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        (**self).next_double()
    }

    fn jump(&mut self) -> Result<(), RngError> {
        (**self).jump()
    }

    fn snapshot(&self) -> Snapshot {
        (**self).snapshot()
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        (**self).restore(snapshot)
    }
}

/// Construction of a concrete generator from seeds, keys or entropy.
pub trait SeedableGenerator: BitGenerator + Sized {
    /// Algorithm implemented by the type.
    const ALGORITHM: Algorithm;

    /// Element type of an explicit key array.
    type KeyWord: Copy;

    /// Deterministic construction from a single 64-bit seed.
    fn seed_from_u64(seed: u64) -> Result<Self, RngError>;

    /// Construction from an explicit key array.
    ///
    /// # Errors
    ///
    /// [`RngError::InvalidKey`] if the key has the wrong length or
    /// describes a forbidden state.
    fn from_key(key: &[Self::KeyWord]) -> Result<Self, RngError>;

    /// Construction from an arbitrary entropy source.
    fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError>;

    /// Construction from operating system entropy.
    fn from_entropy() -> Result<Self, RngError> {
        Self::from_entropy_source(&mut OsEntropy)
    }

    /// Re-seeds in place from a 64-bit seed, discarding buffered output.
    fn reseed(&mut self, seed: u64) -> Result<(), RngError> {
        *self = Self::seed_from_u64(seed)?;
        Ok(())
    }

    /// Re-seeds in place from operating system entropy.
    ///
    /// On failure the current state is left untouched.
    fn reseed_from_entropy(&mut self) -> Result<(), RngError> {
        *self = Self::from_entropy()?;
        Ok(())
    }

    /// Construction from a snapshot of the same algorithm.
    fn from_snapshot(snapshot: &Snapshot) -> Result<Self, RngError> {
        snapshot.expect_algorithm(Self::ALGORITHM)?;
        let mut generator = Self::seed_from_u64(0)?;
        generator.restore(snapshot)?;
        Ok(generator)
    }
}

/// Implements `rand::RngCore` on top of [`BitGenerator`].
macro_rules! impl_rng_core {
    ($ty:ty) => {
        impl rand::RngCore for $ty {
            #[inline]
            fn next_u32(&mut self) -> u32 {
                $crate::traits::BitGenerator::next_uint32(self)
            }

            #[inline]
            fn next_u64(&mut self) -> u64 {
                $crate::traits::BitGenerator::next_uint64(self)
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                let mut chunks = dest.chunks_exact_mut(8);
                for chunk in &mut chunks {
                    let word = $crate::traits::BitGenerator::next_uint64(self);
                    chunk.copy_from_slice(&word.to_le_bytes());
                }
                let rest = chunks.into_remainder();
                if !rest.is_empty() {
                    let word = $crate::traits::BitGenerator::next_uint64(self).to_le_bytes();
                    rest.copy_from_slice(&word[..rest.len()]);
                }
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }
    };
}

pub(crate) use impl_rng_core;
