//! Operating system entropy for seeding.
//!
//! The [`EntropySource`] trait is the seam between the bit generators and
//! wherever seed material comes from. [`OsEntropy`] reads from the
//! operating system through `rand::rngs::OsRng`; tests and reproducible
//! pipelines can substitute any other implementation.
//!
//! A request either succeeds in full or fails with
//! [`RngError::EntropyUnavailable`]; partial buffers are never returned.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::warn;

use crate::error::RngError;

/// Supplier of seed bytes.
pub trait EntropySource {
    /// Fills `dest` completely or fails without a partial result.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError>;

    /// Returns `n` fresh bytes.
    fn random_bytes(&mut self, n: usize) -> Result<Vec<u8>, RngError> {
        let mut buffer = vec![0u8; n];
        self.fill_bytes(&mut buffer)?;
        Ok(buffer)
    }

    /// Returns `n` words assembled from little-endian bytes.
    fn random_u32s(&mut self, n: usize) -> Result<Vec<u32>, RngError> {
        let bytes = self.random_bytes(n * 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Returns `n` 64-bit words assembled from little-endian bytes.
    fn random_u64s(&mut self, n: usize) -> Result<Vec<u64>, RngError> {
        let bytes = self.random_bytes(n * 8)?;
        Ok(bytes
            .chunks_exact(8)
            .map(|c| {
                let mut word = [0u8; 8];
                word.copy_from_slice(c);
                u64::from_le_bytes(word)
            })
            .collect())
    }
}

/// Entropy read from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError> {
        OsRng.try_fill_bytes(dest).map_err(|e| {
            warn!(bytes = dest.len(), error = %e, "OS entropy source failed");
            RngError::EntropyUnavailable(e.to_string())
        })
    }
}

/// Returns `n` bytes of operating system entropy.
///
/// # Examples
///
/// ```
/// use randomstate_core::entropy::get_random_bytes;
///
/// let bytes = get_random_bytes(32).unwrap();
/// assert_eq!(bytes.len(), 32);
/// ```
pub fn get_random_bytes(n: usize) -> Result<Vec<u8>, RngError> {
    OsEntropy.random_bytes(n)
}
