//! Error types for bit generator construction, jumping and state restore.
//!
//! Every failure in this crate is reported synchronously as an [`RngError`].
//! Nothing is retried internally: reseeding with different input or pulling
//! entropy again is a caller decision.

use crate::algorithm::Algorithm;
use thiserror::Error;

/// Errors raised by bit generators and their supporting utilities.
///
/// # Variants
///
/// - `InvalidKey`: A caller-supplied seed key is malformed for the algorithm
/// - `UnsupportedOperation`: The algorithm lacks the requested capability (e.g. `jump`)
/// - `TypeMismatch`: A snapshot was taken from a different algorithm
/// - `EntropyUnavailable`: The operating system could not supply random bytes
/// - `OutOfMemory`: An aligned allocation failed
/// - `InvalidAlignment`: An alignment that is not a power of two was requested
/// - `CorruptSnapshot`: Snapshot bytes are truncated or describe an invalid state
/// - `UnknownAlgorithm`: A registry lookup by name failed
///
/// # Examples
///
/// ```
/// use randomstate_core::{Algorithm, RngError};
///
/// let err = RngError::UnsupportedOperation {
///     algorithm: Algorithm::Mt19937,
///     operation: "jump",
/// };
/// assert_eq!(err.to_string(), "Unsupported operation: jump is not available for mt19937");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RngError {
    /// Seed key has the wrong length or describes a forbidden state.
    #[error("Invalid key for {algorithm}: {reason}")]
    InvalidKey {
        /// Algorithm the key was intended for
        algorithm: Algorithm,
        /// Description of the problem
        reason: String,
    },

    /// Operation not supported by this algorithm.
    #[error("Unsupported operation: {operation} is not available for {algorithm}")]
    UnsupportedOperation {
        /// Algorithm that rejected the operation
        algorithm: Algorithm,
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// Snapshot algorithm tag does not match the target generator.
    #[error("Type mismatch: expected {expected} snapshot, found {found}")]
    TypeMismatch {
        /// Algorithm of the generator being restored
        expected: Algorithm,
        /// Algorithm recorded in the snapshot
        found: Algorithm,
    },

    /// Operating system entropy source failed.
    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// Aligned allocation failed.
    #[error("Out of memory: failed to allocate {size} bytes aligned to {alignment}")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
        /// Requested alignment in bytes
        alignment: usize,
    },

    /// Alignment is zero or not a power of two.
    #[error("Invalid alignment: {0} is not a power of two")]
    InvalidAlignment(usize),

    /// Snapshot bytes cannot be decoded into a valid state.
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// No registered algorithm has the given name.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

impl RngError {
    /// Convenience constructor for [`RngError::InvalidKey`].
    pub(crate) fn invalid_key(algorithm: Algorithm, reason: impl Into<String>) -> Self {
        RngError::InvalidKey {
            algorithm,
            reason: reason.into(),
        }
    }

    /// Convenience constructor for a missing `jump` capability.
    pub(crate) fn no_jump(algorithm: Algorithm) -> Self {
        RngError::UnsupportedOperation {
            algorithm,
            operation: "jump",
        }
    }
}
