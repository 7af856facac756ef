//! Error types for distribution construction.

use randomstate_core::RngError;
use thiserror::Error;

/// Errors raised when building a distribution or a parallel fill.
///
/// Sampling itself never fails; parameters are checked once, in each
/// distribution's `new`.
///
/// # Examples
///
/// ```
/// use randomstate_distributions::{continuous::Normal, DistributionError};
///
/// let err = Normal::new(0.0, -1.0).unwrap_err();
/// assert!(matches!(err, DistributionError::InvalidParameter { name: "scale", .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// A parameter is outside the distribution's domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Domain requirement that was violated
        reason: &'static str,
    },

    /// The underlying bit generator rejected an operation.
    #[error(transparent)]
    Rng(#[from] RngError),
}

/// Shorthand for parameter checks in constructors.
pub(crate) fn check(
    ok: bool,
    name: &'static str,
    value: f64,
    reason: &'static str,
) -> Result<(), DistributionError> {
    if ok {
        Ok(())
    } else {
        Err(DistributionError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use randomstate_core::Algorithm;

    #[test]
    fn test_display() {
        let err = DistributionError::InvalidParameter {
            name: "lam",
            value: -1.0,
            reason: "must be non-negative",
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter lam = -1: must be non-negative"
        );
    }

    #[test]
    fn test_from_rng_error() {
        let err: DistributionError = RngError::UnsupportedOperation {
            algorithm: Algorithm::Dsfmt,
            operation: "jump",
        }
        .into();
        assert!(matches!(err, DistributionError::Rng(_)));
    }

    #[test]
    fn test_check() {
        assert!(check(true, "p", 0.5, "x").is_ok());
        assert!(check(false, "p", 1.5, "x").is_err());
    }
}
