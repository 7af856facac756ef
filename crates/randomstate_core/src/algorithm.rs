//! Closed enumeration of the available bit generator algorithms.
//!
//! [`Algorithm`] is the tag carried by snapshots, registry entries and
//! configuration files. Names parse case-insensitively; the canonical name
//! is what [`Display`](std::fmt::Display) prints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RngError;

/// Bit generator algorithm tag.
///
/// # Examples
///
/// ```
/// use randomstate_core::Algorithm;
///
/// let alg: Algorithm = "xoroshiro128+".parse().unwrap();
/// assert_eq!(alg, Algorithm::Xoroshiro128Plus);
/// assert_eq!(alg.to_string(), "xoroshiro128plus");
/// assert!(alg.is_jumpable());
/// assert!(!Algorithm::Mt19937.is_jumpable());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    /// Double precision SIMD-oriented Fast Mersenne Twister (MEXP 19937)
    Dsfmt,
    /// PCG XSH-RR with 64-bit state and 32-bit output
    Pcg32,
    /// PCG XSL-RR with 128-bit state and 64-bit output
    Pcg64,
    /// Mersenne Twister MT19937
    Mt19937,
    /// xorshift128+
    Xorshift128,
    /// xorshift1024*
    Xorshift1024,
    /// xoroshiro128+
    Xoroshiro128Plus,
    /// L'Ecuyer's combined multiple recursive generator MRG32k3a
    Mrg32k3a,
    /// Multiplicative lagged Fibonacci generator with lags (1279, 861)
    Mlfg1279861,
}

impl Algorithm {
    /// Every algorithm, in snapshot-tag order.
    pub const ALL: [Algorithm; 9] = [
        Algorithm::Dsfmt,
        Algorithm::Pcg32,
        Algorithm::Pcg64,
        Algorithm::Mt19937,
        Algorithm::Xorshift128,
        Algorithm::Xorshift1024,
        Algorithm::Xoroshiro128Plus,
        Algorithm::Mrg32k3a,
        Algorithm::Mlfg1279861,
    ];

    /// Canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dsfmt => "dsfmt",
            Algorithm::Pcg32 => "pcg32",
            Algorithm::Pcg64 => "pcg64",
            Algorithm::Mt19937 => "mt19937",
            Algorithm::Xorshift128 => "xorshift128",
            Algorithm::Xorshift1024 => "xorshift1024",
            Algorithm::Xoroshiro128Plus => "xoroshiro128plus",
            Algorithm::Mrg32k3a => "mrg32k3a",
            Algorithm::Mlfg1279861 => "mlfg_1279_861",
        }
    }

    /// One-byte tag prefixed to every snapshot.
    pub fn tag(&self) -> u8 {
        match self {
            Algorithm::Dsfmt => 1,
            Algorithm::Pcg32 => 2,
            Algorithm::Pcg64 => 3,
            Algorithm::Mt19937 => 4,
            Algorithm::Xorshift128 => 5,
            Algorithm::Xorshift1024 => 6,
            Algorithm::Xoroshiro128Plus => 7,
            Algorithm::Mrg32k3a => 8,
            Algorithm::Mlfg1279861 => 9,
        }
    }

    /// Inverse of [`Algorithm::tag`].
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|alg| alg.tag() == tag)
    }

    /// Whether the algorithm supports an efficient `jump`.
    pub fn is_jumpable(&self) -> bool {
        matches!(
            self,
            Algorithm::Pcg32
                | Algorithm::Pcg64
                | Algorithm::Xorshift128
                | Algorithm::Xorshift1024
                | Algorithm::Xoroshiro128Plus
                | Algorithm::Mrg32k3a
        )
    }

    /// Width in bits of the generator's native output word.
    pub fn native_bits(&self) -> u32 {
        match self {
            Algorithm::Pcg64
            | Algorithm::Xorshift128
            | Algorithm::Xorshift1024
            | Algorithm::Xoroshiro128Plus => 64,
            _ => 32,
        }
    }

    /// Bits of precision carried by `next_double`.
    ///
    /// dSFMT produces 52-bit doubles natively and MRG32k3a scales a single
    /// output below 2^32; all other generators produce 53-bit doubles.
    pub fn precision_bits(&self) -> u32 {
        match self {
            Algorithm::Dsfmt => 52,
            Algorithm::Mrg32k3a => 32,
            _ => 53,
        }
    }

    /// Whether `next_double` carries the full 53 bits of an `f64` mantissa.
    pub fn is_precise(&self) -> bool {
        self.precision_bits() == 53
    }

    /// Jump distance as a base-2 logarithm, if the algorithm can jump.
    pub fn jump_log2(&self) -> Option<u32> {
        match self {
            Algorithm::Pcg32 => Some(32),
            Algorithm::Pcg64 | Algorithm::Xorshift128 | Algorithm::Xoroshiro128Plus => Some(64),
            Algorithm::Xorshift1024 => Some(512),
            Algorithm::Mrg32k3a => Some(127),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dsfmt" | "dsfmt19937" => Ok(Algorithm::Dsfmt),
            "pcg32" => Ok(Algorithm::Pcg32),
            "pcg64" => Ok(Algorithm::Pcg64),
            "mt19937" | "randomkit" => Ok(Algorithm::Mt19937),
            "xorshift128" | "xorshift128+" | "xorshift128plus" => Ok(Algorithm::Xorshift128),
            "xorshift1024" | "xorshift1024*" | "xorshift1024star" => Ok(Algorithm::Xorshift1024),
            "xoroshiro128plus" | "xoroshiro128+" | "xoroshiro128" => {
                Ok(Algorithm::Xoroshiro128Plus)
            }
            "mrg32k3a" => Ok(Algorithm::Mrg32k3a),
            "mlfg_1279_861" | "mlfg-1279-861" | "mlfg" => Ok(Algorithm::Mlfg1279861),
            _ => Err(RngError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = RngError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(alg: Algorithm) -> Self {
        alg.name().to_string()
    }
}
