//! Process-wide table of the available algorithms.
//!
//! [`REGISTRY`] maps every [`Algorithm`] to its canonical name, period,
//! jump capability and a seeded constructor. It is a `static` slice, fixed
//! at compile time and never mutated.

use crate::algorithm::Algorithm;
use crate::error::RngError;
use crate::generator::Generator;
use crate::generators::{
    Dsfmt, Mlfg1279861, Mrg32k3a, Mt19937, Pcg32, Pcg64, Xoroshiro128Plus, Xorshift1024,
    Xorshift128,
};
use crate::traits::SeedableGenerator;

/// Constructor stored in a registry entry.
pub type Constructor = fn(u64) -> Result<Generator, RngError>;

/// Static description of one algorithm.
#[derive(Clone, Copy, Debug)]
pub struct RegistryEntry {
    /// Algorithm tag
    pub algorithm: Algorithm,
    /// Canonical lower-case name
    pub name: &'static str,
    /// Base-2 logarithm of the period, rounded down
    pub period_log2: u32,
    /// Whether `jump` is supported
    pub jumpable: bool,
    /// Builds a generator from a 64-bit seed
    pub constructor: Constructor,
}

fn seeded<G>(seed: u64) -> Result<Generator, RngError>
where
    G: SeedableGenerator + Into<Generator>,
{
    G::seed_from_u64(seed).map(Into::into)
}

/// Every algorithm, in snapshot-tag order.
pub static REGISTRY: &[RegistryEntry] = &[
    RegistryEntry {
        algorithm: Algorithm::Dsfmt,
        name: "dsfmt",
        period_log2: 19937,
        jumpable: false,
        constructor: seeded::<Dsfmt>,
    },
    RegistryEntry {
        algorithm: Algorithm::Pcg32,
        name: "pcg32",
        period_log2: 64,
        jumpable: true,
        constructor: seeded::<Pcg32>,
    },
    RegistryEntry {
        algorithm: Algorithm::Pcg64,
        name: "pcg64",
        period_log2: 128,
        jumpable: true,
        constructor: seeded::<Pcg64>,
    },
    RegistryEntry {
        algorithm: Algorithm::Mt19937,
        name: "mt19937",
        period_log2: 19937,
        jumpable: false,
        constructor: seeded::<Mt19937>,
    },
    RegistryEntry {
        algorithm: Algorithm::Xorshift128,
        name: "xorshift128",
        period_log2: 128,
        jumpable: true,
        constructor: seeded::<Xorshift128>,
    },
    RegistryEntry {
        algorithm: Algorithm::Xorshift1024,
        name: "xorshift1024",
        period_log2: 1024,
        jumpable: true,
        constructor: seeded::<Xorshift1024>,
    },
    RegistryEntry {
        algorithm: Algorithm::Xoroshiro128Plus,
        name: "xoroshiro128plus",
        period_log2: 128,
        jumpable: true,
        constructor: seeded::<Xoroshiro128Plus>,
    },
    RegistryEntry {
        algorithm: Algorithm::Mrg32k3a,
        name: "mrg32k3a",
        period_log2: 191,
        jumpable: true,
        constructor: seeded::<Mrg32k3a>,
    },
    RegistryEntry {
        algorithm: Algorithm::Mlfg1279861,
        name: "mlfg_1279_861",
        period_log2: 1340,
        jumpable: false,
        constructor: seeded::<Mlfg1279861>,
    },
];

/// Registry entry for `algorithm`.
pub fn entry(algorithm: Algorithm) -> &'static RegistryEntry {
    // Entries are stored in tag order starting at 1.
    &REGISTRY[algorithm.tag() as usize - 1]
}

/// Looks up an entry by name or alias, case-insensitively.
///
/// # Errors
///
/// [`RngError::UnknownAlgorithm`] if the name matches nothing.
///
/// # Examples
///
/// ```
/// use randomstate_core::{registry, Algorithm, BitGenerator};
///
/// let entry = registry::lookup("XOROSHIRO128+").unwrap();
/// assert_eq!(entry.name, "xoroshiro128plus");
/// let rng = (entry.constructor)(7).unwrap();
/// assert_eq!(rng.algorithm(), Algorithm::Xoroshiro128Plus);
/// assert!(registry::lookup("lcg48").is_err());
/// ```
pub fn lookup(name: &str) -> Result<&'static RegistryEntry, RngError> {
    let algorithm: Algorithm = name.parse()?;
    Ok(entry(algorithm))
}

/// Canonical names of every registered algorithm.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|e| e.name)
}
