//! # randomstate_core: Interchangeable Pseudo-Random Bit Generators
//!
//! ## Layer 1 (Foundation) Role
//!
//! randomstate_core is the bottom layer of the random-number stack,
//! providing:
//! - Nine bit generator cores behind one trait (`generators`, `traits`)
//! - Static dispatch over all cores chosen at run time (`generator`)
//! - Exact state capture and restore (`snapshot`)
//! - Operating system entropy for seeding (`entropy`)
//! - Aligned state buffers (`aligned`)
//! - The shared 32/64-bit word contracts (`word`)
//! - Algorithm registry, configuration and parallel streams (`registry`, `config`, `streams`)
//!
//! Distributions live in Layer 2 (`randomstate_distributions`) and are
//! written only against [`BitGenerator`].
//!
//! ## Usage Examples
//!
//! ```rust
//! use randomstate_core::{Algorithm, BitGenerator, Generator, SeedableGenerator, Pcg64};
//!
//! // Concrete core
//! let mut pcg = Pcg64::seed_from_u64(42).unwrap();
//! let x = pcg.next_double();
//! assert!((0.0..1.0).contains(&x));
//!
//! // Run-time selection
//! let mut rng = Generator::new(Algorithm::Xorshift1024, 42).unwrap();
//! rng.jump().unwrap();
//!
//! // Snapshot and restore
//! let snap = rng.snapshot();
//! let bytes = snap.to_bytes();
//! let a = rng.next_uint64();
//! let restored = randomstate_core::Snapshot::from_bytes(&bytes).unwrap();
//! let mut copy = Generator::from_snapshot(&restored).unwrap();
//! assert_eq!(copy.next_uint64(), a);
//! ```
//!
//! ## Thread Safety
//!
//! Generators are plain owned values (`Send + Sync`) with no internal
//! locking. Give each thread its own stream with
//! [`streams::spawn_streams`] rather than sharing one handle.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod aligned;
pub mod algorithm;
pub mod config;
pub mod entropy;
pub mod error;
pub mod generator;
pub mod generators;
pub mod registry;
pub mod snapshot;
pub mod streams;
pub mod traits;
pub mod word;

pub use aligned::AlignedBuffer;
pub use algorithm::Algorithm;
pub use config::{ConfigError, GeneratorConfig};
pub use entropy::{get_random_bytes, EntropySource, OsEntropy};
pub use error::RngError;
pub use generator::Generator;
pub use generators::{
    Dsfmt, Mlfg1279861, Mrg32k3a, Mt19937, Pcg32, Pcg64, Xoroshiro128Plus, Xorshift1024,
    Xorshift128,
};
pub use snapshot::Snapshot;
pub use traits::{BitGenerator, SeedableGenerator};
