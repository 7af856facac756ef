//! # randomstate_distributions: Distribution Sampling
//!
//! ## Layer 2 Role
//!
//! Converts the raw streams of any [`randomstate_core::BitGenerator`] into
//! samples from probability distributions:
//! - Sampling traits (`distribution`)
//! - Continuous distributions (`continuous`)
//! - Discrete distributions (`discrete`)
//! - Bounded integers by masked rejection (`bounded`)
//! - Parallel fills on jumped streams (`parallel`)
//!
//! Every sampler is a pure function of the generator's output, so a fixed
//! seed reproduces the same samples on every core that produces the same
//! words. Parameters are validated once, when a distribution is built.
//!
//! ## Usage Examples
//!
//! ```rust
//! use randomstate_core::{Algorithm, Generator};
//! use randomstate_distributions::continuous::Gamma;
//! use randomstate_distributions::discrete::Poisson;
//! use randomstate_distributions::{Distribution, Sampler};
//!
//! let mut rng = Generator::new(Algorithm::Pcg64, 2024).unwrap();
//!
//! let z = rng.standard_normal();
//! let g = Gamma::new(2.0, 1.5).unwrap().sample(&mut rng);
//! let k = rng.sample(&Poisson::new(4.0).unwrap());
//! assert!(z.is_finite() && g > 0.0);
//! let _ = k;
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod bounded;
pub mod continuous;
pub mod discrete;
pub mod distribution;
pub mod error;
pub mod parallel;
pub mod special;

pub use bounded::UniformInt;
pub use distribution::{Distribution, Sampler};
pub use error::DistributionError;
