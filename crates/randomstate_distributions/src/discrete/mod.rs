//! # Discrete Distributions
//!
//! | Distribution | Support | Method |
//! |--------------|---------|--------|
//! | [`Poisson`] | `0..` | multiplication below `lam = 10`, PTRS from 10 |
//! | [`Binomial`] | `0..=n` | inversion up to `n * min(p, 1 - p) = 30`, BTPE above |
//! | [`Geometric`] | `1..` | sequential search from `p = 1/3`, inversion below |
//! | [`NegativeBinomial`] | `0..` | gamma-Poisson mixture |
//!
//! All samplers return `u64`.

pub mod binomial;
pub mod geometric;
pub mod negative_binomial;
pub mod poisson;

pub use binomial::{Binomial, BINOMIAL_INVERSION_THRESHOLD};
pub use geometric::{Geometric, GEOMETRIC_SEARCH_THRESHOLD};
pub use negative_binomial::NegativeBinomial;
pub use poisson::{Poisson, POISSON_LAM_MAX, POISSON_PTRS_THRESHOLD};
