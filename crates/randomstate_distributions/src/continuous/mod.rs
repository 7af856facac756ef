//! Continuous distributions.
//!
//! | Type | Method |
//! |------|--------|
//! | [`StandardUniform`], [`Uniform`] | scaled `next_double` |
//! | [`StandardNormal`], [`Normal`], [`LogNormal`] | 128-layer ziggurat |
//! | [`StandardExponential`], [`Exponential`] | inversion, zero draws redrawn |
//! | [`Gamma`], [`ChiSquared`] | Marsaglia-Tsang; boosted below shape 1 |
//! | [`Beta`] | Jöhnk for small shapes, otherwise gamma ratio |
//! | [`FisherF`], [`StudentT`] | gamma and Gaussian compositions |
//! | [`Cauchy`], [`Laplace`], [`Logistic`], [`Gumbel`] | closed-form inversion |
//! | [`Weibull`], [`Pareto`], [`Rayleigh`], [`Triangular`] | closed-form inversion |

pub mod exponential;
pub mod gamma;
pub mod normal;
pub mod shapes;
pub mod uniform;

pub use exponential::{Exponential, StandardExponential};
pub use gamma::{Beta, ChiSquared, FisherF, Gamma, StudentT};
pub use normal::{LogNormal, Normal, StandardNormal};
pub use shapes::{Cauchy, Gumbel, Laplace, Logistic, Pareto, Rayleigh, Triangular, Weibull};
pub use uniform::{StandardUniform, Uniform};
