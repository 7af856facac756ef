//! Binomial distribution.
//!
//! With `r = min(p, 1 - p)`, draws use inversion while `n * r` is at most
//! [`BINOMIAL_INVERSION_THRESHOLD`] and the BTPE acceptance/rejection scheme
//! of Kachitvichyanukul and Schmeiser (1988) above it. Success
//! probabilities above one half are sampled as `n - Binomial(n, 1 - p)`.

use randomstate_core::BitGenerator;

use crate::distribution::Distribution;
use crate::error::{check, DistributionError};

/// Largest `n * min(p, 1 - p)` still sampled by inversion.
pub const BINOMIAL_INVERSION_THRESHOLD: f64 = 30.0;

/// Binomial sample for validated parameters.
pub(crate) fn binomial<G: BitGenerator + ?Sized>(rng: &mut G, n: u64, p: f64) -> u64 {
    if n == 0 || p == 0.0 {
        return 0;
    }
    if p <= 0.5 {
        sample_low(rng, n, p)
    } else {
        n - sample_low(rng, n, 1.0 - p)
    }
}

fn sample_low<G: BitGenerator + ?Sized>(rng: &mut G, n: u64, p: f64) -> u64 {
    if p == 0.0 {
        0
    } else if n as f64 * p <= BINOMIAL_INVERSION_THRESHOLD {
        inversion(rng, n, p)
    } else {
        btpe(rng, n as i64, p) as u64
    }
}

fn inversion<G: BitGenerator + ?Sized>(rng: &mut G, n: u64, p: f64) -> u64 {
    let nf = n as f64;
    let q = 1.0 - p;
    let qn = (nf * q.ln()).exp();
    let np = nf * p;
    let bound = nf.min(np + 10.0 * (np * q + 1.0).sqrt());

    let mut x = 0u64;
    let mut px = qn;
    let mut u = rng.next_double();
    while u > px {
        x += 1;
        if x as f64 > bound {
            x = 0;
            px = qn;
            u = rng.next_double();
        } else {
            u -= px;
            px = ((nf - x as f64 + 1.0) * p * px) / (x as f64 * q);
        }
    }
    x
}

/// Stirling-series remainder used by the final BTPE acceptance test.
#[inline]
fn stirling_tail(x: f64) -> f64 {
    let x2 = x * x;
    (13680.0 - (462.0 - (132.0 - (99.0 - 140.0 / x2) / x2) / x2) / x2) / x / 166_320.0
}

fn btpe<G: BitGenerator + ?Sized>(rng: &mut G, n: i64, p: f64) -> i64 {
    let nf = n as f64;
    let r = p;
    let q = 1.0 - r;
    let fm = nf * r + r;
    let m = fm.floor();
    let mi = m as i64;
    let p1 = (2.195 * (nf * r * q).sqrt() - 4.6 * q).floor() + 0.5;
    let xm = m + 0.5;
    let xl = xm - p1;
    let xr = xm + p1;
    let c = 0.134 + 20.5 / (15.3 + m);
    let a = (fm - xl) / (fm - xl * r);
    let laml = a * (1.0 + a / 2.0);
    let a = (xr - fm) / (xr * q);
    let lamr = a * (1.0 + a / 2.0);
    let p2 = p1 * (1.0 + 2.0 * c);
    let p3 = p2 + c / laml;
    let p4 = p3 + c / lamr;
    let nrq = nf * r * q;

    loop {
        let u = rng.next_double() * p4;
        let mut v = rng.next_double();

        // Triangular centre: accepted without further tests.
        if u <= p1 {
            return (xm - p1 * v + u).floor() as i64;
        }

        let y = if u <= p2 {
            // Parallelograms.
            let x = xl + (u - p1) / c;
            v = v * c + 1.0 - (m - x + 0.5).abs() / p1;
            if v > 1.0 {
                continue;
            }
            x.floor() as i64
        } else if u <= p3 {
            // Left exponential tail.
            let y = (xl + v.ln() / laml).floor() as i64;
            if y < 0 || v == 0.0 {
                continue;
            }
            v *= (u - p2) * laml;
            y
        } else {
            // Right exponential tail.
            let y = (xr - v.ln() / lamr).floor() as i64;
            if y > n || v == 0.0 {
                continue;
            }
            v *= (u - p3) * lamr;
            y
        };

        let k = (y - mi).abs();
        if k <= 20 || k as f64 >= nrq / 2.0 - 1.0 {
            // Explicit evaluation of f(y) / f(m).
            let s = r / q;
            let a = s * (nf + 1.0);
            let mut f = 1.0;
            if mi < y {
                for i in (mi + 1)..=y {
                    f *= a / i as f64 - s;
                }
            } else if mi > y {
                for i in (y + 1)..=mi {
                    f /= a / i as f64 - s;
                }
            }
            if v <= f {
                return y;
            }
            continue;
        }

        // Squeeze on ln(f(y) / f(m)).
        let kf = k as f64;
        let rho = (kf / nrq) * ((kf * (kf / 3.0 + 0.625) + 0.166_666_666_666_666_66) / nrq + 0.5);
        let t = -kf * kf / (2.0 * nrq);
        let log_v = v.ln();
        if log_v < t - rho {
            return y;
        }
        if log_v > t + rho {
            continue;
        }

        let yf = y as f64;
        let x1 = yf + 1.0;
        let f1 = m + 1.0;
        let z = nf + 1.0 - m;
        let w = nf - yf + 1.0;
        let bound = xm * (f1 / x1).ln()
            + (nf - m + 0.5) * (z / w).ln()
            + (yf - m) * (w * r / (x1 * q)).ln()
            + stirling_tail(f1)
            + stirling_tail(z)
            + stirling_tail(x1)
            + stirling_tail(w);
        if log_v <= bound {
            return y;
        }
    }
}

/// Number of successes in `n` trials with success probability `p`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Binomial {
    n: u64,
    p: f64,
}

impl Binomial {
    /// # Errors
    ///
    /// `n` must fit in an `i64` and `p` must lie in `[0, 1]`.
    pub fn new(n: u64, p: f64) -> Result<Self, DistributionError> {
        check(n <= i64::MAX as u64, "n", n as f64, "must fit in a signed 64-bit integer")?;
        check((0.0..=1.0).contains(&p), "p", p, "must be in [0, 1]")?;
        Ok(Self { n, p })
    }

    /// Number of trials.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Success probability.
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution<u64> for Binomial {
    #[inline]
    fn sample<G: BitGenerator + ?Sized>(&self, rng: &mut G) -> u64 {
        binomial(rng, self.n, self.p)
    }
}
