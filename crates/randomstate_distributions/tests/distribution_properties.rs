//! Statistical and contract tests for the sampling layer.

use randomstate_core::{
    Algorithm, BitGenerator, Generator, Pcg64, RngError, Snapshot, Xoroshiro128Plus,
};
use randomstate_distributions::continuous::{
    Beta, Gamma, Normal, StandardExponential, StandardNormal, StandardUniform,
};
use randomstate_distributions::discrete::{
    Binomial, Geometric, Poisson, BINOMIAL_INVERSION_THRESHOLD, POISSON_PTRS_THRESHOLD,
};
use randomstate_distributions::special::loggam;
use randomstate_distributions::{Distribution, Sampler, UniformInt};

// ================================================================
// Test generators
// ================================================================

/// Wraps a core and returns 0.0 from the first `zeros` doubles.
struct LeadingZeros<G> {
    inner: G,
    zeros: usize,
}

impl<G: BitGenerator> BitGenerator for LeadingZeros<G> {
    fn algorithm(&self) -> Algorithm {
        self.inner.algorithm()
    }

    fn next_uint32(&mut self) -> u32 {
        self.inner.next_uint32()
    }

    fn next_uint64(&mut self) -> u64 {
        self.inner.next_uint64()
    }

    fn next_double(&mut self) -> f64 {
        if self.zeros > 0 {
            self.zeros -= 1;
            0.0
        } else {
            self.inner.next_double()
        }
    }

    fn snapshot(&self) -> Snapshot {
        self.inner.snapshot()
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        self.inner.restore(snapshot)
    }
}

/// Counts every raw draw.
struct Counting<G> {
    inner: G,
    draws: u64,
}

impl<G: BitGenerator> BitGenerator for Counting<G> {
    fn algorithm(&self) -> Algorithm {
        self.inner.algorithm()
    }

    fn next_uint32(&mut self) -> u32 {
        self.draws += 1;
        self.inner.next_uint32()
    }

    fn next_uint64(&mut self) -> u64 {
        self.draws += 1;
        self.inner.next_uint64()
    }

    fn next_double(&mut self) -> f64 {
        self.draws += 1;
        self.inner.next_double()
    }

    fn snapshot(&self) -> Snapshot {
        self.inner.snapshot()
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        self.inner.restore(snapshot)
    }
}

fn mean_var(xs: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, var)
}

/// Checks observed counts against a pmf on every cell with mass above 0.5%.
fn assert_matches_pmf(samples: &[u64], pmf: impl Fn(u64) -> f64, label: &str) {
    let n = samples.len() as f64;
    let max = samples.iter().copied().max().unwrap_or(0);
    let mut counts = vec![0u64; max as usize + 1];
    for &k in samples {
        counts[k as usize] += 1;
    }
    for (k, &observed) in counts.iter().enumerate() {
        let p = pmf(k as u64);
        if p < 0.005 {
            continue;
        }
        let expected = n * p;
        let sd = (n * p * (1.0 - p)).sqrt();
        assert!(
            (observed as f64 - expected).abs() < 6.0 * sd,
            "{}: k = {} observed {} expected {:.1}",
            label,
            k,
            observed,
            expected
        );
    }
}

// ================================================================
// Moments
// ================================================================

#[test]
fn test_standard_normal_moments() {
    let mut rng = Generator::new(Algorithm::Pcg64, 20).unwrap();
    let xs = StandardNormal.sample_n(&mut rng, 1_000_000);
    let (mean, var) = mean_var(&xs);
    assert!(mean.abs() < 0.01, "mean {}", mean);
    assert!((var - 1.0).abs() < 0.02, "var {}", var);
}

#[test]
fn test_standard_normal_tails() {
    let mut rng = Generator::new(Algorithm::Xorshift1024, 3).unwrap();
    let n = 1_000_000;
    let beyond_two = (0..n).filter(|_| rng.standard_normal().abs() > 2.0).count();
    // P(|Z| > 2) = 0.0455
    let frac = beyond_two as f64 / n as f64;
    assert!((frac - 0.0455).abs() < 0.002, "tail fraction {}", frac);
}

#[test]
fn test_standard_uniform_every_core() {
    for alg in Algorithm::ALL {
        let mut rng = Generator::new(alg, 11).unwrap();
        let mut buf = vec![0.0; 1_000_000];
        StandardUniform.fill(&mut rng, &mut buf);
        assert!(buf.iter().all(|x| (0.0..1.0).contains(x)), "{}", alg);
        let (mean, _) = mean_var(&buf);
        assert!((mean - 0.5).abs() < 0.005, "{} mean {}", alg, mean);
    }
}

#[test]
fn test_gamma_and_beta_means() {
    let mut rng = Pcg64::from_seed(4, 4);
    let gamma = Gamma::new(0.3, 2.0).unwrap();
    let (mean, _) = mean_var(&gamma.sample_n(&mut rng, 400_000));
    assert!((mean - 0.6).abs() < 0.01, "gamma mean {}", mean);

    let beta = Beta::new(2.0, 5.0).unwrap();
    let xs = beta.sample_n(&mut rng, 400_000);
    assert!(xs.iter().all(|x| (0.0..=1.0).contains(x)));
    let (mean, _) = mean_var(&xs);
    assert!((mean - 2.0 / 7.0).abs() < 0.003, "beta mean {}", mean);
}

// ================================================================
// Zero-draw guard
// ================================================================

#[test]
fn test_exponential_redraws_exact_zero() {
    let inner = Pcg64::from_seed(12, 0);
    let mut expected_rng = inner.clone();
    let mut rng = LeadingZeros { inner, zeros: 3 };

    let e = StandardExponential.sample(&mut rng);
    assert!(e.is_finite() && e > 0.0);
    assert_eq!(e, -expected_rng.next_double().ln());
}

#[test]
fn test_geometric_redraws_exact_zero() {
    let mut rng = LeadingZeros {
        inner: Xoroshiro128Plus::from_seed(1),
        zeros: 2,
    };
    let k = Geometric::new(0.01).unwrap().sample(&mut rng);
    assert!(k >= 1);
}

// ================================================================
// Algorithm thresholds
// ================================================================

fn poisson_pmf(lam: f64) -> impl Fn(u64) -> f64 {
    move |k| (-lam + k as f64 * lam.ln() - loggam(k as f64 + 1.0)).exp()
}

fn binomial_pmf(n: u64, p: f64) -> impl Fn(u64) -> f64 {
    move |k| {
        if k > n {
            return 0.0;
        }
        let (nf, kf) = (n as f64, k as f64);
        let log_choose = loggam(nf + 1.0) - loggam(kf + 1.0) - loggam(nf - kf + 1.0);
        (log_choose + kf * p.ln() + (nf - kf) * (1.0 - p).ln()).exp()
    }
}

#[test]
fn test_poisson_pmf_across_threshold() {
    let mut rng = Generator::new(Algorithm::Mt19937, 77).unwrap();
    for lam in [POISSON_PTRS_THRESHOLD - 0.01, POISSON_PTRS_THRESHOLD, 10.01] {
        let samples = Poisson::new(lam).unwrap().sample_n(&mut rng, 300_000);
        assert_matches_pmf(&samples, poisson_pmf(lam), &format!("poisson({})", lam));
    }
}

#[test]
fn test_binomial_pmf_across_threshold() {
    let mut rng = Generator::new(Algorithm::Dsfmt, 77).unwrap();
    // n * p = 30 is the last inversion case, 30.5 the first BTPE case.
    let at = (BINOMIAL_INVERSION_THRESHOLD * 2.0) as u64;
    for (n, p) in [(at, 0.5), (at + 1, 0.5), (300, 0.1), (300, 0.9)] {
        let samples = Binomial::new(n, p).unwrap().sample_n(&mut rng, 300_000);
        assert!(samples.iter().all(|&k| k <= n));
        assert_matches_pmf(&samples, binomial_pmf(n, p), &format!("binomial({}, {})", n, p));
    }
}

#[test]
fn test_geometric_pmf() {
    let mut rng = Generator::new(Algorithm::Pcg32, 5).unwrap();
    for p in [0.5, 0.2] {
        let samples = Geometric::new(p).unwrap().sample_n(&mut rng, 200_000);
        let pmf = move |k: u64| if k == 0 { 0.0 } else { p * (1.0 - p).powi(k as i32 - 1) };
        assert_matches_pmf(&samples, pmf, &format!("geometric({})", p));
    }
}

// ================================================================
// Efficiency
// ================================================================

#[test]
fn test_ziggurat_draws_per_sample() {
    let mut rng = Counting {
        inner: Xoroshiro128Plus::from_seed(9),
        draws: 0,
    };
    let n = 200_000;
    for _ in 0..n {
        StandardNormal.sample(&mut rng);
    }
    let per_sample = rng.draws as f64 / n as f64;
    assert!(per_sample < 1.1, "draws per sample {}", per_sample);
}

#[test]
fn test_bounded_draws_per_sample() {
    let mut rng = Counting {
        inner: Xoroshiro128Plus::from_seed(9),
        draws: 0,
    };
    // Worst case: max just above a power of two.
    let n = 100_000;
    for _ in 0..n {
        assert!(rng.bounded_u64(1 << 40) <= 1 << 40);
    }
    assert!((rng.draws as f64 / n as f64) < 2.1);
}

// ================================================================
// Reproducibility
// ================================================================

#[test]
fn test_same_seed_same_samples() {
    let normal = Normal::new(1.0, 3.0).unwrap();
    let poisson = Poisson::new(25.0).unwrap();
    let die = UniformInt::new(1, 7).unwrap();
    for alg in Algorithm::ALL {
        let mut a = Generator::new(alg, 314).unwrap();
        let mut b = Generator::new(alg, 314).unwrap();
        for _ in 0..500 {
            assert_eq!(normal.sample(&mut a), normal.sample(&mut b));
            assert_eq!(poisson.sample(&mut a), poisson.sample(&mut b));
            assert_eq!(die.sample(&mut a), die.sample(&mut b));
        }
    }
}

#[test]
fn test_restore_replays_samples() {
    let mut rng = Generator::new(Algorithm::Mrg32k3a, 8).unwrap();
    rng.standard_normal();
    let snap = rng.snapshot();
    let gamma = Gamma::new(2.5, 1.0).unwrap();
    let first = gamma.sample_n(&mut rng, 100);
    rng.restore(&snap).unwrap();
    assert_eq!(gamma.sample_n(&mut rng, 100), first);
}

#[test]
fn test_sampler_through_trait_object() {
    let mut rng = Generator::new(Algorithm::Xorshift128, 1).unwrap();
    let dyn_rng: &mut dyn BitGenerator = &mut rng;
    let x = dyn_rng.standard_normal();
    let k = dyn_rng.random_range(-5, 5).unwrap();
    assert!(x.is_finite());
    assert!((-5..5).contains(&k));
}
