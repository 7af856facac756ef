//! Parallel sampling on jumped streams.
//!
//! The output is split into fixed-size chunks and chunk `k` is filled from
//! stream `k` of [`spawn_streams`]. The result depends only on the base
//! generator, the chunk size and the output length, never on the thread
//! count or scheduling.

use randomstate_core::streams::spawn_streams;
use randomstate_core::BitGenerator;
use rayon::prelude::*;
use tracing::debug;

use crate::distribution::Distribution;
use crate::error::{check, DistributionError};

/// Fills `out` in parallel, one jumped stream per `chunk_size` samples.
///
/// `base` itself is not advanced.
///
/// # Errors
///
/// - `chunk_size` of zero
/// - [`DistributionError::Rng`] when more than one chunk is needed and the
///   algorithm cannot jump
///
/// # Examples
///
/// ```
/// use randomstate_core::Pcg64;
/// use randomstate_distributions::continuous::StandardNormal;
/// use randomstate_distributions::parallel::par_fill;
///
/// let base = Pcg64::from_seed(42, 0);
/// let mut out = vec![0.0; 10_000];
/// par_fill(&base, &StandardNormal, &mut out, 1024).unwrap();
/// ```
pub fn par_fill<G, D, T>(
    base: &G,
    dist: &D,
    out: &mut [T],
    chunk_size: usize,
) -> Result<(), DistributionError>
where
    G: BitGenerator + Clone + Send,
    D: Distribution<T> + Sync,
    T: Send,
{
    check(chunk_size > 0, "chunk_size", chunk_size as f64, "must be positive")?;
    let n_chunks = out.len().div_ceil(chunk_size);
    let mut streams = spawn_streams(base, n_chunks)?;
    debug!(
        algorithm = %base.algorithm(),
        len = out.len(),
        chunks = n_chunks,
        "parallel fill"
    );
    out.par_chunks_mut(chunk_size)
        .zip(streams.par_iter_mut())
        .for_each(|(chunk, rng)| dist.fill(rng, chunk));
    Ok(())
}

/// Returns `n` samples generated by [`par_fill`].
///
/// # Errors
///
/// As [`par_fill`].
pub fn par_sample_n<G, D, T>(
    base: &G,
    dist: &D,
    n: usize,
    chunk_size: usize,
) -> Result<Vec<T>, DistributionError>
where
    G: BitGenerator + Clone + Send,
    D: Distribution<T> + Sync,
    T: Send + Default + Clone,
{
    let mut out = vec![T::default(); n];
    par_fill(base, dist, &mut out, chunk_size)?;
    Ok(out)
}
