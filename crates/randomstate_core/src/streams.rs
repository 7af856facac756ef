//! Independent parallel streams by repeated jumping.
//!
//! Stream `k` is the base generator advanced by `k` jumps, so streams never
//! overlap unless a single stream draws more than the jump distance.

use tracing::debug;

use crate::error::RngError;
use crate::traits::BitGenerator;

/// Returns `n` generators; the first is a copy of `base`, each later one is
/// the previous stream jumped once.
///
/// `base` is left untouched.
///
/// # Errors
///
/// [`RngError::UnsupportedOperation`] if `n > 1` and the algorithm cannot jump.
///
/// # Examples
///
/// ```
/// use randomstate_core::streams::spawn_streams;
/// use randomstate_core::{BitGenerator, Xoroshiro128Plus};
///
/// let base = Xoroshiro128Plus::from_seed(7);
/// let mut streams = spawn_streams(&base, 4).unwrap();
/// assert_eq!(streams.len(), 4);
/// let a = streams[0].next_uint64();
/// let b = streams[1].next_uint64();
/// assert_ne!(a, b);
/// ```
pub fn spawn_streams<G>(base: &G, n: usize) -> Result<Vec<G>, RngError>
where
    G: BitGenerator + Clone,
{
    let mut streams = Vec::with_capacity(n);
    if n == 0 {
        return Ok(streams);
    }
    if n > 1 && !base.is_jumpable() {
        return Err(RngError::no_jump(base.algorithm()));
    }
    let mut current = base.clone();
    for _ in 1..n {
        let next = {
            let mut g = current.clone();
            g.jump()?;
            g
        };
        streams.push(std::mem::replace(&mut current, next));
    }
    streams.push(current);
    debug!(algorithm = %base.algorithm(), streams = n, "spawned jumped streams");
    Ok(streams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::generator::Generator;

    #[test]
    fn test_stream_k_is_k_jumps() {
        let base = Generator::new(Algorithm::Pcg64, 11).unwrap();
        let streams = spawn_streams(&base, 3).unwrap();
        let mut expected = base.clone();
        for stream in &streams {
            assert_eq!(stream, &expected);
            expected.jump().unwrap();
        }
    }

    #[test]
    fn test_zero_and_one_streams() {
        let base = Generator::new(Algorithm::Mt19937, 1).unwrap();
        assert!(spawn_streams(&base, 0).unwrap().is_empty());
        assert_eq!(spawn_streams(&base, 1).unwrap(), vec![base.clone()]);
    }

    #[test]
    fn test_non_jumpable_rejected() {
        let base = Generator::new(Algorithm::Dsfmt, 1).unwrap();
        assert!(matches!(
            spawn_streams(&base, 2),
            Err(RngError::UnsupportedOperation { .. })
        ));
    }
}
