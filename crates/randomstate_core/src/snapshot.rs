//! Algorithm-tagged state snapshots.
//!
//! A [`Snapshot`] captures everything a generator needs to continue its
//! sequence exactly: the recurrence state, position indices and any
//! buffered-but-unconsumed output (half words, dSFMT's block index).
//!
//! # Byte format
//!
//! `to_bytes()` produces `[tag: u8][payload]`, where the payload is the
//! generator's state with every integer written little-endian and every
//! index written as `u32`. The layout is fixed per algorithm within one
//! crate version; it is not promised to stay stable across versions.

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::error::RngError;

/// Serialised generator state prefixed by its algorithm tag.
///
/// # Examples
///
/// ```
/// use randomstate_core::{BitGenerator, Pcg32};
///
/// let mut rng = Pcg32::from_seed(42, 54);
/// rng.next_uint32();
/// let snap = rng.snapshot();
///
/// let expected: Vec<u32> = (0..4).map(|_| rng.next_uint32()).collect();
/// rng.restore(&snap).unwrap();
/// let replayed: Vec<u32> = (0..4).map(|_| rng.next_uint32()).collect();
/// assert_eq!(expected, replayed);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    algorithm: Algorithm,
    payload: Vec<u8>,
}

impl Snapshot {
    pub(crate) fn new(algorithm: Algorithm, payload: Vec<u8>) -> Self {
        Self { algorithm, payload }
    }

    /// Algorithm the state belongs to.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// State bytes without the tag.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Opaque byte encoding: tag byte followed by the payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.payload.len() + 1);
        bytes.push(self.algorithm.tag());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Decodes bytes produced by [`Snapshot::to_bytes`].
    ///
    /// Only the tag is validated here; the payload is checked when the
    /// snapshot is restored into a generator.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RngError> {
        let (&tag, payload) = bytes
            .split_first()
            .ok_or_else(|| RngError::CorruptSnapshot("empty snapshot".to_string()))?;
        let algorithm = Algorithm::from_tag(tag)
            .ok_or_else(|| RngError::CorruptSnapshot(format!("unknown algorithm tag {}", tag)))?;
        Ok(Self::new(algorithm, payload.to_vec()))
    }

    /// Fails with [`RngError::TypeMismatch`] unless the snapshot belongs to `expected`.
    pub fn expect_algorithm(&self, expected: Algorithm) -> Result<(), RngError> {
        if self.algorithm == expected {
            Ok(())
        } else {
            tracing::warn!(%expected, found = %self.algorithm, "snapshot tag mismatch");
            Err(RngError::TypeMismatch {
                expected,
                found: self.algorithm,
            })
        }
    }
}

/// Little-endian payload writer used by generator `snapshot` implementations.
#[derive(Debug, Default)]
pub(crate) struct StateWriter {
    bytes: Vec<u8>,
}

impl StateWriter {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn bool(&mut self, value: bool) -> &mut Self {
        self.bytes.push(value as u8);
        self
    }

    pub(crate) fn u32(&mut self, value: u32) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub(crate) fn u64(&mut self, value: u64) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub(crate) fn u128(&mut self, value: u128) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub(crate) fn index(&mut self, value: usize) -> &mut Self {
        self.u32(value as u32)
    }

    pub(crate) fn u32s(&mut self, values: &[u32]) -> &mut Self {
        for &v in values {
            self.u32(v);
        }
        self
    }

    pub(crate) fn u64s(&mut self, values: &[u64]) -> &mut Self {
        for &v in values {
            self.u64(v);
        }
        self
    }

    pub(crate) fn finish(&mut self, algorithm: Algorithm) -> Snapshot {
        Snapshot::new(algorithm, std::mem::take(&mut self.bytes))
    }
}

/// Little-endian payload reader used by generator `restore` implementations.
#[derive(Debug)]
pub(crate) struct StateReader<'a> {
    bytes: &'a [u8],
}

impl<'a> StateReader<'a> {
    /// Checks the tag and positions the reader at the start of the payload.
    pub(crate) fn open(snapshot: &'a Snapshot, expected: Algorithm) -> Result<Self, RngError> {
        snapshot.expect_algorithm(expected)?;
        Ok(Self {
            bytes: snapshot.payload(),
        })
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], RngError> {
        if self.bytes.len() < N {
            return Err(RngError::CorruptSnapshot(format!(
                "truncated payload: needed {} more bytes, {} left",
                N,
                self.bytes.len()
            )));
        }
        let (head, tail) = self.bytes.split_at(N);
        self.bytes = tail;
        let mut out = [0u8; N];
        out.copy_from_slice(head);
        Ok(out)
    }

    pub(crate) fn bool(&mut self) -> Result<bool, RngError> {
        match self.take::<1>()?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(RngError::CorruptSnapshot(format!(
                "invalid flag byte {}",
                other
            ))),
        }
    }

    pub(crate) fn u32(&mut self) -> Result<u32, RngError> {
        Ok(u32::from_le_bytes(self.take::<4>()?))
    }

    pub(crate) fn u64(&mut self) -> Result<u64, RngError> {
        Ok(u64::from_le_bytes(self.take::<8>()?))
    }

    pub(crate) fn u128(&mut self) -> Result<u128, RngError> {
        Ok(u128::from_le_bytes(self.take::<16>()?))
    }

    /// Reads an index and checks it against an inclusive upper bound.
    pub(crate) fn index(&mut self, max: usize) -> Result<usize, RngError> {
        let value = self.u32()? as usize;
        if value > max {
            return Err(RngError::CorruptSnapshot(format!(
                "index {} exceeds {}",
                value, max
            )));
        }
        Ok(value)
    }

    pub(crate) fn u32s(&mut self, out: &mut [u32]) -> Result<(), RngError> {
        for slot in out.iter_mut() {
            *slot = self.u32()?;
        }
        Ok(())
    }

    pub(crate) fn u64s(&mut self, out: &mut [u64]) -> Result<(), RngError> {
        for slot in out.iter_mut() {
            *slot = self.u64()?;
        }
        Ok(())
    }

    /// Fails if unread bytes remain.
    pub(crate) fn finish(self) -> Result<(), RngError> {
        if self.bytes.is_empty() {
            Ok(())
        } else {
            Err(RngError::CorruptSnapshot(format!(
                "{} trailing bytes",
                self.bytes.len()
            )))
        }
    }
}
