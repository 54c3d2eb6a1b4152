//! Complex samples and owned result buffers.
//!
//! # Responsibility
//! - Fix the in-memory shape of one complex64 sample.
//! - Own kernel results until they are moved to the caller.
//!
//! # Invariants
//! - `Sample` is two adjacent `f32` lanes, real first.
//! - A `ComplexBuffer` is never shared with the core after it is returned.

use crate::array::ArrayHandle;
use num_complex::Complex32;
use serde::{Deserialize, Serialize};

/// One complex64 element: `re` lane followed by `im` lane.
pub type Sample = Complex32;

/// Byte size of one [`Sample`].
pub const SAMPLE_BYTES: usize = std::mem::size_of::<Sample>();

const _: () = assert!(SAMPLE_BYTES == 2 * std::mem::size_of::<f32>());
const _: () = assert!(std::mem::align_of::<Sample>() == std::mem::align_of::<f32>());

/// Uniquely owned, contiguous complex64 buffer produced by the kernels.
///
/// Serialized as a sequence of `[re, im]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplexBuffer {
    samples: Vec<Sample>,
}

impl ComplexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Releases the samples to the caller.
    pub fn into_vec(self) -> Vec<Sample> {
        self.samples
    }

    /// Lends a read-only 1-D handle over this buffer.
    pub fn handle(&self) -> ArrayHandle<'_> {
        ArrayHandle::from_samples(&self.samples)
    }

    /// Lends a writable 1-D handle over this buffer.
    pub fn handle_mut(&mut self) -> ArrayHandle<'_> {
        ArrayHandle::from_samples_mut(&mut self.samples)
    }
}

impl From<Vec<Sample>> for ComplexBuffer {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<Sample> for ComplexBuffer {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
