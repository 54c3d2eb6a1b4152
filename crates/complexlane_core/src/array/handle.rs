//! Host array handle descriptor.
//!
//! # Responsibility
//! - Carry element type, shape, byte strides, data pointer and access flag
//!   exactly as a host runtime describes an array.
//! - Offer safe constructors over Rust slices and an `unsafe` one for
//!   foreign memory.
//!
//! # Invariants
//! - A handle borrows its storage for `'a` and never owns it.
//! - Handles built by safe constructors never describe bytes outside the
//!   borrowed slice.

use crate::model::buffer::{Sample, SAMPLE_BYTES};
use crate::model::element_type::ElementType;
use std::marker::PhantomData;

/// Capability requested from, or granted by, a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    ReadOnly,
    Writable,
}

/// Plain descriptor of an array whose memory is owned elsewhere.
#[derive(Debug)]
pub struct ArrayHandle<'a> {
    element_type: ElementType,
    shape: Vec<usize>,
    /// Byte offsets between consecutive elements along each axis.
    strides: Vec<isize>,
    data: *mut u8,
    access: Access,
    _storage: PhantomData<&'a mut [u8]>,
}

impl<'a> ArrayHandle<'a> {
    /// Read-only 1-D contiguous complex64 handle over `samples`.
    pub fn from_samples(samples: &'a [Sample]) -> Self {
        Self {
            element_type: ElementType::COMPLEX64,
            shape: vec![samples.len()],
            strides: vec![SAMPLE_BYTES as isize],
            // Never written through: access is `ReadOnly`.
            data: samples.as_ptr() as *mut u8,
            access: Access::ReadOnly,
            _storage: PhantomData,
        }
    }

    /// Writable 1-D contiguous complex64 handle over `samples`.
    pub fn from_samples_mut(samples: &'a mut [Sample]) -> Self {
        Self {
            element_type: ElementType::COMPLEX64,
            shape: vec![samples.len()],
            strides: vec![SAMPLE_BYTES as isize],
            data: samples.as_mut_ptr() as *mut u8,
            access: Access::Writable,
            _storage: PhantomData,
        }
    }

    /// Read-only 1-D handle over every `step`-th sample, like `x[::step]`.
    ///
    /// Returns `None` when `step` is zero.
    pub fn strided(samples: &'a [Sample], step: usize) -> Option<Self> {
        if step == 0 {
            return None;
        }
        let stride = step.checked_mul(SAMPLE_BYTES)?;
        Some(Self {
            element_type: ElementType::COMPLEX64,
            shape: vec![samples.len().div_ceil(step)],
            strides: vec![isize::try_from(stride).ok()?],
            data: samples.as_ptr() as *mut u8,
            access: Access::ReadOnly,
            _storage: PhantomData,
        })
    }

    /// Read-only row-major 2-D handle over `samples`.
    ///
    /// Returns `None` when `rows * cols` differs from `samples.len()`.
    pub fn matrix(samples: &'a [Sample], rows: usize, cols: usize) -> Option<Self> {
        if rows.checked_mul(cols)? != samples.len() {
            return None;
        }
        let row_stride = isize::try_from(cols.checked_mul(SAMPLE_BYTES)?).ok()?;
        Some(Self {
            element_type: ElementType::COMPLEX64,
            shape: vec![rows, cols],
            strides: vec![row_stride, SAMPLE_BYTES as isize],
            data: samples.as_ptr() as *mut u8,
            access: Access::ReadOnly,
            _storage: PhantomData,
        })
    }

    /// Read-only 1-D contiguous handle reinterpreting `bytes` as elements of
    /// `element_type`.
    ///
    /// Returns `None` when the itemsize is zero or does not divide the byte
    /// length.
    pub fn from_bytes(element_type: ElementType, bytes: &'a [u8]) -> Option<Self> {
        if element_type.itemsize == 0 || bytes.len() % element_type.itemsize != 0 {
            return None;
        }
        Some(Self {
            element_type,
            shape: vec![bytes.len() / element_type.itemsize],
            strides: vec![isize::try_from(element_type.itemsize).ok()?],
            data: bytes.as_ptr() as *mut u8,
            access: Access::ReadOnly,
            _storage: PhantomData,
        })
    }

    /// Builds a handle from a foreign descriptor.
    ///
    /// # Safety
    /// - Every element addressed by `shape` and `strides` from `data` must
    ///   lie in one allocation that stays valid for `'a`.
    /// - With `Access::Writable`, that memory must be writable and not
    ///   accessed through any other path while a view of it is alive.
    /// - With `Access::ReadOnly`, that memory must not be mutated while a
    ///   view of it is alive.
    pub unsafe fn from_raw_parts(
        element_type: ElementType,
        shape: Vec<usize>,
        strides: Vec<isize>,
        data: *mut u8,
        access: Access,
    ) -> Self {
        Self {
            element_type,
            shape,
            strides,
            data,
            access,
            _storage: PhantomData,
        }
    }

    /// Drops write permission; downgrading is always sound.
    pub fn into_read_only(mut self) -> Self {
        self.access = Access::ReadOnly;
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn is_writable(&self) -> bool {
        self.access == Access::Writable
    }

    pub fn data_ptr(&self) -> *const u8 {
        self.data
    }

    pub(crate) fn data_ptr_mut(&mut self) -> *mut u8 {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::{Access, ArrayHandle};
    use crate::model::buffer::Sample;
    use crate::model::element_type::ElementType;

    fn samples(len: usize) -> Vec<Sample> {
        (0..len).map(|k| Sample::new(k as f32, 0.0)).collect()
    }

    #[test]
    fn slice_handles_are_contiguous_complex64() {
        let mut data = samples(5);
        {
            let handle = ArrayHandle::from_samples(&data);
            assert_eq!(handle.element_type(), ElementType::COMPLEX64);
            assert_eq!(handle.shape(), &[5]);
            assert_eq!(handle.strides(), &[8]);
            assert_eq!(handle.access(), Access::ReadOnly);
        }

        let handle = ArrayHandle::from_samples_mut(&mut data);
        assert!(handle.is_writable());
        assert!(!handle.into_read_only().is_writable());
    }

    #[test]
    fn strided_handle_covers_every_step_th_sample() {
        let data = samples(5);
        let handle = ArrayHandle::strided(&data, 2).expect("step 2 is valid");
        assert_eq!(handle.shape(), &[3]);
        assert_eq!(handle.strides(), &[16]);
        assert!(ArrayHandle::strided(&data, 0).is_none());
    }

    #[test]
    fn matrix_handle_requires_exact_extent() {
        let data = samples(6);
        let handle = ArrayHandle::matrix(&data, 2, 3).expect("2x3 covers 6 samples");
        assert_eq!(handle.ndim(), 2);
        assert_eq!(handle.strides(), &[24, 8]);
        assert!(ArrayHandle::matrix(&data, 4, 2).is_none());
    }

    #[test]
    fn byte_handle_requires_whole_elements() {
        let bytes = [0_u8; 12];
        let handle =
            ArrayHandle::from_bytes(ElementType::FLOAT32, &bytes).expect("12 bytes are 3 f32");
        assert_eq!(handle.shape(), &[3]);
        assert!(ArrayHandle::from_bytes(ElementType::COMPLEX64, &bytes).is_none());
    }
}
