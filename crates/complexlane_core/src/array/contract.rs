//! Buffer contract checks and typed views.
//!
//! # Responsibility
//! - Decide whether a handle can be read (or written) as a flat complex64
//!   slice.
//! - Hand out views whose lifetimes are tied to the handle.
//!
//! # Invariants
//! - Checks run in a fixed order: element type, rank, layout, access.
//! - Validation has no side effects and never touches sample memory.
//! - A view exists only for handles that passed every check.

use crate::array::handle::{Access, ArrayHandle};
use crate::model::buffer::{Sample, SAMPLE_BYTES};
use crate::model::element_type::ElementType;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::slice;

/// Why a handle failed the layout check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFault {
    /// Consecutive elements are not `SAMPLE_BYTES` apart.
    Strided { stride: isize },
    /// Shape and strides describe a different number of axes.
    StrideRank { shape_rank: usize, stride_rank: usize },
    /// Non-empty array without a data pointer.
    NullData,
    /// Data pointer is not aligned for an `f32` lane.
    Misaligned { address: usize },
    /// Byte extent does not fit in `isize`.
    ExtentOverflow { len: usize },
}

impl Display for LayoutFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strided { stride } => write!(
                f,
                "expected a C-contiguous array (stride {SAMPLE_BYTES}), got stride {stride}"
            ),
            Self::StrideRank {
                shape_rank,
                stride_rank,
            } => write!(
                f,
                "strides describe {stride_rank} axes but shape describes {shape_rank}"
            ),
            Self::NullData => write!(f, "non-empty array has a null data pointer"),
            Self::Misaligned { address } => {
                write!(f, "data pointer {address:#x} is not aligned for float32 lanes")
            }
            Self::ExtentOverflow { len } => {
                write!(f, "array of {len} elements exceeds addressable memory")
            }
        }
    }
}

/// Precondition violations detected by the contract checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractError {
    TypeMismatch { found: ElementType },
    ShapeMismatch { ndim: usize },
    LayoutMismatch(LayoutFault),
    NotWritable,
}

impl Display for ContractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { found } => {
                write!(f, "expected dtype=complex64, got {found}")
            }
            Self::ShapeMismatch { ndim } => write!(f, "expected a 1D array, got {ndim}D"),
            Self::LayoutMismatch(fault) => write!(f, "{fault}"),
            Self::NotWritable => write!(f, "expected a writable array, got a read-only one"),
        }
    }
}

impl Error for ContractError {}

/// Validates `handle` for `access` and returns its element count.
///
/// # Errors
/// - `TypeMismatch` unless the element type is complex64 in native order.
/// - `ShapeMismatch` unless the handle is 1-D.
/// - `LayoutMismatch` unless the data is C-contiguous, aligned and addressable.
/// - `NotWritable` when `access` is `Writable` and the handle is read-only.
pub fn check_contract(handle: &ArrayHandle<'_>, access: Access) -> Result<usize, ContractError> {
    let element_type = handle.element_type();
    if !element_type.is_complex64() {
        return Err(ContractError::TypeMismatch {
            found: element_type,
        });
    }

    if handle.ndim() != 1 {
        return Err(ContractError::ShapeMismatch {
            ndim: handle.ndim(),
        });
    }

    let len = handle.shape()[0];
    check_layout(handle, len).map_err(ContractError::LayoutMismatch)?;

    if access == Access::Writable && !handle.is_writable() {
        return Err(ContractError::NotWritable);
    }

    Ok(len)
}

fn check_layout(handle: &ArrayHandle<'_>, len: usize) -> Result<(), LayoutFault> {
    let strides = handle.strides();
    if strides.len() != handle.ndim() {
        return Err(LayoutFault::StrideRank {
            shape_rank: handle.ndim(),
            stride_rank: strides.len(),
        });
    }

    // The stride of an axis holding at most one element is never followed.
    let stride = strides[0];
    if len > 1 && stride != SAMPLE_BYTES as isize {
        return Err(LayoutFault::Strided { stride });
    }

    if len == 0 {
        return Ok(());
    }

    let extent_fits = len
        .checked_mul(SAMPLE_BYTES)
        .is_some_and(|bytes| bytes <= isize::MAX as usize);
    if !extent_fits {
        return Err(LayoutFault::ExtentOverflow { len });
    }

    let data = handle.data_ptr();
    if data.is_null() {
        return Err(LayoutFault::NullData);
    }
    if (data as usize) % std::mem::align_of::<Sample>() != 0 {
        return Err(LayoutFault::Misaligned {
            address: data as usize,
        });
    }

    Ok(())
}

/// Validated read-only complex64 view.
#[derive(Debug, Clone, Copy)]
pub struct ReadOnlyView<'a> {
    samples: &'a [Sample],
}

impl<'a> ReadOnlyView<'a> {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &'a [Sample] {
        self.samples
    }
}

impl<'a> From<&'a [Sample]> for ReadOnlyView<'a> {
    fn from(samples: &'a [Sample]) -> Self {
        Self { samples }
    }
}

/// Validated writable complex64 view.
#[derive(Debug)]
pub struct MutableView<'a> {
    samples: &'a mut [Sample],
}

impl<'a> MutableView<'a> {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[Sample] {
        self.samples
    }

    pub fn into_mut_slice(self) -> &'a mut [Sample] {
        self.samples
    }
}

impl<'a> From<&'a mut [Sample]> for MutableView<'a> {
    fn from(samples: &'a mut [Sample]) -> Self {
        Self { samples }
    }
}

/// Validates `handle` for reading and returns a view of its samples.
pub fn require_readable<'h>(
    handle: &'h ArrayHandle<'_>,
) -> Result<ReadOnlyView<'h>, ContractError> {
    let len = check_contract(handle, Access::ReadOnly)?;
    if len == 0 {
        return Ok(ReadOnlyView { samples: &[] });
    }

    // SAFETY: the contract check proved the pointer is non-null, aligned and
    // addresses `len` contiguous complex64 samples; the handle's constructor
    // guarantees that memory stays valid and unmutated while borrowed.
    let samples = unsafe { slice::from_raw_parts(handle.data_ptr() as *const Sample, len) };
    Ok(ReadOnlyView { samples })
}

/// Validates `handle` for in-place writes and returns a mutable view.
pub fn require_mutable<'h>(
    handle: &'h mut ArrayHandle<'_>,
) -> Result<MutableView<'h>, ContractError> {
    let len = check_contract(handle, Access::Writable)?;
    if len == 0 {
        return Ok(MutableView { samples: &mut [] });
    }

    // SAFETY: as in `require_readable`; additionally the handle grants
    // write access and is exclusively borrowed for the view's lifetime.
    let samples =
        unsafe { slice::from_raw_parts_mut(handle.data_ptr_mut() as *mut Sample, len) };
    Ok(MutableView { samples })
}
