//! Elementwise complex64 kernels.
//!
//! # Responsibility
//! - Run the numeric transforms over already validated views.
//! - Report the one precondition that only kernels can see (length mismatch).
//!
//! # Invariants
//! - A kernel either runs to completion or fails before allocating.
//! - Kernels hold no state between calls.

use crate::array::{ContractError, LayoutFault};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod elementwise;

pub use elementwise::{affine, multiply, scale_in_place};

pub type KernelResult<T> = Result<T, KernelError>;

/// Stable error classification shared by logs and foreign callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeMismatch,
    ShapeMismatch,
    LayoutMismatch,
    NotWritable,
    LengthMismatch,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::ShapeMismatch => "shape_mismatch",
            Self::LayoutMismatch => "layout_mismatch",
            Self::NotWritable => "not_writable",
            Self::LengthMismatch => "length_mismatch",
        }
    }
}

/// Errors surfaced by kernels and the operations built on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    Contract(ContractError),
    LengthMismatch { left: usize, right: usize },
}

impl KernelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Contract(ContractError::TypeMismatch { .. }) => ErrorKind::TypeMismatch,
            Self::Contract(ContractError::ShapeMismatch { .. }) => ErrorKind::ShapeMismatch,
            Self::Contract(ContractError::LayoutMismatch(_)) => ErrorKind::LayoutMismatch,
            Self::Contract(ContractError::NotWritable) => ErrorKind::NotWritable,
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
        }
    }

    /// Layout detail, when the failure was a layout violation.
    pub fn layout_fault(&self) -> Option<LayoutFault> {
        match self {
            Self::Contract(ContractError::LayoutMismatch(fault)) => Some(*fault),
            _ => None,
        }
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contract(err) => write!(f, "{err}"),
            Self::LengthMismatch { left, right } => write!(
                f,
                "arrays must have the same length, got {left} and {right}"
            ),
        }
    }
}

impl Error for KernelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Contract(err) => Some(err),
            Self::LengthMismatch { .. } => None,
        }
    }
}

impl From<ContractError> for KernelError {
    fn from(value: ContractError) -> Self {
        Self::Contract(value)
    }
}
