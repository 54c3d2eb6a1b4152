//! Complex64 elementwise transforms.

use crate::array::{MutableView, ReadOnlyView};
use crate::kernel::{KernelError, KernelResult};
use crate::model::buffer::{ComplexBuffer, Sample};

/// In-place scale: `x[i] *= alpha`.
pub fn scale_in_place(view: MutableView<'_>, alpha: Sample) {
    for z in view.into_mut_slice() {
        *z *= alpha;
    }
}

/// Affine transform into a new buffer: `out[i] = a * x[i] + b`.
pub fn affine(x: &ReadOnlyView<'_>, a: Sample, b: Sample) -> ComplexBuffer {
    x.as_slice().iter().map(|&z| a * z + b).collect()
}

/// Elementwise product into a new buffer: `out[i] = x[i] * y[i]`.
///
/// # Errors
/// - `LengthMismatch` when the views differ in length; nothing is allocated.
pub fn multiply(x: &ReadOnlyView<'_>, y: &ReadOnlyView<'_>) -> KernelResult<ComplexBuffer> {
    if x.len() != y.len() {
        return Err(KernelError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }

    Ok(x
        .as_slice()
        .iter()
        .zip(y.as_slice())
        .map(|(&lhs, &rhs)| lhs * rhs)
        .collect())
}
